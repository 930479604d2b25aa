//! Deterministic Cell Content
//!
//! Pure mapping from (row, column, style, length) to a cell string.
//! No randomness and no hidden state: regenerated corpora are
//! byte-identical across runs and across worker assignment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Modulus applied to the per-cell seed before style expansion.
const SEED_MODULUS: u64 = 100_000;

/// 62-character alphabet used by the mixed style.
const MIXED_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Shape of generated cell content.
///
/// An unrecognized style name is rejected at parse time ([`FromStr`]),
/// before any generation begins; once a style value exists it cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStyle {
    /// Zero-padded decimal digits.
    Numeric,
    /// Cyclic lowercase letter stream.
    Alphabetic,
    /// Cyclic 62-character alphanumeric stream.
    Mixed,
}

impl ContentStyle {
    /// All styles, in catalog expansion order.
    pub const ALL: [ContentStyle; 3] = [
        ContentStyle::Numeric,
        ContentStyle::Alphabetic,
        ContentStyle::Mixed,
    ];

    /// Canonical lowercase name, as used in scenario names.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStyle::Numeric => "numeric",
            ContentStyle::Alphabetic => "alphabetic",
            ContentStyle::Mixed => "mixed",
        }
    }
}

impl fmt::Display for ContentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a content style name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown content style {0:?} (expected numeric, alphabetic or mixed)")]
pub struct UnknownStyle(pub String);

impl FromStr for ContentStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numeric" => Ok(ContentStyle::Numeric),
            "alphabetic" => Ok(ContentStyle::Alphabetic),
            "mixed" => Ok(ContentStyle::Mixed),
            other => Err(UnknownStyle(other.to_string())),
        }
    }
}

/// Generate one cell of exactly `cell_length` characters.
///
/// The seed is `(row * column_count + col) % 100_000`, so content depends
/// only on the cell's absolute position and the scenario parameters.
pub fn generate_cell(
    row: u64,
    col: usize,
    column_count: usize,
    style: ContentStyle,
    cell_length: usize,
) -> String {
    let seed = (row * column_count as u64 + col as u64) % SEED_MODULUS;

    match style {
        ContentStyle::Numeric => {
            let modulus = 10u64.saturating_pow(cell_length as u32);
            format!("{:0width$}", seed % modulus, width = cell_length)
        }
        ContentStyle::Alphabetic => (0..cell_length)
            .map(|i| (b'a' + ((seed + i as u64) % 26) as u8) as char)
            .collect(),
        ContentStyle::Mixed => (0..cell_length)
            .map(|i| MIXED_ALPHABET[((seed + i as u64) % 62) as usize] as char)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_length_exact_for_all_styles() {
        for style in ContentStyle::ALL {
            for length in [1, 4, 8, 16, 32] {
                for (row, col) in [(0, 0), (7, 3), (99_999, 19), (1_000_000, 0)] {
                    let cell = generate_cell(row, col, 20, style, length);
                    assert_eq!(cell.len(), length, "style {style} row {row} col {col}");
                }
            }
        }
    }

    #[test]
    fn test_numeric_is_zero_padded_digits() {
        let cell = generate_cell(0, 1, 10, ContentStyle::Numeric, 8);
        assert_eq!(cell.len(), 8);
        assert!(cell.chars().all(|c| c.is_ascii_digit()));
        // seed = 1, padded to 8 digits
        assert_eq!(cell, "00000001");
    }

    #[test]
    fn test_numeric_truncates_to_cell_length() {
        // seed = 4 * 10 + 2 = 42; 42 % 10^1 = 2
        let cell = generate_cell(4, 2, 10, ContentStyle::Numeric, 1);
        assert_eq!(cell, "2");
    }

    #[test]
    fn test_alphabetic_is_cyclic_lowercase() {
        let cell = generate_cell(0, 0, 10, ContentStyle::Alphabetic, 5);
        assert_eq!(cell, "abcde");

        let wrapped = generate_cell(0, 0, 10, ContentStyle::Alphabetic, 30);
        assert!(wrapped.chars().all(|c| c.is_ascii_lowercase()));
        assert_eq!(&wrapped[0..26], "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(&wrapped[26..30], "abcd");
    }

    #[test]
    fn test_mixed_uses_62_char_alphabet() {
        let cell = generate_cell(3, 7, 10, ContentStyle::Mixed, 16);
        assert!(cell.bytes().all(|b| MIXED_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generation_is_deterministic() {
        for style in ContentStyle::ALL {
            let a = generate_cell(123, 4, 10, style, 8);
            let b = generate_cell(123, 4, 10, style, 8);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_seed_wraps_at_modulus() {
        // rows 10_000 and 0 at col 0 with 10 columns produce the same seed
        let a = generate_cell(10_000, 0, 10, ContentStyle::Mixed, 8);
        let b = generate_cell(0, 0, 10, ContentStyle::Mixed, 8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("numeric".parse::<ContentStyle>(), Ok(ContentStyle::Numeric));
        assert_eq!("mixed".parse::<ContentStyle>(), Ok(ContentStyle::Mixed));
        assert_eq!(
            "alphabetic".parse::<ContentStyle>(),
            Ok(ContentStyle::Alphabetic)
        );

        let err = "random".parse::<ContentStyle>().unwrap_err();
        assert_eq!(err, UnknownStyle("random".to_string()));
    }
}
