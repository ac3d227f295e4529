use anyhow::{bail, Result};
use std::fmt;

/// Represents a 24-bit RGB color
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// Parse `#rrggbb` or `rrggbb` (case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            bail!("Invalid hex color '{}', expected 6 hex digits", hex);
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        Ok(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Squared Euclidean distance in RGB space
    #[inline(always)]
    pub fn distance_sq(self, other: RgbColor) -> u32 {
        let dr = self.0 as i32 - other.0 as i32;
        let dg = self.1 as i32 - other.1 as i32;
        let db = self.2 as i32 - other.2 as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        assert_eq!(RgbColor::from_hex("#ff8000").unwrap(), RgbColor(255, 128, 0));
        assert_eq!(RgbColor::from_hex("FF8000").unwrap(), RgbColor(255, 128, 0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(RgbColor::from_hex("#fff").is_err());
        assert!(RgbColor::from_hex("#ff80001a").is_err());
        assert!(RgbColor::from_hex("#gg0000").is_err());
        assert!(RgbColor::from_hex("+f0000").is_err());
        assert!(RgbColor::from_hex("").is_err());
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(RgbColor(171, 205, 239).to_string(), "#abcdef");
    }

    #[test]
    fn test_distance() {
        assert_eq!(RgbColor(0, 0, 0).distance_sq(RgbColor(0, 0, 0)), 0);
        assert_eq!(RgbColor(0, 0, 0).distance_sq(RgbColor(255, 255, 255)), 3 * 255 * 255);
        assert_eq!(RgbColor(10, 0, 0).distance_sq(RgbColor(0, 3, 4)), 125);
    }
}
