//! RGBA colors with CSS-style hex parsing

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when a hex color string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),
    #[error("color `{0}` must have 3, 6 or 8 hex digits")]
    BadLength(String),
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

/// Linear RGBA color, components in 0.0..=1.0
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn parse_hex(input: &str) -> Result<Self, ColorParseError> {
        let digits = input
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(input.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(input.to_string()));
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            _ => return Err(ColorParseError::BadLength(input.to_string())),
        };

        let channel = |i: usize| -> f32 {
            u8::from_str_radix(&expanded[i..i + 2], 16).unwrap_or(0) as f32 / 255.0
        };
        let alpha = if expanded.len() == 8 { channel(6) } else { 1.0 };
        Ok(Self::rgba(channel(0), channel(2), channel(4), alpha))
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not opaque
    pub fn to_hex_string(&self) -> String {
        let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if to_byte(self.a) == 255 {
            format!("#{:02x}{:02x}{:02x}", to_byte(self.r), to_byte(self.g), to_byte(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                to_byte(self.r),
                to_byte(self.g),
                to_byte(self.b),
                to_byte(self.a)
            )
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse_hex("#ffffff"), Ok(Color::WHITE));
        assert_eq!(Color::parse_hex("#000"), Ok(Color::BLACK));

        let gray = Color::parse_hex("#888888").unwrap();
        assert!((gray.r - 136.0 / 255.0).abs() < 1e-6);
        assert_eq!(gray.a, 1.0);

        let translucent = Color::parse_hex("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_hex_errors() {
        assert!(matches!(
            Color::parse_hex("888888"),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            Color::parse_hex("#88888"),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            Color::parse_hex("#88888g"),
            Err(ColorParseError::BadDigit(_))
        ));
    }

    #[test]
    fn test_hex_string_round_trip() {
        assert_eq!(Color::from_hex(0x3498db).to_hex_string(), "#3498db");
    }
}
