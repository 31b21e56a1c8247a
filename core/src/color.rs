use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`; malformed components fall back to 0.
    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let part = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(0)
        };
        let a = if hex.len() >= 8 { part(6..8) } else { 255 };
        Self {
            r: part(0..2),
            g: part(2..4),
            b: part(4..6),
            a,
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }
    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }
    pub fn red() -> Self {
        Self::rgb(255, 0, 0)
    }
    pub fn green() -> Self {
        Self::rgb(0, 255, 0)
    }
    pub fn blue() -> Self {
        Self::rgb(0, 0, 255)
    }
    pub fn gray() -> Self {
        Self::rgb(128, 128, 128)
    }

    pub fn to_pixel(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parses_rgb_and_rgba() {
        assert_eq!(Color::hex("#ff8000"), Color::rgb(255, 128, 0));
        assert_eq!(Color::hex("ff800040"), Color::rgba(255, 128, 0, 64));
    }

    #[test]
    fn hex_malformed_falls_back_to_zero() {
        assert_eq!(Color::hex("#zz0000"), Color::rgb(0, 0, 0));
        assert_eq!(Color::hex("#f"), Color::rgb(0, 0, 0));
    }

    #[test]
    fn display_round_trips() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(Color::hex(&c.to_string()), c);
    }
}
