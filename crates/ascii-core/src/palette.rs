//! Five-colour palette and the brightness bands that select from it.

use crate::constants::{DEFAULT_PALETTE, PALETTE_SIZE, PALETTE_THRESHOLDS};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("colour `{0}` must start with '#'")]
    MissingHash(String),
    #[error("colour `{0}` must have 3 or 6 hex digits")]
    BadLength(String),
    #[error("colour `{0}` contains a non-hex digit")]
    BadDigit(String),
    #[error("palette `{list}` has {found} colours, expected {PALETTE_SIZE}")]
    WrongCount { list: String, found: usize },
}

/// sRGB-encoded colour in `[0, 1]`, as picked in the control panel.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(ColorParseError::BadLength(s.to_string())),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ColorParseError::BadDigit(s.to_string()))
        };
        // from_str_radix accepts a leading '+', which is not a hex digit
        if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
    }

    pub fn mul(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    /// Decode to linear light for an sRGB render target.
    pub fn to_linear(self) -> Self {
        let f = |c: f32| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    #[inline]
    pub fn to_array4(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Fixed-length, index-addressed palette. Slots are replaced, never added or removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        let mut colors = [Rgb::BLACK; PALETTE_SIZE];
        for (slot, hex) in colors.iter_mut().zip(DEFAULT_PALETTE) {
            *slot = Rgb::from_hex(hex).unwrap_or(Rgb::WHITE);
        }
        Self { colors }
    }
}

impl Palette {
    pub fn new(colors: [Rgb; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    /// Parse exactly five comma-separated hex colours.
    pub fn parse_list(s: &str) -> Result<Self, ColorParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != PALETTE_SIZE {
            return Err(ColorParseError::WrongCount {
                list: s.to_string(),
                found: parts.len(),
            });
        }
        let mut colors = [Rgb::BLACK; PALETTE_SIZE];
        for (slot, part) in colors.iter_mut().zip(parts) {
            *slot = part.parse()?;
        }
        Ok(Self { colors })
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Replace one slot; out-of-range indices are ignored and reported as `false`.
    pub fn set(&mut self, index: usize, color: Rgb) -> bool {
        match self.colors.get_mut(index) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colors
    }

    /// Colour selected by the step cascade for `brightness`.
    pub fn resolve(&self, brightness: f32) -> Rgb {
        self.colors[band_index(brightness)]
    }
}

/// Palette band for `brightness`: band `k` once `brightness >= 0.2 * k`.
///
/// Mirrors the shader's `mix(prev, next, step(threshold, b))` cascade.
#[inline]
pub fn band_index(brightness: f32) -> usize {
    PALETTE_THRESHOLDS
        .iter()
        .filter(|&&t| brightness >= t)
        .count()
}
