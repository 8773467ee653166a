//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{RipError, Result};

/// An opaque RGB colour value.
///
/// Alpha is tracked on pixels, not on colours: background matching only
/// ever compares the three colour channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Take the colour channels of an RGBA pixel, dropping alpha.
    pub const fn from_rgba(px: [u8; 4]) -> Self {
        Self::rgb(px[0], px[1], px[2])
    }

    /// Squared Euclidean distance to another colour.
    pub fn distance_sq(self, other: Colour) -> u32 {
        distance_sq(self.r, self.g, self.b, other)
    }

    /// Check whether `other` lies within `tolerance` (Euclidean, inclusive).
    pub fn within(self, other: Colour, tolerance: u32) -> bool {
        self.distance_sq(other) <= tolerance_sq(tolerance)
    }

    /// Parse a hex colour string.
    ///
    /// Supports `#RGB` and `#RRGGBB`, with or without the leading `#`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 => {
                let mut digits = [0u8; 3];
                for (slot, c) in digits.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)?;
                }
                let [r, g, b] = digits;
                Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Convert to an opaque RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Squared distance from raw channels to a colour, shared by every backend.
#[inline]
pub(crate) fn distance_sq(r: u8, g: u8, b: u8, to: Colour) -> u32 {
    let dr = r as i32 - to.r as i32;
    let dg = g as i32 - to.g as i32;
    let db = b as i32 - to.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Square a tolerance for comparison against [`distance_sq`].
#[inline]
pub(crate) fn tolerance_sq(tolerance: u32) -> u32 {
    tolerance.saturating_mul(tolerance)
}

impl FromStr for Colour {
    type Err = RipError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn invalid_hex(s: &str) -> RipError {
    RipError::Config {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB or #RRGGBB format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| RipError::Config {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| RipError::Config {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
