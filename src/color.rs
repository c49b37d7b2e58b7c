//! Normalized RGBA colors and CSS color-string parsing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An RGBA color.
///
/// `r`, `g` and `b` are bytes; `a` is stored on the same 0–255 scale but is
/// kept fractional (`rgba(0,0,0,0.5)` has `a == 127.5`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255. }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a color from unconstrained channel values, rounding and
    /// clamping `r`/`g`/`b` and clamping (not rounding) `a` into 0–255.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: channel_to_byte(r),
            g: channel_to_byte(g),
            b: channel_to_byte(b),
            a: if a.is_nan() { 0. } else { a.clamp(0., 255.) },
        }
    }

    /// Parse a CSS color string.
    ///
    /// Accepted forms: `#rgb`, `#rrggbb`, `rgb(r, g, b)` and
    /// `rgba(r, g, b, a)` where `a` is in 0–1. Function names are
    /// case-insensitive and whitespace between tokens is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let s = input.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid(input));
        }

        let open = s.find('(').ok_or_else(|| invalid(input))?;
        let body = s[open + 1..]
            .trim_end()
            .strip_suffix(')')
            .ok_or_else(|| invalid(input))?;
        let name = s[..open].trim().to_ascii_lowercase();
        let args = body
            .split(',')
            .map(|part| parse_number(part.trim()))
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| invalid(input))?;

        let (rgb, alpha) = match (name.as_str(), args.as_slice()) {
            ("rgb", [r, g, b]) => ([*r, *g, *b], 1.),
            ("rgba", [r, g, b, a]) => ([*r, *g, *b], *a),
            _ => return Err(invalid(input)),
        };

        if let Some(channel) = rgb.iter().find(|c| **c > 255.) {
            return Err(Error::validation(format!(
                "color channel {} out of range in '{}'",
                channel, input
            )));
        }

        Ok(Self::new(rgb[0], rgb[1], rgb[2], alpha.clamp(0., 1.) * 255.))
    }

    /// Inverse of [`Color::parse`]: `rgb(..)` for opaque colors, otherwise
    /// `rgba(..)` with alpha printed using at most three decimals.
    pub fn to_css_string(&self) -> String {
        if self.a >= 255. {
            return format!("rgb({}, {}, {})", self.r, self.g, self.b);
        }
        let alpha = format!("{:.3}", self.a / 255.);
        let alpha = alpha.trim_end_matches('0').trim_end_matches('.');
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    /// Alpha as a 0–1 fraction.
    pub fn alpha_fraction(&self) -> f64 {
        self.a / 255.
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.
    }

    /// Byte representation, with alpha rounded the way the frame buffer
    /// stores it.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.r, self.g, self.b, channel_to_byte(self.a)]
    }
}

/// Rounds half-to-even and clamps into a byte, mirroring clamped pixel
/// array stores.
pub(crate) fn channel_to_byte(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round_ties_even().clamp(0., 255.) as u8
}

fn invalid(input: &str) -> Error {
    Error::validation(format!("unrecognised color '{}'", input))
}

fn parse_number(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    match hex.len() {
        3 => {
            let expand = |n: u8| n << 4 | n;
            Some(Color::rgb(
                expand(digit(0)?),
                expand(digit(1)?),
                expand(digit(2)?),
            ))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Color::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_css_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_string())
    }
}
