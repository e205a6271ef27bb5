//! RGBA color type and CSS color recognition.
//!
//! Style tags attached to highlights are either colors or class-name
//! references. This module decides which: anything [`Rgba::from_css`] accepts
//! is a color, everything else is a class name.
//!
//! Recognized forms:
//!
//! - hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - functional: `rgb()`, `rgba()`, `hsl()`, `hsla()` (comma or space separated,
//!   optional `/ alpha`, percentages accepted)
//! - keywords: `transparent` and the common named colors
//!
//! # Examples
//!
//! ```
//! use textarea_overlay::Rgba;
//!
//! let yellow = Rgba::from_css("#ff0").unwrap();
//! assert_eq!(yellow, Rgba::from_rgb_u8(255, 255, 0));
//!
//! let soft = Rgba::from_css("rgba(255, 0, 0, 0.25)").unwrap();
//! assert!((soft.a - 0.25).abs() < f32::EPSILON);
//!
//! assert!(Rgba::from_css("keyword-highlight").is_err());
//! ```

use crate::error::{Error, Result};
use std::fmt;

/// RGBA color with f32 components in range [0.0, 1.0].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Named colors accepted by [`Rgba::from_css`].
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("aqua", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("fuchsia", (255, 0, 255)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("pink", (255, 192, 203)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("silver", (192, 192, 192)),
    ("maroon", (128, 0, 0)),
    ("olive", (128, 128, 0)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
    ("gold", (255, 215, 0)),
    ("lightblue", (173, 216, 230)),
    ("lightgreen", (144, 238, 144)),
    ("lightyellow", (255, 255, 224)),
    ("lightgray", (211, 211, 211)),
    ("lightgrey", (211, 211, 211)),
    ("darkgray", (169, 169, 169)),
    ("darkgrey", (169, 169, 169)),
    ("coral", (255, 127, 80)),
    ("salmon", (250, 128, 114)),
    ("khaki", (240, 230, 140)),
    ("violet", (238, 130, 238)),
    ("indigo", (75, 0, 130)),
    ("crimson", (220, 20, 60)),
    ("tomato", (255, 99, 71)),
];

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Opaque black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Opaque white.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Create a new RGBA color from f32 components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from f32 RGB components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from u8 RGB components.
    #[must_use]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: 1.0,
        }
    }

    /// Create a color from u8 RGBA components.
    #[must_use]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Parse a hex color string (e.g., "#FF0000" or "FF0000").
    ///
    /// Supports 3-char (#RGB), 4-char (#RGBA), 6-char (#RRGGBB), and 8-char
    /// (#RRGGBBAA) formats.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::from_rgb_u8(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::from_rgba_u8(
                nibble(0)?,
                nibble(1)?,
                nibble(2)?,
                nibble(3)?,
            )),
            6 => Some(Self::from_rgb_u8(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::from_rgba_u8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Create a color from HSL values.
    ///
    /// - h: Hue in degrees (wrapped into [0, 360))
    /// - s: Saturation [0, 1]
    /// - l: Lightness [0, 1]
    #[must_use]
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s <= 0.0 {
            return Self::rgb(l, l, l);
        }

        let h = h.rem_euclid(360.0) / 360.0;
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let channel = |t: f32| {
            let t = t.rem_euclid(1.0);
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        };
        Self::rgb(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
    }

    /// Parse any CSS color form this crate recognizes.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn from_css(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(input.to_string());
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }
        let lower = trimmed.to_ascii_lowercase();

        if lower.starts_with('#') {
            return Self::from_hex(&lower).ok_or_else(invalid);
        }
        if lower == "transparent" {
            return Ok(Self::TRANSPARENT);
        }
        if let Some((_, (r, g, b))) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
            return Ok(Self::from_rgb_u8(*r, *g, *b));
        }

        let (func, args) = lower
            .strip_suffix(')')
            .and_then(|body| body.split_once('('))
            .ok_or_else(invalid)?;
        let args = split_args(args).ok_or_else(invalid)?;
        match func.trim() {
            "rgb" | "rgba" => parse_rgb_args(&args).ok_or_else(invalid),
            "hsl" | "hsla" => parse_hsl_args(&args).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }

    /// Return a new color with the specified alpha value.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha,
        }
    }

    /// Convert to u8 RGBA tuple, clamping values to [0, 255].
    #[must_use]
    pub fn to_rgba_u8(self) -> (u8, u8, u8, u8) {
        let to_u8 = |value: f32| (value * 255.0).round().clamp(0.0, 255.0) as u8;
        (to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a))
    }

    /// Check if this color is fully transparent.
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }
}

/// Split functional-notation arguments on commas, whitespace and `/`.
///
/// Returns `None` for an argument count no color function accepts.
fn split_args(args: &str) -> Option<Vec<&str>> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    matches!(parts.len(), 3 | 4).then_some(parts)
}

fn parse_number(part: &str) -> Option<f32> {
    let value: f32 = part.parse().ok()?;
    value.is_finite().then_some(value)
}

/// A channel given as `0..=255` or as a percentage.
fn parse_channel(part: &str) -> Option<f32> {
    match part.strip_suffix('%') {
        Some(pct) => Some((parse_number(pct)? / 100.0).clamp(0.0, 1.0)),
        None => Some((parse_number(part)? / 255.0).clamp(0.0, 1.0)),
    }
}

/// Alpha given as `0..=1` or as a percentage.
fn parse_alpha(part: Option<&&str>) -> Option<f32> {
    let Some(part) = part else {
        return Some(1.0);
    };
    match part.strip_suffix('%') {
        Some(pct) => Some((parse_number(pct)? / 100.0).clamp(0.0, 1.0)),
        None => Some(parse_number(part)?.clamp(0.0, 1.0)),
    }
}

fn parse_percent(part: &str) -> Option<f32> {
    let value = part.strip_suffix('%').unwrap_or(part);
    Some((parse_number(value)? / 100.0).clamp(0.0, 1.0))
}

fn parse_rgb_args(args: &[&str]) -> Option<Rgba> {
    Some(Rgba::new(
        parse_channel(args[0])?,
        parse_channel(args[1])?,
        parse_channel(args[2])?,
        parse_alpha(args.get(3))?,
    ))
}

fn parse_hsl_args(args: &[&str]) -> Option<Rgba> {
    let hue = parse_number(args[0].strip_suffix("deg").unwrap_or(args[0]))?;
    let color = Rgba::from_hsl(hue, parse_percent(args[1])?, parse_percent(args[2])?);
    Some(color.with_alpha(parse_alpha(args.get(3))?))
}

impl fmt::Display for Rgba {
    #[allow(clippy::many_single_char_names)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.to_rgba_u8();
        if a == u8::MAX {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Rgba, b: Rgba) -> bool {
        (a.r - b.r).abs() < 0.01
            && (a.g - b.g).abs() < 0.01
            && (a.b - b.b).abs() < 0.01
            && (a.a - b.a).abs() < 0.01
    }

    #[test]
    fn test_from_hex_forms() {
        assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::WHITE));
        assert_eq!(Rgba::from_hex("000000"), Some(Rgba::BLACK));
        assert_eq!(
            Rgba::from_hex("#ff000080"),
            Some(Rgba::from_rgba_u8(255, 0, 0, 128))
        );
        assert_eq!(
            Rgba::from_hex("#f008"),
            Some(Rgba::from_rgba_u8(255, 0, 0, 136))
        );
        assert_eq!(Rgba::from_hex("#12345"), None);
        assert_eq!(Rgba::from_hex("#ggg"), None);
    }

    #[test]
    fn test_from_hex_rejects_multibyte_without_panicking() {
        assert_eq!(Rgba::from_hex("#é1"), None);
        assert_eq!(Rgba::from_hex("日本"), None);
    }

    #[test]
    fn test_from_css_named_and_keywords() {
        assert_eq!(Rgba::from_css("Yellow"), Ok(Rgba::from_rgb_u8(255, 255, 0)));
        assert_eq!(Rgba::from_css("  transparent "), Ok(Rgba::TRANSPARENT));
        assert!(Rgba::from_css("").is_err());
        assert!(Rgba::from_css("highlight-error").is_err());
    }

    #[test]
    fn test_from_css_functional() {
        let c = Rgba::from_css("rgb(255, 128, 0)").unwrap();
        assert!(approx(c, Rgba::from_rgb_u8(255, 128, 0)));

        let c = Rgba::from_css("rgba(0 0 255 / 50%)").unwrap();
        assert!(approx(c, Rgba::new(0.0, 0.0, 1.0, 0.5)));

        let c = Rgba::from_css("hsl(120, 100%, 50%)").unwrap();
        assert!(approx(c, Rgba::rgb(0.0, 1.0, 0.0)));

        let c = Rgba::from_css("hsla(0deg 100% 50% / 0.3)").unwrap();
        assert!(approx(c, Rgba::new(1.0, 0.0, 0.0, 0.3)));
    }

    #[test]
    fn test_from_css_rejects_malformed_functions() {
        assert!(Rgba::from_css("rgb(1, 2)").is_err());
        assert!(Rgba::from_css("rgb(a, b, c)").is_err());
        assert!(Rgba::from_css("rgb(1, 2, 3").is_err());
        assert!(Rgba::from_css("lab(50% 40 59)").is_err());
        assert!(Rgba::from_css("rgb(nan, 0, 0)").is_err());
    }

    #[test]
    fn test_display_round_trips_through_hex() {
        let c = Rgba::from_rgba_u8(18, 52, 86, 120);
        assert_eq!(c.to_string(), "#12345678");
        assert_eq!(Rgba::from_hex(&c.to_string()), Some(c));
        assert_eq!(Rgba::WHITE.to_string(), "#ffffff");
    }
}
