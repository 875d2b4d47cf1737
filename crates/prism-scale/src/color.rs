//! # Color Module
//!
//! Parsing and formatting of colors in the OKLCH perceptual space.
//!
//! ## Responsibilities
//! - **Parsing**: `oklch(...)`, `#rgb`, `#rrggbb` and `rgb(...)` literals.
//! - **Conversion**: sRGB to OKLCH and back through `palette`.
//! - **Formatting**: `oklch(L% C H)` with fixed rounding, or `#rrggbb`.

use crate::error::ScaleError;
use palette::{FromColor, Oklch, Srgb};
use serde::{Deserialize, Serialize};

/// Below this chroma the hue is noise from the sRGB conversion.
const ACHROMATIC_CHROMA: f64 = 5e-4;

/// A color in OKLCH.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OklchColor {
    /// Lightness in percent, 0 - 100.
    pub lightness: f64,
    /// Chroma, >= 0.
    pub chroma: f64,
    /// Hue in degrees, 0 - 360.
    pub hue: f64,
}

impl OklchColor {
    pub fn new(lightness: f64, chroma: f64, hue: f64) -> Self {
        Self {
            lightness,
            chroma,
            hue: hue.rem_euclid(360.0),
        }
    }

    pub fn achromatic(lightness: f64) -> Self {
        Self::new(lightness, 0.0, 0.0)
    }

    pub fn from_srgb8(r: u8, g: u8, b: u8) -> Self {
        let srgb = Srgb::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
        let lch: Oklch<f64> = Oklch::from_color(srgb);
        let chroma = lch.chroma.max(0.0);
        let hue = if chroma < ACHROMATIC_CHROMA {
            0.0
        } else {
            lch.hue.into_positive_degrees()
        };
        Self::new(lch.l * 100.0, chroma, hue)
    }

    /// Nearest sRGB color; out-of-gamut colors are clamped.
    pub fn to_srgb8(&self) -> [u8; 3] {
        let lch = Oklch::new(self.lightness / 100.0, self.chroma, self.hue);
        let srgb: Srgb<f64> = Srgb::from_color(lch);
        [
            channel_to_u8(srgb.red),
            channel_to_u8(srgb.green),
            channel_to_u8(srgb.blue),
        ]
    }

    /// `oklch(L% C H)`: integer lightness, two-decimal chroma, one-decimal hue.
    pub fn to_css(&self) -> String {
        let l = self.lightness.round();
        let c = (self.chroma * 100.0).round() / 100.0;
        let mut h = (self.hue * 10.0).round() / 10.0;
        if h >= 360.0 {
            h -= 360.0;
        }
        format!("oklch({}% {:.2} {})", l + 0.0, c + 0.0, trim_decimal(h + 0.0))
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_srgb8();
        format_hex([r, g, b])
    }
}

fn channel_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn trim_decimal(v: f64) -> String {
    let s = format!("{:.1}", v);
    match s.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => s,
    }
}

pub fn format_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Output notation for generated colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Oklch,
    Hex,
}

/// A parsed anchor literal.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorAnchor {
    pub literal: String,
    pub color: OklchColor,
    /// The exact sRGB value when the literal was written in sRGB notation.
    pub srgb: Option<[u8; 3]>,
}

impl ColorAnchor {
    pub fn parse(literal: &str) -> Result<Self, ScaleError> {
        let trimmed = literal.trim();
        let lower = trimmed.to_ascii_lowercase();

        let fail = |reason: &str| ScaleError::Parse {
            literal: literal.to_string(),
            reason: reason.to_string(),
        };

        if let Some(inner) = function_args(&lower, "oklch") {
            let color = parse_oklch_args(inner).map_err(|r| fail(&r))?;
            return Ok(Self {
                literal: literal.to_string(),
                color,
                srgb: None,
            });
        }

        let rgb = if let Some(hex) = lower.strip_prefix('#') {
            parse_hex(hex).map_err(|r| fail(&r))?
        } else if let Some(inner) = function_args(&lower, "rgb") {
            parse_rgb_args(inner).map_err(|r| fail(&r))?
        } else {
            return Err(fail("expected oklch(), rgb() or a hex color"));
        };

        Ok(Self {
            literal: literal.to_string(),
            color: OklchColor::from_srgb8(rgb[0], rgb[1], rgb[2]),
            srgb: Some(rgb),
        })
    }
}

/// Parses any supported literal straight to OKLCH.
pub fn parse_color(literal: &str) -> Result<OklchColor, ScaleError> {
    ColorAnchor::parse(literal).map(|a| a.color)
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
        .map(str::trim)
}

fn parse_number(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("`{}` is not finite", s))
    }
}

fn parse_oklch_args(inner: &str) -> Result<OklchColor, String> {
    if inner.contains('/') {
        return Err("alpha is not supported".into());
    }
    let parts: Vec<&str> = inner.split_whitespace().collect();
    let [l, c, h] = parts.as_slice() else {
        return Err(format!("expected 3 components, found {}", parts.len()));
    };

    let lightness = match l.strip_suffix('%') {
        Some(pct) => parse_number(pct)?,
        None => parse_number(*l)? * 100.0,
    };
    if !(0.0..=100.0).contains(&lightness) {
        return Err(format!("lightness `{}` is out of range", l));
    }

    // CSS maps 100% chroma to 0.4.
    let chroma = match c.strip_suffix('%') {
        Some(pct) => parse_number(pct)? / 100.0 * 0.4,
        None => parse_number(*c)?,
    };
    if chroma < 0.0 {
        return Err(format!("chroma `{}` is negative", c));
    }

    let hue = if *h == "none" {
        0.0
    } else {
        parse_number(h.strip_suffix("deg").unwrap_or(*h))?
    };

    Ok(OklchColor::new(lightness, chroma, hue))
}

fn parse_hex(hex: &str) -> Result<[u8; 3], String> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("`#{}` contains non-hex characters", hex));
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        n => return Err(format!("expected 3 or 6 hex digits, found {}", n)),
    };
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|e| e.to_string())
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

fn parse_rgb_args(inner: &str) -> Result<[u8; 3], String> {
    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(format!("expected 3 channels, found {}", parts.len()));
    };
    let channel = |s: &str| -> Result<u8, String> {
        let v = parse_number(s)?;
        if !(0.0..=255.0).contains(&v) {
            return Err(format!("channel `{}` is out of range", s));
        }
        Ok(v.round() as u8)
    };
    Ok([channel(*r)?, channel(*g)?, channel(*b)?])
}
