//! RGBA colour values and their literal forms.

use super::{ParseScalar, fixed_components, parse_components};
use crate::ScalarFormatError;

/// Linear RGBA colour with components in `0.0..=1.0`.
///
/// Accepted literals:
///
/// * `RGBA(r, g, b, a)` with 0-255 components;
/// * `RGB(r, g, b)` with 0-255 components and opaque alpha;
/// * `HSBA(h, s, b, a)` with 0-255 components, converted to RGB;
/// * `#RRGGBB` or `#RRGGBBAA` hexadecimal;
/// * `r, g, b[, a]` with 0-1 components.
///
/// # Examples
///
/// ```
/// use nodebind::{Color, ParseScalar};
///
/// let c = Color::parse_scalar("RGBA(255, 0, 0, 255)").expect("valid literal");
/// assert_eq!(c, Color::new(1.0, 0.0, 0.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Builds a colour from its channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "byte channels are normalised by division"
    )]
    fn from_bytes(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r / 255.0, g / 255.0, b / 255.0, a / 255.0)
    }

    /// Converts hue, saturation and brightness in `0.0..=1.0` to RGB.
    #[expect(
        clippy::float_arithmetic,
        reason = "hue sector interpolation is floating point"
    )]
    fn from_hsb(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Self {
        if saturation.abs() <= 0.0 {
            return Self::new(brightness, brightness, brightness, alpha);
        }
        let max = brightness;
        let dif = brightness * saturation;
        let min = brightness - dif;
        let h = hue * 360.0;
        let ramp = |offset: f32| offset * dif / 60.0 + min;
        let (r, g, b) = if h < 60.0 {
            (max, ramp(h), min)
        } else if h < 120.0 {
            (ramp(120.0 - h), max, min)
        } else if h < 180.0 {
            (min, max, ramp(h - 120.0))
        } else if h < 240.0 {
            (min, ramp(240.0 - h), max)
        } else if h < 300.0 {
            (ramp(h - 240.0), min, max)
        } else if h <= 360.0 {
            (max, min, ramp(360.0 - h))
        } else {
            (0.0, 0.0, 0.0)
        };
        Self::new(r, g, b, alpha)
    }

    fn from_hex(raw: &str, digits: &str) -> Result<Self, ScalarFormatError> {
        let invalid = |reason: &str| ScalarFormatError::new(raw, Self::TYPE_NAME, reason);
        if !matches!(digits.len(), 6 | 8) {
            return Err(invalid("expected 6 or 8 hexadecimal digits"));
        }
        let nibbles = digits
            .chars()
            .map(|c| c.to_digit(16).and_then(|d| u8::try_from(d).ok()))
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(|| invalid("invalid hexadecimal digit"))?;
        let bytes: Vec<f32> = nibbles
            .chunks_exact(2)
            .map(|pair| match pair {
                [hi, lo] => f32::from(hi * 16 + lo),
                _ => 0.0,
            })
            .collect();
        match bytes.as_slice() {
            [r, g, b] => Ok(Self::from_bytes(*r, *g, *b, 255.0)),
            [r, g, b, a] => Ok(Self::from_bytes(*r, *g, *b, *a)),
            _ => Err(invalid("expected 6 or 8 hexadecimal digits")),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

fn call_args<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    raw.strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('('))
        .map(|rest| rest.trim_end().trim_end_matches(')'))
}

impl ParseScalar for Color {
    const TYPE_NAME: &'static str = "Color";

    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
        let text = raw.trim();
        if let Some(args) = call_args(text, "RGBA") {
            let [r, g, b, a] = fixed_components(args, Self::TYPE_NAME)?;
            return Ok(Self::from_bytes(r, g, b, a));
        }
        if let Some(args) = call_args(text, "RGB") {
            let [r, g, b] = fixed_components(args, Self::TYPE_NAME)?;
            return Ok(Self::from_bytes(r, g, b, 255.0));
        }
        if let Some(args) = call_args(text, "HSBA") {
            let [h, s, b, a] = fixed_components(args, Self::TYPE_NAME)?;
            let normalised = Self::from_bytes(h, s, b, a);
            return Ok(Self::from_hsb(
                normalised.r,
                normalised.g,
                normalised.b,
                normalised.a,
            ));
        }
        if let Some(digits) = text.strip_prefix('#') {
            return Self::from_hex(raw, digits);
        }
        match parse_components::<f32>(text, Self::TYPE_NAME)?.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b, 1.0)),
            [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
            other => Err(ScalarFormatError::new(
                raw,
                Self::TYPE_NAME,
                format!("expected 3 or 4 components, found {}", other.len()),
            )),
        }
    }
}

crate::scalar_field!(Color);
