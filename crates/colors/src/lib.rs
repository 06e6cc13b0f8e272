//! Normalises the colour representations accepted by shader parameters into
//! the four-channel floating point form uploaded as `vec4` uniforms.
//!
//! Types:
//!
//! - `Color` is the canonical `(r, g, b, a)` value. RGB channels are passed
//!   through unclamped; alpha is always clamped into `[0, 1]`.
//! - `ColorInput` enumerates what callers may hand to the normaliser: nothing,
//!   a numeric tuple, or a CSS-style string.
//! - `ColorError` describes why the strict parser rejected a string.
//!
//! Functions:
//!
//! - `normalize_color` never fails and falls back to opaque black.
//! - `parse_color` is the strict variant used where bad input must surface
//!   (preset files, CLI arguments).
//! - `Color::to_css` produces a lossless string that parses back to the same
//!   value; `Color::to_hex` and `Color::to_hsla_string` are the compact and
//!   editor-facing display forms.

mod hsl;
mod parse;

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

pub use hsl::Hsl;
pub use parse::parse_color;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("color string is empty")]
    Empty,
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
    #[error("invalid {function}() color '{input}'")]
    InvalidFunction {
        function: &'static str,
        input: String,
    },
    #[error("color tuple must have 3 or 4 channels, got {0}")]
    ChannelCount(usize),
    #[error("unrecognised color '{0}'")]
    Unrecognised(String),
}

/// Canonical four-channel colour as consumed by the shaders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Builds a colour, clamping only the alpha channel.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = if a.is_nan() { 1.0 } else { a.clamp(0.0, 1.0) };
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Builds a colour from 8-bit channels, e.g. `Color::rgba8(0xff, 0xad, 0x0a, 0xff)`.
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            channel_from_byte(r),
            channel_from_byte(g),
            channel_from_byte(b),
            channel_from_byte(a),
        )
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Lossless `rgba()` form: `normalize_color(c.to_css()) == c` for every colour.
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            f64::from(self.r) * 255.0,
            f64::from(self.g) * 255.0,
            f64::from(self.b) * 255.0,
            self.a
        )
    }

    /// Compact `#rrggbb` / `#rrggbbaa` form. Channels are clamped and rounded
    /// to 8 bits, so only 8-bit colours survive a round trip exactly.
    pub fn to_hex(self) -> String {
        let [r, g, b] = [self.r, self.g, self.b].map(channel_to_byte);
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{:02x}", channel_to_byte(self.a))
        }
    }

    pub fn to_hsl(self) -> Hsl {
        hsl::rgb_to_hsl(self)
    }

    pub fn from_hsl(value: Hsl) -> Self {
        hsl::hsl_to_rgb(value)
    }

    /// `hsla(H, S%, L%, A)` with integer H/S/L and alpha rounded to two decimals.
    pub fn to_hsla_string(self) -> String {
        let hsl = self.to_hsl();
        let alpha = (f64::from(hsl.alpha) * 100.0).round() / 100.0;
        format!(
            "hsla({}, {}%, {}%, {})",
            hsl.hue.round() as i32,
            (hsl.saturation * 100.0).round() as i32,
            (hsl.lightness * 100.0).round() as i32,
            alpha
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[f32; 4]> for Color {
    fn from(value: [f32; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

impl From<[f32; 3]> for Color {
    fn from(value: [f32; 3]) -> Self {
        Self::rgb(value[0], value[1], value[2])
    }
}

/// Source representations accepted by [`normalize_color`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorInput<'a> {
    Missing,
    Channels(&'a [f32]),
    Text(&'a str),
}

impl<'a> From<&'a str> for ColorInput<'a> {
    fn from(value: &'a str) -> Self {
        ColorInput::Text(value)
    }
}

impl<'a> From<&'a String> for ColorInput<'a> {
    fn from(value: &'a String) -> Self {
        ColorInput::Text(value.as_str())
    }
}

impl<'a> From<&'a [f32]> for ColorInput<'a> {
    fn from(value: &'a [f32]) -> Self {
        ColorInput::Channels(value)
    }
}

impl<'a, const N: usize> From<&'a [f32; N]> for ColorInput<'a> {
    fn from(value: &'a [f32; N]) -> Self {
        ColorInput::Channels(value.as_slice())
    }
}

impl<'a, T> From<Option<T>> for ColorInput<'a>
where
    T: Into<ColorInput<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ColorInput::Missing)
    }
}

/// Converts any supported representation into a [`Color`].
///
/// Malformed input degrades to opaque black instead of failing.
pub fn normalize_color<'a>(input: impl Into<ColorInput<'a>>) -> Color {
    match input.into() {
        ColorInput::Missing => Color::BLACK,
        ColorInput::Channels(channels) => from_channels(channels).unwrap_or_else(|err| {
            tracing::debug!(%err, "falling back to black for color tuple");
            Color::BLACK
        }),
        ColorInput::Text(text) => parse_color(text).unwrap_or_else(|err| {
            tracing::debug!(%err, "falling back to black for color string");
            Color::BLACK
        }),
    }
}

fn from_channels(channels: &[f32]) -> Result<Color, ColorError> {
    match *channels {
        [r, g, b] => Ok(Color::rgb(r, g, b)),
        [r, g, b, a] => Ok(Color::new(r, g, b, a)),
        _ => Err(ColorError::ChannelCount(channels.len())),
    }
}

fn channel_from_byte(byte: u8) -> f32 {
    (f64::from(byte) / 255.0) as f32
}

fn channel_to_byte(channel: f32) -> u8 {
    (f64::from(channel).clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // 8-bit colours keep the short form, everything else stays lossless.
        if normalize_color(self.to_hex().as_str()) == *self {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_str(&self.to_css())
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Str(String),
            Channels(Vec<f32>),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Str(raw) => parse_color(&raw).map_err(de::Error::custom),
            Helper::Channels(channels) => from_channels(&channels).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_is_opaque_black() {
        assert_eq!(normalize_color(ColorInput::Missing), Color::BLACK);
        assert_eq!(normalize_color(None::<&str>), Color::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn tuples_pass_through() {
        assert_eq!(
            normalize_color(&[0.5_f32, 0.2, 0.7]),
            Color::new(0.5, 0.2, 0.7, 1.0)
        );
        assert_eq!(
            normalize_color(&[0.5_f32, 0.2, 0.7, 0.8]),
            Color::new(0.5, 0.2, 0.7, 0.8)
        );
        assert_eq!(normalize_color(&[0.5_f32, 0.2]), Color::BLACK);
    }

    #[test]
    fn documented_forms() {
        assert_eq!(normalize_color("#f00"), Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(
            normalize_color("rgba(255,0,0,0.5)"),
            Color::new(1.0, 0.0, 0.0, 0.5)
        );
        assert_eq!(
            normalize_color("hsl(0,100%,50%)"),
            Color::new(1.0, 0.0, 0.0, 1.0)
        );
        assert_eq!(normalize_color("not-a-color"), Color::BLACK);
    }

    #[test]
    fn alpha_is_clamped_but_rgb_is_not() {
        let color = normalize_color("rgba(273,800,8000,1.5)");
        assert_eq!(color.a, 1.0);
        assert!(color.r > 1.0);
        assert_eq!(color.r, (273.0_f64 / 255.0) as f32);
        assert_eq!(color.b, (8000.0_f64 / 255.0) as f32);
    }

    #[test]
    fn css_form_is_idempotent() {
        for input in [
            "#f00",
            "#336699",
            "#ff0000cc",
            "rgb( 255 , 0 , 0 )",
            "rgba(255, 0, 0, 0.5)",
            "rgb(127, 127, 127)",
            "hsl(210, 50%, 40%)",
            "hsla(0, 100%, 50%, 0.5)",
            "rgba(273,800,8000,1.5)",
        ] {
            let first = normalize_color(input);
            let again = normalize_color(first.to_css().as_str());
            assert_eq!(again, first, "{input} -> {}", first.to_css());
        }
    }

    #[test]
    fn hex_form_round_trips_eight_bit_colors() {
        for input in ["#ffad0a", "#00000000", "#6200ffcc", "#F2FAEF"] {
            let color = normalize_color(input);
            assert_eq!(normalize_color(color.to_hex().as_str()), color);
        }
        assert_eq!(normalize_color("#F2FAEF").to_hex(), "#f2faef");
        assert_eq!(normalize_color("#00000000").to_hex(), "#00000000");
    }

    #[test]
    fn hsla_display_matches_editor_format() {
        assert_eq!(
            normalize_color("#336699").to_hsla_string(),
            "hsla(210, 50%, 40%, 1)"
        );
        assert_eq!(
            normalize_color("#00ff00").to_hsla_string(),
            "hsla(120, 100%, 50%, 1)"
        );
        assert_eq!(
            normalize_color("rgba(255, 0, 0, 0.5)").to_hsla_string(),
            "hsla(0, 100%, 50%, 0.5)"
        );
    }

    #[test]
    fn serde_uses_short_form_when_lossless() {
        #[derive(Serialize, Deserialize)]
        struct Doc {
            color: Color,
        }

        let doc = Doc {
            color: normalize_color("#ffad0a"),
        };
        let text = toml::to_string(&doc).unwrap();
        assert!(text.contains("\"#ffad0a\""));

        let parsed: Doc = toml::from_str("color = [0.25, 0.5, 1.0]").unwrap();
        assert_eq!(parsed.color, Color::rgb(0.25, 0.5, 1.0));

        let rejected: Result<Doc, _> = toml::from_str("color = \"nope\"");
        assert!(rejected.is_err());
    }
}
