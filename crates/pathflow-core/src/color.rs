//! Stroke colors for end markers.
//!
//! Colors arrive as strings in the page configuration and leave as strings on
//! the `stroke` attribute. Hex values are parsed into [`Color`] and emitted in
//! normalized form; any other CSS color (`steelblue`, `rgb(91,163,245)`,
//! `var(--accent)`) is kept verbatim as a [`CssColor::Css`] for the browser
//! to resolve.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn hex_pair(hi: u8, lo: u8) -> Option<f32> {
    Some((hex_val(hi)? << 4 | hex_val(lo)?) as f32 / 255.0)
}

fn hex_single(c: u8) -> Option<f32> {
    Some((hex_val(c)? * 17) as f32 / 255.0)
}

impl Color {
    /// Highlight used while a marker is arriving or dwelling at its end.
    pub const ACTIVE: Color = Color::rgb8(0x5B, 0xA3, 0xF5);
    /// Resting end-marker stroke.
    pub const INACTIVE: Color = Color::rgb8(0xD0, 0xD0, 0xD0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => Some(Self::rgba(
                hex_single(bytes[0])?,
                hex_single(bytes[1])?,
                hex_single(bytes[2])?,
                1.0,
            )),
            4 => Some(Self::rgba(
                hex_single(bytes[0])?,
                hex_single(bytes[1])?,
                hex_single(bytes[2])?,
                hex_single(bytes[3])?,
            )),
            6 => Some(Self::rgba(
                hex_pair(bytes[0], bytes[1])?,
                hex_pair(bytes[2], bytes[3])?,
                hex_pair(bytes[4], bytes[5])?,
                1.0,
            )),
            8 => Some(Self::rgba(
                hex_pair(bytes[0], bytes[1])?,
                hex_pair(bytes[2], bytes[3])?,
                hex_pair(bytes[4], bytes[5])?,
                hex_pair(bytes[6], bytes[7])?,
            )),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (channel(self.r), channel(self.g), channel(self.b), channel(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A `stroke` value: parsed hex, or any other CSS color string.
#[derive(Debug, Clone, PartialEq)]
pub enum CssColor {
    Hex(Color),
    Css(String),
}

impl CssColor {
    pub const ACTIVE: CssColor = CssColor::Hex(Color::ACTIVE);
    pub const INACTIVE: CssColor = CssColor::Hex(Color::INACTIVE);

    /// Hex first, then any non-empty string free of control characters.
    /// Named colors and functional notation are not checked further.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value.chars().any(char::is_control) {
            return None;
        }
        if value.starts_with('#') {
            return Color::from_hex(value).map(CssColor::Hex);
        }
        Some(CssColor::Css(value.to_string()))
    }

    /// Value to write to the `stroke` attribute.
    pub fn as_css(&self) -> Cow<'_, str> {
        match self {
            CssColor::Hex(color) => Cow::Owned(color.to_hex()),
            CssColor::Css(value) => Cow::Borrowed(value),
        }
    }
}

impl From<Color> for CssColor {
    fn from(color: Color) -> Self {
        CssColor::Hex(color)
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_css())
    }
}

impl Serialize for CssColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_css())
    }
}

impl<'de> Deserialize<'de> for CssColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CssColor::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color `{s}`")))
    }
}
