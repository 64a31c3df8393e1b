use crate::foundation::{
    error::{QuirlError, QuirlResult},
    math::lerp_u8,
};

/// Straight (non-premultiplied) 8-bit sRGB color.
///
/// Every user-supplied color enters the engine through [`Color::validate`],
/// so downstream components never see a malformed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Default foreground (`#000000`).
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// Default background (`#FFFFFF`).
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rgb` or `#rrggbb` hex string.
    pub fn parse(input: &str) -> QuirlResult<Self> {
        let s = input.trim();
        let Some(hex) = s.strip_prefix('#') else {
            return Err(QuirlError::unsupported_color(format!(
                "'{s}' is not a hex color"
            )));
        };

        let nibble = |c: char| -> QuirlResult<u8> {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| QuirlError::unsupported_color(format!("'{s}' is not a hex color")))
        };

        let chars: Vec<char> = hex.chars().collect();
        match chars.len() {
            3 => {
                let r = nibble(chars[0])?;
                let g = nibble(chars[1])?;
                let b = nibble(chars[2])?;
                Ok(Self::new(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => {
                let r = nibble(chars[0])? << 4 | nibble(chars[1])?;
                let g = nibble(chars[2])? << 4 | nibble(chars[3])?;
                let b = nibble(chars[4])? << 4 | nibble(chars[5])?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(QuirlError::unsupported_color(format!(
                "'{s}' must be 3 or 6 hex digits"
            ))),
        }
    }

    /// Parse `input`, falling back to `fallback` on malformed values.
    ///
    /// This is the recovery path for `UnsupportedColor`: the condition is
    /// logged and composition proceeds with the documented default.
    pub fn validate(input: &str, fallback: Color) -> Color {
        match Self::parse(input) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(input, fallback = %fallback.to_hex(), "color rejected: {e}");
                fallback
            }
        }
    }

    /// Canonical 6-digit lowercase hex form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Rec. 601 luma, 0..=255.
    pub fn luma(self) -> u8 {
        let y = 299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b);
        (y / 1000) as u8
    }

    /// White or black, whichever contrasts with `self`.
    pub fn contrasting(self) -> Color {
        if self.luma() >= 140 {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    /// Blend toward white, `t` in 0.0..=1.0.
    pub fn lighten(self, t: f32) -> Color {
        Self::lerp(self, Color::WHITE, t)
    }

    /// Blend toward black, `t` in 0.0..=1.0.
    pub fn darken(self, t: f32) -> Color {
        Self::lerp(self, Color::BLACK, t)
    }

    /// Channel-wise integer lerp, `t` clamped to 0.0..=1.0.
    pub fn lerp(a: Color, b: Color, t: f32) -> Color {
        let t = ((t.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
        Color::new(
            lerp_u8(a.r, b.r, t),
            lerp_u8(a.g, b.g, t),
            lerp_u8(a.b, b.b, t),
        )
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).map_err(|e| e.to_string())
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
