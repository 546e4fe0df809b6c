//! Colors: the packed RGBA [`Color`] and its textual forms.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGBA colour packed into a `u32` (0xRRGGBBAA).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::from_rgba(0, 0, 0, 0);

    /// Construct an opaque colour from RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 0xFF)
    }

    /// Construct from individual RGBA components.
    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Alpha component (255 = opaque).
    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Whether the colour fully covers whatever is below it.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a() == 0xFF
    }

    /// The same colour with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::from_rgba(self.r(), self.g(), self.b(), a)
    }

    /// Packed `0xAARRGGBB`, the layout used by pixel buffers.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        ((self.a() as u32) << 24)
            | ((self.r() as u32) << 16)
            | ((self.g() as u32) << 8)
            | (self.b() as u32)
    }

    /// Inverse of [`to_argb`](Color::to_argb).
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self::from_rgba(
            ((argb >> 16) & 0xFF) as u8,
            ((argb >> 8) & 0xFF) as u8,
            (argb & 0xFF) as u8,
            ((argb >> 24) & 0xFF) as u8,
        )
    }

    /// Parse a six-digit hex string without `#` (`"1f75fe"`).
    pub fn from_hex6(s: &str) -> Option<Self> {
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Self::from_rgb(r, g, b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r(),
                self.g(),
                self.b(),
                self.a()
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A colour string that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid colour \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for ColorParseError {}

/// CSS names accepted by [`Color::from_str`], matched case-insensitively.
const NAMED: &[(&str, Color)] = &[
    ("black", Color::BLACK),
    ("white", Color::WHITE),
    ("transparent", Color::TRANSPARENT),
    ("dodgerblue", Color::from_rgb(30, 144, 255)),
    ("tomato", Color::from_rgb(255, 99, 71)),
    ("gold", Color::from_rgb(255, 215, 0)),
    ("seagreen", Color::from_rgb(46, 139, 87)),
    ("slategray", Color::from_rgb(112, 128, 144)),
    ("whitesmoke", Color::from_rgb(245, 245, 245)),
    ("crimson", Color::from_rgb(220, 20, 60)),
    ("rebeccapurple", Color::from_rgb(102, 51, 153)),
];

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` with `a` in `0.0..=1.0`, and a few CSS names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let t = s.trim();

        if let Some(hex) = t.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(err());
            }
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
            return match hex.len() {
                3 => {
                    let mut c = [0u8; 3];
                    for (i, ch) in hex.chars().enumerate() {
                        let v = ch.to_digit(16).ok_or_else(err)? as u8;
                        c[i] = v * 17;
                    }
                    Ok(Self::from_rgb(c[0], c[1], c[2]))
                }
                6 => Ok(Self::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
                8 => Ok(Self::from_rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
                _ => Err(err()),
            };
        }

        let lower = t.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let parts: Vec<&str> = args.split(',').map(str::trim).collect();
            let channel = |p: &str| p.parse::<u8>().map_err(|_| err());
            return match parts.as_slice() {
                [r, g, b] => Ok(Self::from_rgb(channel(r)?, channel(g)?, channel(b)?)),
                [r, g, b, a] => {
                    let alpha: f32 = a.parse().map_err(|_| err())?;
                    if !(0.0..=1.0).contains(&alpha) {
                        return Err(err());
                    }
                    let a = (alpha * 255.0).round() as u8;
                    Ok(Self::from_rgba(channel(r)?, channel(g)?, channel(b)?, a))
                }
                _ => Err(err()),
            };
        }

        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|&(_, c)| c)
            .ok_or_else(err)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}
