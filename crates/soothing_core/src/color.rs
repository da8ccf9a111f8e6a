//! Colors, gradients and brushes
//!
//! Colors deserialize from `"#rrggbb"` / `"#rrggbbaa"` hex strings so that
//! component configuration can be loaded from TOML.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::geometry::Point;

/// RGBA color (components in 0.0..=1.0)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    // System palette used by the demo and the component defaults
    pub const PINK: Color = Color::rgb(1.0, 0.176, 0.333);
    pub const BLUE: Color = Color::rgb(0.0, 0.478, 1.0);
    pub const PURPLE: Color = Color::rgb(0.686, 0.322, 0.871);
    pub const GRAY: Color = Color::rgb(0.557, 0.557, 0.576);
    pub const RED: Color = Color::rgb(1.0, 0.231, 0.188);
    pub const GREEN: Color = Color::rgb(0.204, 0.78, 0.349);
    pub const YELLOW: Color = Color::rgb(1.0, 0.8, 0.0);
    pub const ORANGE: Color = Color::rgb(1.0, 0.584, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional)
    pub fn parse_hex(s: &str) -> Result<Self, ConfigError> {
        let digits = s.trim().trim_start_matches('#');
        let invalid = || ConfigError::InvalidColor {
            value: s.to_string(),
        };
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            3 => {
                let expand = |n: u32| ((n & 0xF) * 17) as f32 / 255.0;
                Ok(Self::rgb(expand(value >> 8), expand(value >> 4), expand(value)))
            }
            6 => Ok(Self::from_hex(value)),
            8 => Ok(Self::from_hex(value >> 8).with_alpha((value & 0xFF) as f32 / 255.0)),
            _ => Err(invalid()),
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }

    /// Multiply the current alpha by `factor`
    pub fn opacity(mut self, factor: f32) -> Self {
        self.a = (self.a * factor).clamp(0.0, 1.0);
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value)
    }
}

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f32,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Gradient fill
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
    /// Linear gradient between two points
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    /// Radial gradient from center outward
    Radial {
        center: Point,
        radius: f32,
        stops: Vec<GradientStop>,
    },
}

impl Gradient {
    /// Evenly spaced linear gradient through `colors`
    pub fn linear(start: Point, end: Point, colors: &[Color]) -> Self {
        Gradient::Linear {
            start,
            end,
            stops: even_stops(colors),
        }
    }

    /// Evenly spaced radial gradient through `colors`
    pub fn radial(center: Point, radius: f32, colors: &[Color]) -> Self {
        Gradient::Radial {
            center,
            radius,
            stops: even_stops(colors),
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Gradient::Linear { stops, .. } | Gradient::Radial { stops, .. } => stops,
        }
    }
}

fn even_stops(colors: &[Color]) -> Vec<GradientStop> {
    match colors.len() {
        0 => Vec::new(),
        1 => vec![GradientStop::new(0.0, colors[0])],
        n => colors
            .iter()
            .enumerate()
            .map(|(i, c)| GradientStop::new(i as f32 / (n - 1) as f32, *c))
            .collect(),
    }
}

/// Paint used to fill or stroke a shape
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    Gradient(Gradient),
}

impl Brush {
    /// Representative color (first stop for gradients)
    pub fn primary_color(&self) -> Option<Color> {
        match self {
            Brush::Solid(c) => Some(*c),
            Brush::Gradient(g) => g.stops().first().map(|s| s.color),
        }
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl From<Gradient> for Brush {
    fn from(gradient: Gradient) -> Self {
        Brush::Gradient(gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_variants() {
        let c = Color::parse_hex("#f35872").unwrap();
        assert!((c.r - 0xf3 as f32 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);

        let c = Color::parse_hex("fff").unwrap();
        assert_eq!(c, Color::WHITE);

        let c = Color::parse_hex("#00000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);

        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Palette {
            accent: Color,
        }
        let palette: Palette = toml::from_str("accent = \"#ff0000\"").unwrap();
        assert_eq!(palette.accent, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_even_stops() {
        let g = Gradient::linear(
            Point::ZERO,
            Point::new(1.0, 0.0),
            &[Color::PINK, Color::BLUE, Color::PURPLE],
        );
        let offsets: Vec<f32> = g.stops().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_opacity_multiplies() {
        let c = Color::PINK.opacity(0.5).opacity(0.5);
        assert!((c.a - 0.25).abs() < 1e-6);
    }
}
