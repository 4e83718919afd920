//! Theme colour parsing
//!
//! The accent colour comes from a CSS custom property and may be written as
//! `#rgb`, `#rrggbb` or any functional form carrying three integers
//! (`rgb(10, 20, 30)`, `rgba(10,20,30,0.5)`).

use serde::{Deserialize, Serialize};

/// An 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Attach an alpha channel
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba {
            rgb: self,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::new(196, 75, 138)
    }
}

/// RGB colour with a separate alpha, as handed to a drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    /// CSS `rgba(...)` text
    pub fn css(&self) -> String {
        let [r, g, b] = self.rgb.0;
        format!("rgba({},{},{},{})", r, g, b, self.alpha)
    }
}

/// Parse a CSS colour value into channels.
///
/// Returns `None` for empty or unrecognised text so callers can keep their
/// previous colour.
pub fn parse_css_color(value: &str) -> Option<Rgb> {
    let raw = value.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(hex) = raw.strip_prefix('#') {
        return parse_hex(hex);
    }

    let mut channels = raw
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse::<u32>().ok().map(|v| v.min(255) as u8));

    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    Some(Rgb::new(r, g, b))
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let full: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&full[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hex() {
        assert_eq!(parse_css_color("#fff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(parse_css_color("  #0a0 "), Some(Rgb::new(0, 170, 0)));
    }

    #[test]
    fn test_long_hex() {
        assert_eq!(parse_css_color("#c44b8a"), Some(Rgb::new(196, 75, 138)));
    }

    #[test]
    fn test_functional_forms() {
        assert_eq!(parse_css_color("rgb(10, 20, 30)"), Some(Rgb::new(10, 20, 30)));
        assert_eq!(parse_css_color("rgba(1,2,3,0.5)"), Some(Rgb::new(1, 2, 3)));
        // Bare triples as some themes write them for use inside rgba()
        assert_eq!(parse_css_color("94 234 212"), Some(Rgb::new(94, 234, 212)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(parse_css_color(""), None);
        assert_eq!(parse_css_color("   "), None);
        assert_eq!(parse_css_color("teal"), None);
        assert_eq!(parse_css_color("#ffff"), None);
        assert_eq!(parse_css_color("#ggg"), None);
        assert_eq!(parse_css_color("rgb(1, 2)"), None);
    }

    #[test]
    fn test_css_text() {
        let c = Rgb::new(10, 20, 30).with_alpha(0.5);
        assert_eq!(c.css(), "rgba(10,20,30,0.5)");
        assert_eq!(Rgb::new(1, 1, 1).with_alpha(3.0).alpha, 1.0);
    }
}
