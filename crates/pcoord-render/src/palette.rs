//! Color utilities for series styling

use std::fmt::Write;

/// An sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba(...)` notation
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, self.a as f32 / 255.0)
        }
    }
}

const PALETTE: &[Rgba] = &[
    Rgba::rgb(100, 150, 250),  // Blue
    Rgba::rgb(250, 150, 100),  // Orange
    Rgba::rgb(150, 250, 100),  // Green
    Rgba::rgb(250, 100, 150),  // Pink
    Rgba::rgb(150, 100, 250),  // Purple
    Rgba::rgb(250, 250, 100),  // Yellow
    Rgba::rgb(100, 250, 250),  // Cyan
    Rgba::rgb(250, 100, 100),  // Red
];

/// Get a categorical color from the palette
pub fn categorical_color(index: usize) -> Rgba {
    PALETTE[index % PALETTE.len()]
}

/// Series suffix letter: 0 -> "a", 25 -> "z", 26 -> "a"
pub fn alpha_numerate(index: usize) -> String {
    char::from(b'a' + (index % 26) as u8).to_string()
}

/// Stylesheet used when a document embeds its own styling
pub fn default_stylesheet() -> String {
    let mut css = String::new();
    css.push_str(".ct-line { fill: none; stroke-width: 1.5px; }\n");
    css.push_str(".ct-mean { stroke: #202020; stroke-width: 3px; stroke-dasharray: 6px 3px; }\n");
    css.push_str(".ct-grid { stroke: rgba(0, 0, 0, 0.25); stroke-width: 1px; }\n");
    css.push_str(".ct-label { fill: rgba(0, 0, 0, 0.6); font-family: sans-serif; font-size: 11px; }\n");
    css.push_str(".ct-histogram-bar { fill: rgba(100, 150, 250, 0.35); }\n");
    css.push_str(".ct-histogram-label { fill: rgba(0, 0, 0, 0.5); font-size: 9px; }\n");
    css.push_str(".ct-ruler { fill: #303030; cursor: ns-resize; }\n");
    for i in 0..26 {
        let _ = writeln!(
            css,
            ".ct-series-{} .ct-line {{ stroke: {}; }}",
            alpha_numerate(i),
            categorical_color(i).to_css()
        );
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_numerate_wraps() {
        assert_eq!(alpha_numerate(0), "a");
        assert_eq!(alpha_numerate(25), "z");
        assert_eq!(alpha_numerate(26), "a");
    }

    #[test]
    fn test_css_notation() {
        assert_eq!(Rgba::rgb(100, 150, 250).to_css(), "#6496fa");
        assert_eq!(Rgba::rgb(0, 0, 0).with_alpha(51).to_css(), "rgba(0, 0, 0, 0.20)");
    }

    #[test]
    fn test_stylesheet_covers_series() {
        let css = default_stylesheet();
        assert!(css.contains(".ct-series-a .ct-line"));
        assert!(css.contains(".ct-series-z .ct-line"));
    }
}
