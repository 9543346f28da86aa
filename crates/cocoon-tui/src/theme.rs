use ratatui::style::Color;

/// Runtime theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    /// Frosted header background
    pub bg1: Color,
    /// Image placeholders and cards
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    /// Body copy
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Brand colors
    pub red: Color,
    /// Light end of the brand gradient, used for accent text
    pub red_light: Color,
    /// Bright end of the button gradient
    pub red_bright: Color,
    /// Header rule and card borders
    pub red_dim: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg0: Color::Rgb(0x0a, 0x0a, 0x0a),
            bg1: Color::Rgb(0x14, 0x14, 0x14),
            bg2: Color::Rgb(0x1a, 0x1a, 0x1a),
            fg0: Color::Rgb(0xff, 0xff, 0xff),
            fg1: Color::Rgb(0xaa, 0xaa, 0xaa),
            grey0: Color::Rgb(0x44, 0x44, 0x44),
            grey1: Color::Rgb(0x66, 0x66, 0x66),
            grey2: Color::Rgb(0x88, 0x88, 0x88),
            red: Color::Rgb(0xcd, 0x12, 0x1e),
            red_light: Color::Rgb(0xff, 0x6b, 0x7a),
            red_bright: Color::Rgb(0xff, 0x33, 0x44),
            red_dim: Color::Rgb(0x3a, 0x0b, 0x0e),
        }
    }
}

impl Theme {
    /// Blend `color` toward the page background; `opacity` 1.0 keeps it as is
    pub fn fade(&self, color: Color, opacity: f64) -> Color {
        let opacity = opacity.clamp(0.0, 1.0);
        match (color, self.bg0) {
            (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => Color::Rgb(
                mix(br, r, opacity),
                mix(bg, g, opacity),
                mix(bb, b, opacity),
            ),
            _ if opacity < 0.5 => self.bg0,
            _ => color,
        }
    }
}

fn mix(from: u8, to: u8, t: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * t).round() as u8
}
