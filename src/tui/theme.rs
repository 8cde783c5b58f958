use ratatui::style::{Color, Modifier, Style};

use crate::models::Rating;

pub const BG: Color = Color::Rgb(14, 18, 20);
pub const SURFACE: Color = Color::Rgb(22, 28, 31);
pub const BORDER: Color = Color::Rgb(44, 58, 62);
pub const BORDER_FOCUS: Color = Color::Rgb(72, 176, 160);
pub const TEXT: Color = Color::Rgb(218, 228, 226);
pub const TEXT_DIM: Color = Color::Rgb(112, 130, 128);
pub const TEAL: Color = Color::Rgb(72, 176, 160);
pub const GREEN: Color = Color::Rgb(96, 186, 96);
pub const YELLOW: Color = Color::Rgb(222, 196, 72);
pub const ORANGE: Color = Color::Rgb(226, 140, 56);
pub const RED: Color = Color::Rgb(204, 78, 68);
pub const FILL: Color = Color::Rgb(60, 88, 90);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn accent() -> Style {
    Style::default().fg(TEAL)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Excellent => GREEN,
        Rating::Good => YELLOW,
        Rating::Fair => ORANGE,
        Rating::Poor => RED,
    }
}

/// Red at 0.0, yellow at 0.5, green at 1.0.
pub fn gradient(position: f64) -> Color {
    let t = position.clamp(0.0, 1.0);
    let (from, to, t) = if t < 0.5 {
        ((204.0, 78.0, 68.0), (222.0, 196.0, 72.0), t * 2.0)
    } else {
        ((222.0, 196.0, 72.0), (96.0, 186.0, 96.0), (t - 0.5) * 2.0)
    };
    let mix = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}
