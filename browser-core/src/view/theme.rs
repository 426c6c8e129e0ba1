//! src/view/theme.rs
//! ============================================================================
//! # Catppuccin Mocha Theme Color Palette
//!
//! Colors follow the official Catppuccin Mocha palette:
//! https://github.com/catppuccin/catppuccin

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(30, 30, 46); // Base
pub const CURRENT_LINE: Color = Color::Rgb(69, 71, 90); // Surface1
pub const FOREGROUND: Color = Color::Rgb(205, 214, 244); // Text
pub const COMMENT: Color = Color::Rgb(127, 132, 156); // Overlay1
pub const CYAN: Color = Color::Rgb(137, 220, 235); // Sky
pub const GREEN: Color = Color::Rgb(166, 227, 161); // Green
pub const ORANGE: Color = Color::Rgb(250, 179, 135); // Peach
pub const PURPLE: Color = Color::Rgb(203, 166, 247); // Mauve
pub const RED: Color = Color::Rgb(243, 139, 168); // Red
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // Yellow

pub fn panel_style() -> Style {
    Style::default().bg(BACKGROUND).fg(FOREGROUND)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PURPLE)
    } else {
        Style::default().fg(COMMENT)
    }
}

pub fn highlight_style() -> Style {
    Style::default()
        .bg(CURRENT_LINE)
        .fg(FOREGROUND)
        .add_modifier(Modifier::BOLD)
}

pub fn chip_style(active: bool) -> Style {
    if active {
        Style::default()
            .bg(PURPLE)
            .fg(BACKGROUND)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COMMENT)
    }
}

pub fn category_style() -> Style {
    Style::default().fg(ORANGE)
}

pub fn description_style() -> Style {
    Style::default().fg(COMMENT).add_modifier(Modifier::ITALIC)
}

pub fn line_number_style() -> Style {
    Style::default().fg(COMMENT)
}
