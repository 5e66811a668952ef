// Allow dead code: Style functions defined for consistent UI
#![allow(dead_code)]

use ratatui::style::{Color, Modifier, Style};

// Color palette: slate blue chrome with amber accents
pub const PRIMARY: Color = Color::Rgb(96, 156, 219);
pub const SECONDARY: Color = Color::Rgb(118, 178, 122);
pub const ACCENT: Color = Color::Rgb(222, 177, 92);
pub const ERROR: Color = Color::Rgb(214, 92, 92);
pub const MUTED: Color = Color::Rgb(112, 122, 136);
pub const HIGHLIGHT: Color = Color::Rgb(38, 48, 64);
pub const STATUS_BG: Color = Color::Rgb(22, 28, 38);

pub fn title_style() -> Style {
    Style::new().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::new()
        .fg(Color::White)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn muted_style() -> Style {
    Style::new().fg(MUTED)
}

pub fn accent_style() -> Style {
    Style::new().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::new().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::new().fg(ERROR).add_modifier(Modifier::BOLD)
}

/// Sidebar navigation entries; the active screen gets the primary color.
pub fn nav_style(selected: bool) -> Style {
    if selected {
        Style::new().fg(PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::new().fg(MUTED)
    }
}

pub fn border_style(focused: bool) -> Style {
    let color = if focused { PRIMARY } else { MUTED };
    Style::new().fg(color)
}

pub fn status_bar_style() -> Style {
    Style::new().bg(STATUS_BG).fg(Color::Gray)
}

pub fn help_key_style() -> Style {
    Style::new().fg(ACCENT).add_modifier(Modifier::BOLD)
}
