//! Palette and semantic styling for the TUI.
//!
//! Dark storefront look: near-black chrome, red price accents, yellow
//! rating stars — matching the source app's list styling.

use ratatui::style::{Color, Modifier, Style};

// ── Core palette ──────────────────────────────────────────────────────

pub const PRICE_RED: Color = Color::Rgb(176, 0, 32); // #b00020
pub const STAR_YELLOW: Color = Color::Rgb(250, 204, 21); // #facc15
pub const ACCENT: Color = Color::Rgb(129, 140, 248); // #818cf8
pub const SUCCESS_GREEN: Color = Color::Rgb(74, 222, 128); // #4ade80
pub const ERROR_RED: Color = Color::Rgb(248, 113, 113); // #f87171

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const MUTED_GRAY: Color = Color::Rgb(120, 124, 140); // #787c8c
pub const BORDER_GRAY: Color = Color::Rgb(82, 88, 110); // #52586e
pub const BG_HIGHLIGHT: Color = Color::Rgb(38, 40, 52); // #262834

// ── Semantic styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Highlight for the selected list row.
pub fn row_selected() -> Style {
    Style::default()
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn price_style() -> Style {
    Style::default().fg(PRICE_RED).add_modifier(Modifier::BOLD)
}

pub fn rating_style() -> Style {
    Style::default().fg(STAR_YELLOW)
}

/// Key name in the hint bar.
pub fn key_hint_key() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Explanatory text in the hint bar.
pub fn key_hint() -> Style {
    Style::default().fg(MUTED_GRAY)
}
