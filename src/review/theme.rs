//! Colors and styles for the review screen

use ratatui::style::{Color, Modifier, Style};

// ═══════════════════════════════════════════════════════════════════════════════
// Core Palette
// ═══════════════════════════════════════════════════════════════════════════════

/// Electric Purple #e135ff - titles, flipped card border
pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255);

/// Neon Cyan #80ffea - focus, interactions
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234);

/// Coral #ff6ac1 - progress counter
pub const CORAL: Color = Color::Rgb(255, 106, 193);

/// Electric Yellow #f1fa8c - definitions
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140);

/// Error Red #ff6363
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99);

/// Highlighted/selected background
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54);

/// Primary text - soft white
pub const TEXT_PRIMARY: Color = Color::Rgb(248, 248, 242);

/// Secondary/dimmed text
pub const TEXT_DIM: Color = Color::Rgb(98, 114, 164);

/// Muted text for borders and less important elements
pub const TEXT_MUTED: Color = Color::Rgb(68, 71, 90);

// ═══════════════════════════════════════════════════════════════════════════════
// Semantic Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn term() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn definition() -> Style {
    Style::default().fg(ELECTRIC_YELLOW)
}

pub fn progress() -> Style {
    Style::default().fg(CORAL).add_modifier(Modifier::BOLD)
}

/// Border of the card panel; a flipped card reads as pressed
pub fn card_border(focused: bool, flipped: bool) -> Style {
    let style = if focused {
        Style::default().fg(NEON_CYAN)
    } else {
        Style::default().fg(TEXT_MUTED)
    };
    if flipped {
        style.fg(ELECTRIC_PURPLE).add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Style for focused panel border
pub fn focused_border() -> Style {
    Style::default().fg(NEON_CYAN)
}

/// Style for unfocused panel border
pub fn unfocused_border() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Button label, highlighted while focused
pub fn button(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(BG_HIGHLIGHT)
            .fg(NEON_CYAN)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}

/// Style for dimmed/secondary text
pub fn dimmed() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Style for error messages
pub fn error() -> Style {
    Style::default().fg(ERROR_RED)
}

/// Title shown in the header bar
pub fn review_title() -> &'static str {
    "◆ flashdeck"
}
