//! Fixed styles for panel chrome and message text.

use ratatui::style::{Color, Modifier, Style};

/// Panel borders.
pub fn border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Primary message text.
pub fn text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Secondary text: timestamps, hints, placeholder.
pub fn muted_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Indicator color for messages the user sent.
pub fn user_accent_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Indicator color for replies from the service.
pub fn bot_accent_style() -> Style {
    Style::default().fg(Color::Green)
}

/// The awaiting-reply marker.
pub fn typing_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Sidebar entry for the shown conversation.
pub fn active_entry_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Any other sidebar entry.
pub fn entry_style() -> Style {
    Style::default().fg(Color::Gray)
}
