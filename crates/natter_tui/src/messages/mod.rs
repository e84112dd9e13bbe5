//! Per-kind message rendering: user text, bot replies, the typing marker,
//! and the placeholder for conversations with no messages yet.

mod bot;
mod typing;
mod user;

pub use bot::bot_message_lines;
pub use typing::typing_indicator_line;
pub use user::user_message_lines;

use ratatui::text::{Line, Span};

use crate::layouts::muted_style;

/// Placeholder shown when (and only when) the shown conversation has zero
/// messages. Mutually exclusive with the message list.
pub fn empty_state_lines(title: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("{} is empty.", title),
            muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Type a message below and press Enter to send it.".to_string(),
            muted_style(),
        )),
    ]
}

/// Blank lines between rendered messages.
pub const MESSAGE_SPACING: usize = 1;
