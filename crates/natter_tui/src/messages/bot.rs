//! Rendering for replies from the service.

use natter_core::Message;
use ratatui::text::{Line, Span};

use crate::layouts::{bot_accent_style, muted_style, text_style};
use crate::utils::wrap_lines;

use super::user::time_label;

/// Indicator before a reply.
pub const BOT_INDICATOR: &str = "▸";

const LEFT_BORDER: &str = "│ ";
const CONTINUATION_INDENT: &str = "  ";

pub fn bot_message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
    let indent = LEFT_BORDER.len() + CONTINUATION_INDENT.len();
    let wrap_width = width.saturating_sub(indent).max(1);
    let wrapped = wrap_lines(&message.text, wrap_width);

    let border = Span::styled(LEFT_BORDER.to_string(), muted_style());
    let mut lines = Vec::with_capacity(wrapped.len());

    let mut first = vec![
        border.clone(),
        Span::styled(BOT_INDICATOR.to_string(), bot_accent_style()),
        Span::raw(" "),
        Span::styled(format!("{} ", time_label(message)), muted_style()),
    ];
    if let Some(text) = wrapped.first() {
        first.push(Span::styled(text.clone(), text_style()));
    }
    lines.push(Line::from(first));

    for segment in wrapped.iter().skip(1) {
        lines.push(Line::from(vec![
            border.clone(),
            Span::raw(CONTINUATION_INDENT),
            Span::styled(segment.clone(), text_style()),
        ]));
    }
    lines
}
