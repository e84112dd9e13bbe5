//! Rendering for messages the user sent.
//!
//! First line: indicator + time label + text start; continuation lines get a
//! two-space indent under the same left border.

use natter_core::Message;
use ratatui::text::{Line, Span};

use crate::layouts::{muted_style, text_style, user_accent_style};
use crate::utils::wrap_lines;

/// Indicator before the user's text.
pub const USER_INDICATOR: &str = "›";

const LEFT_BORDER: &str = "┃ ";
const CONTINUATION_INDENT: &str = "  ";

/// Short local-time label for a message ("14:07").
pub(crate) fn time_label(message: &Message) -> String {
    message
        .sent_at
        .with_timezone(&chrono::Local)
        .format("%H:%M")
        .to_string()
}

pub fn user_message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
    let indent = LEFT_BORDER.len() + CONTINUATION_INDENT.len();
    let wrap_width = width.saturating_sub(indent).max(1);
    let wrapped = wrap_lines(&message.text, wrap_width);

    let border = Span::styled(LEFT_BORDER.to_string(), user_accent_style());
    let mut lines = Vec::with_capacity(wrapped.len());

    let mut first = vec![
        border.clone(),
        Span::styled(USER_INDICATOR.to_string(), user_accent_style()),
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
