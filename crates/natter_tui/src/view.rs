//! Compose one frame: sidebar, message pane, composer, hint line.

use natter_core::Sender;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::layouts::{
    active_entry_style, border_style, entry_style, muted_style, screen_splits, text_style,
    MAX_INPUT_LINES,
};
use crate::messages::{
    bot_message_lines, empty_state_lines, typing_indicator_line, user_message_lines,
    MESSAGE_SPACING,
};
use crate::state::TuiState;
use crate::utils::{input_height, scroll_window, truncate_ellipsis};

const HINTS: &str =
    "Enter send · Shift+Enter newline · Ctrl+N new chat · Tab switch · Ctrl+C quit";

/// Cursor glyph drawn inside the composer.
const CURSOR: &str = "▌";

pub fn draw(frame: &mut Frame, state: &TuiState) {
    let composer_lines = input_height(&state.input_buffer, MAX_INPUT_LINES);
    let splits = screen_splits(frame.area(), composer_lines);

    draw_sidebar(frame, state, splits.sidebar);
    draw_chat(frame, state, splits.chat);
    draw_input(frame, state, splits.input);
    draw_hints(frame, splits.status);
}

fn draw_sidebar(frame: &mut Frame, state: &TuiState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Chats");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut lines = Vec::new();
    for view in &state.conversations {
        let is_active = state.active.as_ref() == Some(&view.id);
        let marker = if is_active { "▌ " } else { "  " };
        let style = if is_active {
            active_entry_style()
        } else {
            entry_style()
        };
        let title = truncate_ellipsis(&view.title, inner.width.saturating_sub(2) as usize);
        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), style),
            Span::styled(title, style),
        ]));
    }
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

/// Build the message-pane lines for the shown conversation: either the
/// placeholder (zero messages) or one block per message in stored order,
/// plus the typing marker while its reply pends.
pub(crate) fn chat_lines(state: &TuiState, width: usize) -> Vec<Line<'static>> {
    let Some(view) = state.active_view() else {
        return Vec::new();
    };

    if view.messages.is_empty() && !state.typing_visible() {
        return empty_state_lines(&view.title);
    }

    let mut lines = Vec::new();
    for message in &view.messages {
        let rendered = match message.sender {
            Sender::User => user_message_lines(message, width),
            Sender::Bot => bot_message_lines(message, width),
        };
        lines.extend(rendered);
        for _ in 0..MESSAGE_SPACING {
            lines.push(Line::from(""));
        }
    }
    if state.typing_visible() {
        lines.push(typing_indicator_line(state.frame_count));
    } else if !lines.is_empty() {
        // drop the trailing spacer so the last message hugs the bottom
        lines.pop();
    }
    lines
}

fn draw_chat(frame: &mut Frame, state: &TuiState, area: Rect) {
    let title = state
        .active_view()
        .map(|v| v.title.clone())
        .unwrap_or_else(|| "natter".to_string());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let lines = chat_lines(state, inner.width as usize);
    let (start, end) = scroll_window(lines.len(), inner.height as usize, state.scroll);
    let visible: Vec<Line> = lines[start..end].to_vec();
    frame.render_widget(Paragraph::new(Text::from(visible)), inner);
}

fn draw_input(frame: &mut Frame, state: &TuiState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if state.input_buffer.is_empty() {
        let placeholder = Line::from(vec![
            Span::styled(CURSOR.to_string(), text_style()),
            Span::styled("Message".to_string(), muted_style()),
        ]);
        frame.render_widget(Paragraph::new(placeholder), inner);
        return;
    }

    // cursor sits on a char boundary, so this insert is safe
    let mut content = state.input_buffer.clone();
    content.insert_str(state.input_cursor.min(content.len()), CURSOR);
    let lines: Vec<Line> = content
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), text_style())))
        .collect();
    let skip = lines.len().saturating_sub(inner.height as usize);
    frame.render_widget(
        Paragraph::new(Text::from(lines[skip..].to_vec())),
        inner,
    );
}

fn draw_hints(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(HINTS.to_string(), muted_style()))),
        area,
    );
}
