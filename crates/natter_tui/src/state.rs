//! TUI display state: conversation projections, input buffer, scroll.
//!
//! [TuiState] is a projection of the controller's event stream, never the
//! source of truth. The sidebar is the order of `conversations`; the message
//! pane shows the view whose id matches `active`.

use natter_core::{ConversationId, Message};

/// One conversation as the sidebar and message pane see it.
#[derive(Debug, Clone)]
pub struct ConversationView {
    pub id: ConversationId,
    pub title: String,
    pub messages: Vec<Message>,
}

/// The live "awaiting reply" marker. At most one exists at a time; the
/// handle ties it to the send that raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingMarker {
    pub conversation: ConversationId,
    pub handle: u64,
}

/// Everything the view needs to render one frame.
#[derive(Debug, Default)]
pub struct TuiState {
    /// Sidebar entries, most recently active first.
    pub conversations: Vec<ConversationView>,
    /// Which view the message pane shows. None only before the controller
    /// announces the first conversation.
    pub active: Option<ConversationId>,
    /// Composer content. May contain newlines (Shift+Enter).
    pub input_buffer: String,
    /// Byte offset of the cursor within `input_buffer`; always on a char
    /// boundary.
    pub input_cursor: usize,
    /// Lines scrolled up from the bottom of the message pane.
    pub scroll: usize,
    /// Pin the pane to the newest content until the user scrolls up.
    pub auto_scroll: bool,
    pub typing: Option<TypingMarker>,
    pub needs_redraw: bool,
    /// Incremented per draw; drives the typing-indicator animation.
    pub frame_count: u64,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            auto_scroll: true,
            needs_redraw: true,
            ..Self::default()
        }
    }

    /// A new conversation exists: head of the sidebar, shown in the pane.
    pub fn open_conversation(&mut self, id: ConversationId, title: String) {
        self.conversations.insert(
            0,
            ConversationView {
                id: id.clone(),
                title,
                messages: Vec::new(),
            },
        );
        self.active = Some(id);
        self.scroll = 0;
        self.auto_scroll = true;
        self.needs_redraw = true;
    }

    /// Show an existing conversation and move its entry to the sidebar head.
    /// Unknown ids are ignored (the controller never announces one).
    pub fn switch_to(&mut self, id: &ConversationId) {
        let Some(pos) = self.conversations.iter().position(|v| &v.id == id) else {
            return;
        };
        let view = self.conversations.remove(pos);
        self.conversations.insert(0, view);
        self.active = Some(id.clone());
        self.scroll = 0;
        self.auto_scroll = true;
        self.needs_redraw = true;
    }

    /// Append a message to the conversation it belongs to, which is not
    /// necessarily the one on screen.
    pub fn push_message(&mut self, conversation: &ConversationId, message: Message) {
        let Some(view) = self
            .conversations
            .iter_mut()
            .find(|v| &v.id == conversation)
        else {
            return;
        };
        view.messages.push(message);
        if self.auto_scroll {
            self.scroll = 0;
        }
        self.needs_redraw = true;
    }

    /// Raise the awaiting-reply marker; replaces any previous marker.
    pub fn show_typing(&mut self, conversation: ConversationId, handle: u64) {
        self.typing = Some(TypingMarker {
            conversation,
            handle,
        });
        if self.auto_scroll {
            self.scroll = 0;
        }
        self.needs_redraw = true;
    }

    /// Remove the marker raised with `handle`. Hiding an already-removed
    /// handle is a no-op, so stale stops are harmless.
    pub fn hide_typing(&mut self, handle: u64) {
        if self.typing.as_ref().map(|m| m.handle) == Some(handle) {
            self.typing = None;
            self.needs_redraw = true;
        }
    }

    pub fn active_view(&self) -> Option<&ConversationView> {
        let id = self.active.as_ref()?;
        self.conversations.iter().find(|v| &v.id == id)
    }

    /// True when the pane should show the placeholder instead of messages.
    /// The placeholder and the message list never appear together.
    pub fn shows_empty_state(&self) -> bool {
        self.active_view().is_some_and(|v| v.messages.is_empty())
    }

    /// True when the awaiting-reply marker belongs to the shown conversation.
    pub fn typing_visible(&self) -> bool {
        match (&self.typing, &self.active) {
            (Some(marker), Some(active)) => &marker.conversation == active,
            _ => false,
        }
    }

    /// Sidebar entry after the active one, wrapping; None with fewer than
    /// two conversations.
    pub fn next_conversation(&self) -> Option<ConversationId> {
        if self.conversations.len() < 2 {
            return None;
        }
        let active = self.active.as_ref()?;
        let pos = self.conversations.iter().position(|v| &v.id == active)?;
        let next = (pos + 1) % self.conversations.len();
        Some(self.conversations[next].id.clone())
    }

    /// Insert at the cursor. Newlines are ordinary characters here; the
    /// composer is multi-line.
    pub fn input_insert(&mut self, c: char) {
        self.input_buffer.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
        self.needs_redraw = true;
    }

    /// Delete the character before the cursor.
    pub fn input_backspace(&mut self) {
        let Some(start) = self.prev_char_boundary() else {
            return;
        };
        self.input_buffer.drain(start..self.input_cursor);
        self.input_cursor = start;
        self.needs_redraw = true;
    }

    /// Delete the character under the cursor (forward delete).
    pub fn input_delete(&mut self) {
        let Some(end) = self.next_char_boundary() else {
            return;
        };
        self.input_buffer.drain(self.input_cursor..end);
        self.needs_redraw = true;
    }

    pub fn input_cursor_left(&mut self) {
        if let Some(start) = self.prev_char_boundary() {
            self.input_cursor = start;
            self.needs_redraw = true;
        }
    }

    pub fn input_cursor_right(&mut self) {
        if let Some(end) = self.next_char_boundary() {
            self.input_cursor = end;
            self.needs_redraw = true;
        }
    }

    pub fn input_cursor_home(&mut self) {
        self.input_cursor = 0;
        self.needs_redraw = true;
    }

    pub fn input_cursor_end(&mut self) {
        self.input_cursor = self.input_buffer.len();
        self.needs_redraw = true;
    }

    /// Take the whole composer content and reset it (submit).
    pub fn input_take(&mut self) -> String {
        self.input_cursor = 0;
        self.needs_redraw = true;
        std::mem::take(&mut self.input_buffer)
    }

    pub fn scroll_up(&mut self, delta: usize) {
        self.auto_scroll = false;
        self.scroll = self.scroll.saturating_add(delta);
        self.needs_redraw = true;
    }

    pub fn scroll_down(&mut self, delta: usize) {
        self.scroll = self.scroll.saturating_sub(delta);
        if self.scroll == 0 {
            self.auto_scroll = true;
        }
        self.needs_redraw = true;
    }

    /// Start byte of the char before the cursor, or None at the left edge.
    fn prev_char_boundary(&self) -> Option<usize> {
        self.input_buffer[..self.input_cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    /// End byte of the char under the cursor, or None at the right edge.
    fn next_char_boundary(&self) -> Option<usize> {
        self.input_buffer[self.input_cursor..]
            .chars()
            .next()
            .map(|c| self.input_cursor + c.len_utf8())
    }
}
