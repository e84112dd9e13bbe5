//! Map [natter_core::ChatEvent] to [TuiState] updates.

use natter_core::ChatEvent;

use crate::state::TuiState;

/// Apply one controller event to the display state. Events arrive in the
/// order the controller emitted them; applying them in order keeps the
/// projection consistent with the store.
pub fn apply_chat_event(state: &mut TuiState, event: ChatEvent) {
    match event {
        ChatEvent::ConversationCreated { id, title } => {
            state.open_conversation(id, title);
        }
        ChatEvent::ConversationSwitched { id } => {
            state.switch_to(&id);
        }
        ChatEvent::MessageAppended {
            conversation,
            message,
        } => {
            state.push_message(&conversation, message);
        }
        ChatEvent::TypingStarted {
            conversation,
            handle,
        } => {
            state.show_typing(conversation, handle);
        }
        ChatEvent::TypingStopped { handle } => {
            state.hide_typing(handle);
        }
    }
}
