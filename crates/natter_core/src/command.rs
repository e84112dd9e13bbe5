use crate::conversation::ConversationId;

/// What the rendering surface asks the controller to do. One variant per
/// user action, dispatched over a channel so ordering is explicit.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Create a conversation and make it active.
    NewConversation,

    /// Make an existing conversation active.
    SwitchTo(ConversationId),

    /// Run the send pipeline with raw input text (trimming happens there).
    Send(String),
}
