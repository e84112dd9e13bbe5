use thiserror::Error;

use crate::conversation::ConversationId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown conversation: {0}")]
    UnknownConversation(ConversationId),
}

pub type Result<T> = std::result::Result<T, StoreError>;
