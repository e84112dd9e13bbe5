use serde::{Deserialize, Serialize};

use crate::conversation::{ConversationId, Message};

/// What the controller tells the rendering surface. The surface keeps a
/// projection of the store by applying these in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A conversation was created; it is now active and heads the sidebar.
    ConversationCreated { id: ConversationId, title: String },

    /// The active conversation changed; its sidebar entry moves to the head.
    ConversationSwitched { id: ConversationId },

    MessageAppended {
        conversation: ConversationId,
        message: Message,
    },

    /// A reply is pending for `conversation`. `handle` pairs with the
    /// matching [ChatEvent::TypingStopped].
    TypingStarted {
        conversation: ConversationId,
        handle: u64,
    },

    TypingStopped { handle: u64 },
}

impl ChatEvent {
    pub fn conversation_created(id: ConversationId, title: impl Into<String>) -> Self {
        ChatEvent::ConversationCreated {
            id,
            title: title.into(),
        }
    }

    pub fn conversation_switched(id: ConversationId) -> Self {
        ChatEvent::ConversationSwitched { id }
    }

    pub fn message_appended(conversation: ConversationId, message: Message) -> Self {
        ChatEvent::MessageAppended {
            conversation,
            message,
        }
    }

    pub fn typing_started(conversation: ConversationId, handle: u64) -> Self {
        ChatEvent::TypingStarted {
            conversation,
            handle,
        }
    }

    pub fn typing_stopped(handle: u64) -> Self {
        ChatEvent::TypingStopped { handle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_created_serializes_with_tag() {
        let event = ChatEvent::conversation_created(ConversationId::new(), "Chat 1");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"conversation_created"#));
        assert!(json.contains("Chat 1"));
    }

    #[test]
    fn typing_events_carry_the_handle() {
        let started = ChatEvent::typing_started(ConversationId::new(), 7);
        let json = serde_json::to_string(&started).unwrap();
        assert!(json.contains(r#""handle":7"#));

        let stopped = ChatEvent::typing_stopped(7);
        let json = serde_json::to_string(&stopped).unwrap();
        assert!(json.contains(r#""type":"typing_stopped"#));
    }

    #[test]
    fn message_appended_roundtrip() {
        let id = ConversationId::new();
        let event = ChatEvent::message_appended(id.clone(), Message::user("hello"));
        let json = serde_json::to_string(&event).unwrap();
        let decoded: ChatEvent = serde_json::from_str(&json).unwrap();
        match decoded {
            ChatEvent::MessageAppended {
                conversation,
                message,
            } => {
                assert_eq!(conversation, id);
                assert_eq!(message.text, "hello");
            }
            other => panic!("expected MessageAppended, got {:?}", other),
        }
    }

    #[test]
    fn all_events_roundtrip() {
        let id = ConversationId::new();
        let events = vec![
            ChatEvent::conversation_created(id.clone(), "Chat 1"),
            ChatEvent::conversation_switched(id.clone()),
            ChatEvent::message_appended(id.clone(), Message::bot("hi")),
            ChatEvent::typing_started(id, 1),
            ChatEvent::typing_stopped(1),
        ];
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let _decoded: ChatEvent = serde_json::from_str(&json).unwrap();
        }
    }
}
