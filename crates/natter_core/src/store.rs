//! In-memory conversation store: the single source of truth for the session.
//!
//! Owns every [Conversation], the active pointer, and the sidebar order.
//! Conversations are only ever added; messages are only ever appended.

use std::collections::HashMap;

use crate::conversation::{Conversation, ConversationId, Message, Sender};
use crate::error::{Result, StoreError};

/// All conversations for one program session, with most-recently-used order.
#[derive(Debug, Default)]
pub struct ConversationStore {
    conversations: HashMap<ConversationId, Conversation>,
    /// Sidebar order: head is the most recently created or switched-to id.
    order: Vec<ConversationId>,
    /// None only before the first conversation is created.
    active: Option<ConversationId>,
    /// Drives sequential titles ("Chat 1", "Chat 2", ...). Never reused.
    counter: u64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh empty conversation, make it active, and place it at
    /// the head of the sidebar order. Returns its id.
    pub fn create_conversation(&mut self) -> ConversationId {
        self.counter += 1;
        let convo = Conversation::new(format!("Chat {}", self.counter));
        let id = convo.id.clone();
        self.conversations.insert(id.clone(), convo);
        self.order.insert(0, id.clone());
        self.active = Some(id.clone());
        id
    }

    /// Append a message to the given conversation, preserving insertion order.
    pub fn append_message(
        &mut self,
        id: &ConversationId,
        sender: Sender,
        text: impl Into<String>,
    ) -> Result<&Message> {
        let convo = self
            .conversations
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownConversation(id.clone()))?;
        convo.messages.push(Message::new(sender, text));
        // just pushed, so the vec is non-empty
        Ok(&convo.messages[convo.messages.len() - 1])
    }

    pub fn get(&self, id: &ConversationId) -> Result<&Conversation> {
        self.conversations
            .get(id)
            .ok_or_else(|| StoreError::UnknownConversation(id.clone()))
    }

    /// Make `id` the active conversation and move it to the head of the
    /// sidebar order; the relative order of the rest is untouched.
    pub fn set_active(&mut self, id: &ConversationId) -> Result<()> {
        if !self.conversations.contains_key(id) {
            return Err(StoreError::UnknownConversation(id.clone()));
        }
        self.promote(id);
        self.active = Some(id.clone());
        Ok(())
    }

    pub fn active_id(&self) -> Option<&ConversationId> {
        self.active.as_ref()
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active.as_ref().and_then(|id| self.conversations.get(id))
    }

    /// Sidebar order, most recently active first.
    pub fn order(&self) -> &[ConversationId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    fn promote(&mut self, id: &ConversationId) {
        if let Some(pos) = self.order.iter().position(|entry| entry == id) {
            let entry = self.order.remove(pos);
            self.order.insert(0, entry);
        }
    }
}
