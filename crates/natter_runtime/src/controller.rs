//! Session controller: command dispatch and the send pipeline.
//!
//! One task owns the [ConversationStore]; requests overlap their await in a
//! [FuturesUnordered] while every state mutation stays on this task. Each
//! send captures its target conversation id when the request is issued, so a
//! switch performed while a reply is pending cannot redirect that reply.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use natter_client::ReplyService;
use natter_core::{
    ChatCommand, ChatEvent, ConversationId, ConversationStore, Sender,
};

use crate::config::RuntimeConfig;
use crate::error::Result;

/// The one bot message users see when a round-trip fails for any reason.
pub const FALLBACK_REPLY: &str = "Server error.";

/// Releases the typing indicator when dropped, so every exit path of a send
/// (reply, failure, task teardown) stops the indicator exactly once.
struct TypingGuard {
    handle: u64,
    event_tx: mpsc::UnboundedSender<ChatEvent>,
}

impl Drop for TypingGuard {
    fn drop(&mut self) {
        let _ = self.event_tx.send(ChatEvent::typing_stopped(self.handle));
    }
}

/// What a settled round-trip hands back to the controller task.
struct SendOutcome {
    conversation: ConversationId,
    typing: TypingGuard,
    /// `None` means the exchange failed; detail is already logged.
    reply: Option<String>,
}

type PendingReply = BoxFuture<'static, SendOutcome>;

/// Owns all session state and serves [ChatCommand]s until the command
/// channel closes.
pub struct SessionController {
    store: ConversationStore,
    reply: Arc<dyn ReplyService>,
    event_tx: mpsc::UnboundedSender<ChatEvent>,
    config: RuntimeConfig,
    next_typing_handle: u64,
}

impl SessionController {
    pub fn new(
        config: RuntimeConfig,
        reply: Arc<dyn ReplyService>,
        event_tx: mpsc::UnboundedSender<ChatEvent>,
    ) -> Self {
        Self {
            store: ConversationStore::new(),
            reply,
            event_tx,
            config,
            next_typing_handle: 1,
        }
    }

    /// Read view of the session state (the TUI holds a projection instead;
    /// this is for the controller's own call sites and tests).
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Serve commands until the channel closes, then let in-flight
    /// round-trips settle so no send is left without its bot message.
    pub async fn run(&mut self, mut commands: mpsc::UnboundedReceiver<ChatCommand>) {
        if self.store.is_empty() {
            self.create_conversation();
        }

        let mut pending: FuturesUnordered<PendingReply> = FuturesUnordered::new();
        loop {
            tokio::select! {
                command = commands.recv() => {
                    match command {
                        Some(ChatCommand::NewConversation) => {
                            self.create_conversation();
                        }
                        Some(ChatCommand::SwitchTo(id)) => {
                            if let Err(err) = self.switch_to(&id) {
                                warn!(%err, "switch rejected");
                            }
                        }
                        Some(ChatCommand::Send(text)) => {
                            if let Some(round_trip) = self.begin_send(&text) {
                                pending.push(round_trip);
                            }
                        }
                        None => break,
                    }
                }
                Some(outcome) = pending.next(), if !pending.is_empty() => {
                    self.finish_send(outcome);
                }
            }
        }

        while let Some(outcome) = pending.next().await {
            self.finish_send(outcome);
        }
        info!("session controller stopped");
    }

    /// Create a conversation, make it active, and announce it.
    pub fn create_conversation(&mut self) -> ConversationId {
        let id = self.store.create_conversation();
        let title = self
            .store
            .get(&id)
            .map(|convo| convo.title.clone())
            .unwrap_or_default();
        info!(conversation = %id, title = %title, "conversation created");
        self.emit(ChatEvent::conversation_created(id.clone(), title));
        id
    }

    /// Make an existing conversation active and announce the switch.
    pub fn switch_to(&mut self, id: &ConversationId) -> Result<()> {
        self.store.set_active(id)?;
        self.emit(ChatEvent::conversation_switched(id.clone()));
        Ok(())
    }

    /// Start the send pipeline: trim, append the user message, raise the
    /// typing indicator, and hand back the round-trip future. Returns `None`
    /// when the trimmed input is empty (no request, no state change).
    fn begin_send(&mut self, text: &str) -> Option<PendingReply> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        // The reply targets whichever conversation is active right now,
        // no matter what becomes active while the request is in flight.
        let target = match self.store.active_id() {
            Some(id) => id.clone(),
            None => {
                error!("send with no active conversation");
                return None;
            }
        };

        let user_message = match self.store.append_message(&target, Sender::User, trimmed) {
            Ok(message) => message.clone(),
            Err(err) => {
                error!(%err, "user message rejected by store");
                return None;
            }
        };
        self.emit(ChatEvent::message_appended(target.clone(), user_message));

        let handle = self.next_typing_handle;
        self.next_typing_handle += 1;
        self.emit(ChatEvent::typing_started(target.clone(), handle));
        let typing = TypingGuard {
            handle,
            event_tx: self.event_tx.clone(),
        };

        let reply = Arc::clone(&self.reply);
        let deadline = self.config.request_timeout;
        let text = trimmed.to_string();
        Some(Box::pin(async move {
            let reply = match tokio::time::timeout(deadline, reply.reply(&text)).await {
                Ok(Ok(reply)) => Some(reply),
                Ok(Err(err)) => {
                    warn!(%err, "reply request failed");
                    None
                }
                Err(_) => {
                    warn!(deadline_ms = deadline.as_millis() as u64, "reply request timed out");
                    None
                }
            };
            SendOutcome {
                conversation: target,
                typing,
                reply,
            }
        }))
    }

    /// Land a settled round-trip: stop the indicator, then append exactly one
    /// bot message (the reply, or the fixed fallback) to the conversation
    /// captured when the request was issued.
    fn finish_send(&mut self, outcome: SendOutcome) {
        drop(outcome.typing);

        let text = outcome.reply.unwrap_or_else(|| FALLBACK_REPLY.to_string());
        match self
            .store
            .append_message(&outcome.conversation, Sender::Bot, text)
        {
            Ok(message) => {
                let message = message.clone();
                self.emit(ChatEvent::message_appended(outcome.conversation, message));
            }
            Err(err) => error!(%err, "bot message rejected by store"),
        }
    }

    fn emit(&self, event: ChatEvent) {
        // The receiver only disappears when the UI is gone; nothing to do then.
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use natter_client::{ReplyError, Result as ClientResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    struct FixedReply(&'static str);

    #[async_trait]
    impl ReplyService for FixedReply {
        async fn reply(&self, _message: &str) -> ClientResult<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingReply;

    #[async_trait]
    impl ReplyService for FailingReply {
        async fn reply(&self, _message: &str) -> ClientResult<String> {
            Err(ReplyError::MissingReply)
        }
    }

    struct CountingReply(AtomicUsize);

    #[async_trait]
    impl ReplyService for CountingReply {
        async fn reply(&self, _message: &str) -> ClientResult<String> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok("counted".to_string())
        }
    }

    struct SlowReply;

    #[async_trait]
    impl ReplyService for SlowReply {
        async fn reply(&self, _message: &str) -> ClientResult<String> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }
    }

    /// Holds the reply until the test releases the gate.
    struct GatedReply {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl ReplyService for GatedReply {
        async fn reply(&self, _message: &str) -> ClientResult<String> {
            self.gate.notified().await;
            Ok("gated reply".to_string())
        }
    }

    fn controller_with(
        reply: Arc<dyn ReplyService>,
    ) -> (SessionController, mpsc::UnboundedReceiver<ChatEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let controller = SessionController::new(RuntimeConfig::new(), reply, event_tx);
        (controller, event_rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ChatEvent>) -> Vec<ChatEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    async fn run_commands(
        controller: &mut SessionController,
        commands: Vec<ChatCommand>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        for command in commands {
            tx.send(command).expect("receiver held");
        }
        drop(tx);
        controller.run(rx).await;
    }

    #[tokio::test]
    async fn startup_creates_the_first_conversation() {
        let (mut controller, mut event_rx) = controller_with(Arc::new(FixedReply("hi")));
        run_commands(&mut controller, Vec::new()).await;

        assert_eq!(controller.store().len(), 1);
        let active = controller.store().active().expect("active after startup");
        assert_eq!(active.title, "Chat 1");
        assert!(active.is_empty());

        let events = drain(&mut event_rx);
        assert!(matches!(
            events.first(),
            Some(ChatEvent::ConversationCreated { title, .. }) if title == "Chat 1"
        ));
    }

    #[tokio::test]
    async fn send_appends_user_then_bot() {
        let (mut controller, mut event_rx) = controller_with(Arc::new(FixedReply("hi there")));
        run_commands(&mut controller, vec![ChatCommand::Send("hello".to_string())]).await;

        let convo = controller.store().active().expect("active");
        assert_eq!(convo.len(), 2);
        assert_eq!(convo.messages[0].sender, Sender::User);
        assert_eq!(convo.messages[0].text, "hello");
        assert_eq!(convo.messages[1].sender, Sender::Bot);
        assert_eq!(convo.messages[1].text, "hi there");

        // User message precedes the typing indicator, which precedes the
        // bot message; the indicator stops before the bot message lands.
        let events = drain(&mut event_rx);
        let position = |pred: &dyn Fn(&ChatEvent) -> bool| {
            events.iter().position(|e| pred(e)).expect("event present")
        };
        let user_at = position(&|e| {
            matches!(e, ChatEvent::MessageAppended { message, .. } if message.sender == Sender::User)
        });
        let started_at = position(&|e| matches!(e, ChatEvent::TypingStarted { .. }));
        let stopped_at = position(&|e| matches!(e, ChatEvent::TypingStopped { .. }));
        let bot_at = position(&|e| {
            matches!(e, ChatEvent::MessageAppended { message, .. } if message.sender == Sender::Bot)
        });
        assert!(user_at < started_at);
        assert!(started_at < stopped_at);
        assert!(stopped_at < bot_at);
    }

    #[tokio::test]
    async fn trimmed_text_is_what_gets_stored() {
        let (mut controller, _event_rx) = controller_with(Arc::new(FixedReply("ok")));
        run_commands(
            &mut controller,
            vec![ChatCommand::Send("  hello world \n".to_string())],
        )
        .await;

        let convo = controller.store().active().expect("active");
        assert_eq!(convo.messages[0].text, "hello world");
    }

    #[tokio::test]
    async fn failed_reply_appends_the_fallback() {
        let (mut controller, _event_rx) = controller_with(Arc::new(FailingReply));
        run_commands(&mut controller, vec![ChatCommand::Send("hello".to_string())]).await;

        let convo = controller.store().active().expect("active");
        assert_eq!(convo.len(), 2);
        assert_eq!(convo.messages[1].sender, Sender::Bot);
        assert_eq!(convo.messages[1].text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn whitespace_input_changes_nothing() {
        let counting = Arc::new(CountingReply(AtomicUsize::new(0)));
        let (mut controller, mut event_rx) = controller_with(counting.clone());
        run_commands(
            &mut controller,
            vec![
                ChatCommand::Send(String::new()),
                ChatCommand::Send("   \n\t ".to_string()),
            ],
        )
        .await;

        assert!(controller.store().active().expect("active").is_empty());
        assert_eq!(counting.0.load(Ordering::SeqCst), 0);

        // Only the startup creation event; nothing from the ignored sends.
        let events = drain(&mut event_rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ChatEvent::ConversationCreated { .. }));
    }

    #[tokio::test]
    async fn deadline_expiry_resolves_to_the_fallback() {
        let (event_tx, _event_rx) = mpsc::unbounded_channel();
        let config = RuntimeConfig::new().with_request_timeout(Duration::from_millis(20));
        let mut controller = SessionController::new(config, Arc::new(SlowReply), event_tx);
        run_commands(&mut controller, vec![ChatCommand::Send("hello".to_string())]).await;

        let convo = controller.store().active().expect("active");
        assert_eq!(convo.messages[1].text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn typing_indicator_stops_on_the_failure_path_too() {
        let (mut controller, mut event_rx) = controller_with(Arc::new(FailingReply));
        run_commands(&mut controller, vec![ChatCommand::Send("hello".to_string())]).await;

        let events = drain(&mut event_rx);
        let started: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                ChatEvent::TypingStarted { handle, .. } => Some(*handle),
                _ => None,
            })
            .collect();
        let stopped: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                ChatEvent::TypingStopped { handle } => Some(*handle),
                _ => None,
            })
            .collect();
        assert_eq!(started.len(), 1);
        assert_eq!(started, stopped);
    }

    #[tokio::test]
    async fn each_send_gets_its_own_typing_handle() {
        let (mut controller, mut event_rx) = controller_with(Arc::new(FixedReply("ok")));
        run_commands(
            &mut controller,
            vec![
                ChatCommand::Send("one".to_string()),
                ChatCommand::Send("two".to_string()),
            ],
        )
        .await;

        let events = drain(&mut event_rx);
        let handles: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                ChatEvent::TypingStarted { handle, .. } => Some(*handle),
                _ => None,
            })
            .collect();
        assert_eq!(handles.len(), 2);
        assert_ne!(handles[0], handles[1]);
    }

    #[tokio::test]
    async fn switching_rejects_unknown_ids() {
        let (mut controller, mut event_rx) = controller_with(Arc::new(FixedReply("ok")));
        run_commands(
            &mut controller,
            vec![ChatCommand::SwitchTo(ConversationId::new())],
        )
        .await;

        // The startup conversation stays active; no switch event went out.
        let events = drain(&mut event_rx);
        assert!(events
            .iter()
            .all(|e| !matches!(e, ChatEvent::ConversationSwitched { .. })));
    }

    #[tokio::test]
    async fn reply_lands_in_the_conversation_that_sent_it() {
        let gate = Arc::new(Notify::new());
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let mut controller = SessionController::new(
            RuntimeConfig::new(),
            Arc::new(GatedReply { gate: gate.clone() }),
            event_tx,
        );
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            controller.run(cmd_rx).await;
            controller
        });

        // Startup conversation announced; remember its id.
        let origin = loop {
            match event_rx.recv().await.expect("event stream open") {
                ChatEvent::ConversationCreated { id, .. } => break id,
                _ => continue,
            }
        };

        cmd_tx
            .send(ChatCommand::Send("hello".to_string()))
            .expect("controller running");

        // Wait until the request is in flight.
        loop {
            match event_rx.recv().await.expect("event stream open") {
                ChatEvent::TypingStarted { .. } => break,
                _ => continue,
            }
        }

        // Switch away while the reply is pending.
        cmd_tx
            .send(ChatCommand::NewConversation)
            .expect("controller running");
        let second = loop {
            match event_rx.recv().await.expect("event stream open") {
                ChatEvent::ConversationCreated { id, .. } => break id,
                _ => continue,
            }
        };

        gate.notify_one();
        drop(cmd_tx);
        let controller = task.await.expect("controller task");

        let origin_convo = controller.store().get(&origin).expect("origin exists");
        assert_eq!(origin_convo.len(), 2);
        assert_eq!(origin_convo.messages[1].text, "gated reply");
        assert!(controller.store().get(&second).expect("second exists").is_empty());
        assert_eq!(controller.store().active_id(), Some(&second));
    }
}
