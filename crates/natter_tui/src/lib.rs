//! natter-tui: terminal UI for natter.
//!
//! Display state in [state]; event projection in [runtime_events]; layout in
//! `layouts`; message rendering in `messages`; draw in [view]; the terminal
//! loop in [run]. Start with [run_tui].

pub mod layouts;
pub mod messages;
pub mod run;
pub mod runtime_events;
pub mod state;
pub mod utils;
pub mod view;

pub use run::run_tui;
pub use runtime_events::apply_chat_event;
pub use state::{ConversationView, TuiState, TypingMarker};
pub use view::draw;
