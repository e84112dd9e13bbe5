//! natter_runtime: owns the conversation store and serves user commands.
//!
//! The [SessionController] task is the only writer of session state: it
//! dispatches [natter_core::ChatCommand]s, runs the send pipeline against a
//! [natter_client::ReplyService], and emits [natter_core::ChatEvent]s for the
//! rendering surface to project.

pub mod config;
pub mod controller;
pub mod error;

pub use config::{RuntimeConfig, DEFAULT_REPLY_URL};
pub use controller::{SessionController, FALLBACK_REPLY};
pub use error::{Result, RuntimeError};
