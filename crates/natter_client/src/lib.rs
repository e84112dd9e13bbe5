//! natter_client: the outbound side of a send. One request, one reply.
//!
//! [ReplyService] is the seam the controller (and tests) program against;
//! [HttpReplyClient] is the real implementation speaking
//! `POST {"message": ...}` / `{"reply": ...}` JSON.

pub mod error;
pub mod http;
pub mod service;

pub use error::{ReplyError, Result};
pub use http::HttpReplyClient;
pub use service::ReplyService;
