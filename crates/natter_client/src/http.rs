//! HTTP implementation of [ReplyService].

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReplyError, Result};
use crate::service::ReplyService;

#[derive(Debug, Serialize)]
struct ReplyRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ReplyResponse {
    reply: Option<String>,
}

/// Reply client speaking the service's JSON exchange:
/// `POST <endpoint>` with `{"message": ...}`, success body `{"reply": ...}`.
pub struct HttpReplyClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpReplyClient {
    /// Build a client for `endpoint` with a whole-request timeout. The
    /// timeout here is a transport backstop; callers own the user-facing
    /// deadline.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReplyService for HttpReplyClient {
    async fn reply(&self, message: &str) -> Result<String> {
        debug!(endpoint = %self.endpoint, chars = message.len(), "sending reply request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ReplyRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReplyError::Status { status });
        }

        let body: ReplyResponse = response.json().await?;
        body.reply.ok_or(ReplyError::MissingReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> HttpReplyClient {
        HttpReplyClient::new(format!("{}/chat", server.url()), Duration::from_secs(5))
            .expect("client builds")
    }

    #[tokio::test]
    async fn posts_message_and_returns_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat")
            .match_body(Matcher::Json(serde_json::json!({"message": "hello"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"reply":"hi there"}"#)
            .create_async()
            .await;

        let reply = client_for(&server).reply("hello").await.unwrap();
        assert_eq!(reply, "hi there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = client_for(&server).reply("hello").await.unwrap_err();
        assert!(matches!(
            err,
            ReplyError::Status { status } if status.as_u16() == 500
        ));
    }

    #[tokio::test]
    async fn body_without_reply_field_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"answer":"nope"}"#)
            .create_async()
            .await;

        let err = client_for(&server).reply("hello").await.unwrap_err();
        assert!(matches!(err, ReplyError::MissingReply));
    }

    #[tokio::test]
    async fn unparseable_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json at all")
            .create_async()
            .await;

        let err = client_for(&server).reply("hello").await.unwrap_err();
        assert!(matches!(err, ReplyError::Http(_)));
    }

    #[tokio::test]
    async fn extra_fields_in_body_are_tolerated() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"reply":"ok","model":"demo","latency_ms":12}"#)
            .create_async()
            .await;

        let reply = client_for(&server).reply("hello").await.unwrap();
        assert_eq!(reply, "ok");
    }
}
