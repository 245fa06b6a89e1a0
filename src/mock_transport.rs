//! This module provides a scripted transport, so that pages can be tested without a server
#![cfg(any(test, feature = "mock_transport"))]

use std::collections::VecDeque;
use std::error::Error;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;
use url::Url;

use crate::client::RawResponse;
use crate::traits::Transport;
use crate::utils::lock;

/// A request that went through a [`MockTransport`]
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: Url,
    pub form: Vec<(String, String)>,
}

enum Reply {
    Answer(RawResponse),
    Unreachable,
}

struct ScriptedReply {
    reply: Reply,
    /// If set, the reply is held back until the matching sender is used (or dropped)
    gate: Option<oneshot::Receiver<()>>,
}

/// A [`Transport`] that answers requests with pre-recorded replies, in the order the requests are sent.
///
/// When no reply is left, requests fail as if the server were unreachable.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, reply: Reply, gate: Option<oneshot::Receiver<()>>) {
        lock(&self.replies).push_back(ScriptedReply { reply, gate });
    }

    /// Queue a JSON answer
    pub fn push_json(&self, status: u16, body: Value) {
        self.push(Reply::Answer(RawResponse::json(status, &body)), None);
    }

    /// Queue an arbitrary answer
    pub fn push_raw(&self, response: RawResponse) {
        self.push(Reply::Answer(response), None);
    }

    /// Queue a connection failure
    pub fn push_unreachable(&self) {
        self.push(Reply::Unreachable, None);
    }

    /// Queue a JSON answer that is only delivered once the returned sender is used
    pub fn push_gated_json(&self, status: u16, body: Value) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        self.push(Reply::Answer(RawResponse::json(status, &body)), Some(receiver));
        sender
    }

    /// All the requests that have been sent so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    async fn answer(&self, request: RecordedRequest) -> Result<RawResponse, Box<dyn Error + Send + Sync>> {
        log::debug!("Mock transport: {} {}", request.method, request.url);
        let scripted = {
            lock(&self.requests).push(request);
            lock(&self.replies).pop_front()
        };

        let scripted = match scripted {
            None => return Err("Mock transport has no reply left".into()),
            Some(s) => s,
        };
        if let Some(gate) = scripted.gate {
            // A dropped sender releases the reply as well
            let _ = gate.await;
        }
        match scripted.reply {
            Reply::Answer(response) => Ok(response),
            Reply::Unreachable => Err("Mocked connection failure".into()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: Url) -> Result<RawResponse, Box<dyn Error + Send + Sync>> {
        self.answer(RecordedRequest { method: "GET", url, form: Vec::new() }).await
    }

    async fn post_form(&self, url: Url, form: Vec<(String, String)>) -> Result<RawResponse, Box<dyn Error + Send + Sync>> {
        self.answer(RecordedRequest { method: "POST", url, form }).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replies_in_order() {
        let mock = MockTransport::new();
        mock.push_json(200, json!({"a": 1}));
        mock.push_unreachable();

        let url: Url = "http://calendar.test/get-task?id=1".parse().unwrap();
        let first = mock.get(url.clone()).await.unwrap();
        assert_eq!(first.body, r#"{"a":1}"#);
        assert!(mock.get(url.clone()).await.is_err());
        assert!(mock.get(url).await.is_err());
        assert_eq!(mock.request_count(), 3);
    }
}
