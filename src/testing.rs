//! Test doubles shared by the module tests.

use async_lock::Mutex;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;

use crate::client::InteractionClient;
use crate::error::TransportError;
use crate::http::{ApiRequest, HttpTransport};
use crate::session::SessionHandle;

/// Records every request and answers from a queue of canned responses.
/// An empty queue answers `null`, like a 204.
#[derive(Default)]
pub(crate) struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) async fn respond(&self, response: Result<Value, TransportError>) {
        self.responses.lock().await.push_back(response);
    }

    pub(crate) async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn request(&self, request: ApiRequest) -> Result<Value, TransportError> {
        self.requests.lock().await.push(request);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }
}

/// A client wired to a fresh mock, with session id `sess-1`.
pub(crate) fn client() -> (InteractionClient, Arc<MockTransport>) {
    let transport = MockTransport::new();
    let client = InteractionClient::new(transport.clone())
        .with_session(Arc::new(SessionHandle::with_id("sess-1")));
    (client, transport)
}

/// A guild message from application `900` with one button row and one
/// select row.
pub(crate) fn message_json(flags: u64) -> Value {
    json!({
        "id": "300",
        "channel_id": "200",
        "guild_id": "100",
        "author": {"id": "900", "username": "helper", "bot": true},
        "content": "Choose wisely",
        "timestamp": "2021-06-01T12:00:00+00:00",
        "flags": flags,
        "components": [
            {
                "type": 1,
                "components": [
                    {"type": 2, "style": 3, "label": "Yes", "custom_id": "yes"},
                    {"type": 2, "style": 4, "label": "No", "custom_id": "no", "disabled": true},
                    {"type": 2, "style": 5, "label": "Docs", "url": "https://docs.rs"}
                ]
            },
            {
                "type": 1,
                "components": [
                    {
                        "type": 3,
                        "custom_id": "lang",
                        "placeholder": "Language",
                        "min_values": 1,
                        "max_values": 1,
                        "options": [
                            {"label": "Rust", "value": "rust"},
                            {"label": "Go", "value": "go"}
                        ]
                    }
                ]
            }
        ]
    })
}
