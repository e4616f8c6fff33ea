//! Fake transport shared by the unit tests of every layer that talks to the API.

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use url::Url;

use super::{BoxFuture, HttpMethod, HttpRequest, HttpResponse, HttpTransport, TelerivetClient};
use crate::domain::ApiKey;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub api_key: String,
}

#[derive(Debug, Default)]
struct FakeTransportState {
    requests: Vec<RecordedRequest>,
    responses: VecDeque<(u16, String)>,
}

/// Records every request and replays queued responses in order.
///
/// A request arriving with an empty queue fails with a transport error.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, status: u16, body: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        state.responses.push_back((status, body.into()));
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push(status, body.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

impl HttpTransport for FakeTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.requests.push(RecordedRequest {
                method: request.method,
                path: request.url.path().to_owned(),
                query: request.url.query_pairs().into_owned().collect(),
                body: request.body,
                api_key: request.api_key.as_str().to_owned(),
            });
            let (status, body) = state
                .responses
                .pop_front()
                .ok_or("no queued response")?;
            Ok(HttpResponse { status, body })
        })
    }
}

pub(crate) fn fake_client(transport: &FakeTransport) -> TelerivetClient {
    TelerivetClient {
        api_key: ApiKey::new("test_key").unwrap(),
        base_url: Url::parse("https://example.invalid/v1").unwrap(),
        http: Arc::new(transport.clone()),
    }
}
