//! Shared test helpers: an in-memory transport and config builders.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use confluence_api::clients::{HttpError, HttpRequest, HttpResponse, HttpResponseError, Transport};
use confluence_api::{AccessToken, ApiToken, Confluence, ConfluenceConfig, HostUrl};
use serde_json::{json, Value};

pub const HOST: &str = "https://example.atlassian.net/wiki";

/// Records every request and answers from a script.
///
/// When the script runs out, an empty collection page is returned.
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, code: u16, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(code, HashMap::new(), body)));
    }

    pub fn push_err(&self, error: HttpError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn push_status_error(&self, code: u16, body: Value) {
        self.push_err(HttpError::Response(HttpResponseError {
            code,
            message: format!("Request failed with status code {code}"),
            body,
        }));
    }

    /// Queues a collection page with `size` items numbered from `first`.
    pub fn push_page(&self, first: usize, size: usize) {
        let results: Vec<Value> = (first..first + size).map(|i| json!({"id": i.to_string()})).collect();
        self.push_ok(
            200,
            json!({"results": results, "start": first, "limit": size, "size": size, "_links": {}}),
        );
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        self.requests.lock().unwrap().push(request);
        tokio::time::sleep(Duration::from_millis(1)).await;

        let next = self.responses.lock().unwrap().pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        next.unwrap_or_else(|| {
            Ok(HttpResponse::new(
                200,
                HashMap::new(),
                json!({"results": [], "size": 0}),
            ))
        })
    }
}

pub fn basic_config() -> ConfluenceConfig {
    ConfluenceConfig::builder()
        .host(HostUrl::new(HOST).unwrap())
        .username("alice")
        .api_token(ApiToken::new("secret").unwrap())
        .build()
        .unwrap()
}

pub fn bearer_config() -> ConfluenceConfig {
    ConfluenceConfig::builder()
        .host(HostUrl::new(HOST).unwrap())
        .access_token(AccessToken::new("tok").unwrap())
        .build()
        .unwrap()
}

pub fn config_with_page_size(page_size: u32) -> ConfluenceConfig {
    ConfluenceConfig::builder()
        .host(HostUrl::new(HOST).unwrap())
        .username("alice")
        .api_token(ApiToken::new("secret").unwrap())
        .page_size(page_size)
        .build()
        .unwrap()
}

pub fn client(config: ConfluenceConfig, transport: &Arc<MockTransport>) -> Confluence {
    Confluence::with_transport(config, transport.clone())
}

/// Splits a URL into its path and decoded query pairs.
pub fn split_url(url: &str) -> (String, HashMap<String, String>) {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let params = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| {
            (
                urlencoding::decode(k).unwrap().into_owned(),
                urlencoding::decode(v).unwrap().into_owned(),
            )
        })
        .collect();
    (path.to_string(), params)
}
