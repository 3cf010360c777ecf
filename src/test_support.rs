//! Throwaway HTTP servers for exercising outbound calls in tests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    Router,
};
use reqwest::Url;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone)]
struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    statuses: Arc<HashMap<String, StatusCode>>,
    default_status: StatusCode,
}

/// Records every request it receives and answers with a fixed status.
pub struct RecordingServer {
    base_url: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn record(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let path = uri.path().to_string();
    let status = recorder
        .statuses
        .get(&path)
        .copied()
        .unwrap_or(recorder.default_status);
    recorder.requests.lock().await.push(RecordedRequest {
        method,
        path,
        headers,
        body,
    });
    status
}

impl RecordingServer {
    pub async fn start(default_status: StatusCode) -> Self {
        Self::start_with(default_status, &[]).await
    }

    /// Per-path status overrides, falling back to `default_status`.
    pub async fn start_with(default_status: StatusCode, routes: &[(&str, StatusCode)]) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorder = Recorder {
            requests: requests.clone(),
            statuses: Arc::new(
                routes
                    .iter()
                    .map(|(path, status)| (path.to_string(), *status))
                    .collect(),
            ),
            default_status,
        };

        let app = Router::new().fallback(record).with_state(recorder);
        Self {
            base_url: serve(app).await,
            requests,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).unwrap()
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    /// Poll until at least `count` requests arrived.
    pub async fn wait_for(&self, count: usize) -> Vec<RecordedRequest> {
        for _ in 0..200 {
            let requests = self.requests().await;
            if requests.len() >= count {
                return requests;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        self.requests().await
    }
}

/// A localhost URL nothing is listening on.
pub async fn refused_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/refused")).unwrap()
}

/// Serve `app` on an ephemeral localhost port and return its base URL.
pub async fn serve(app: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}
