use reqwest::StatusCode;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::notice::NoticeRequest;

/// The only way a notice request can fail: the network call errored or the
/// plugin server answered with a non-success status.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("notice request to {url} failed: {reason}")]
    RequestFailed {
        url: String,
        status: Option<StatusCode>,
        reason: String,
    },
}

/// What happened to one notice request. Never surfaced to the user.
#[derive(Debug)]
pub enum SendOutcome {
    Delivered { status: StatusCode },
    Failed(SendError),
}

impl SendOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SendOutcome::Delivered { .. })
    }
}

/// Fire-and-forget sender for create-notice-with-button requests.
#[derive(Clone)]
pub struct NoticeRequestSender {
    client: reqwest::Client,
    runtime: Handle,
}

impl NoticeRequestSender {
    pub fn new(runtime: Handle) -> Self {
        Self {
            client: reqwest::Client::new(),
            runtime,
        }
    }

    /// Issue exactly one POST for `request`.
    ///
    /// Failures are logged and returned as [`SendOutcome::Failed`]; this never
    /// retries and never propagates an error to the caller.
    pub async fn send(&self, request: &NoticeRequest) -> SendOutcome {
        match self.try_send(request).await {
            Ok(status) => {
                info!(
                    "Notice request for post {} delivered ({})",
                    request.message_id(),
                    status
                );
                SendOutcome::Delivered { status }
            }
            Err(e) => {
                warn!("{}", e);
                SendOutcome::Failed(e)
            }
        }
    }

    /// Spawn [`send`](Self::send) on the runtime and return immediately.
    ///
    /// Each call is independent: rapid repeated dispatches are neither
    /// deduplicated nor ordered.
    pub fn dispatch(&self, request: NoticeRequest) -> JoinHandle<SendOutcome> {
        let sender = self.clone();
        self.runtime
            .spawn(async move { sender.send(&request).await })
    }

    async fn try_send(&self, request: &NoticeRequest) -> Result<StatusCode, SendError> {
        let url = request.target_url().clone();
        debug!("Sending notice request to {}", url);

        let response = self
            .client
            .post(url.clone())
            .json(&request.body())
            .send()
            .await
            .map_err(|e| SendError::RequestFailed {
                url: url.to_string(),
                status: None,
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(SendError::RequestFailed {
                url: url.to_string(),
                status: Some(status),
                reason: format!("server responded {}: {}", status, body),
            });
        }

        debug!("Notice response body: {}", body);
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{refused_url, RecordingServer};
    use axum::http::Method;

    fn sender() -> NoticeRequestSender {
        NoticeRequestSender::new(Handle::current())
    }

    #[tokio::test]
    async fn test_send_posts_post_id_once() {
        let server = RecordingServer::start(StatusCode::OK).await;
        let request = NoticeRequest::new(server.url("/notice"), "abc123").unwrap();

        let outcome = sender().send(&request).await;

        assert!(outcome.is_delivered());
        let requests = server.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/notice");
        assert_eq!(requests[0].json(), serde_json::json!({ "post_id": "abc123" }));
        assert_eq!(requests[0].header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_client_error_is_swallowed() {
        let server = RecordingServer::start(StatusCode::NOT_FOUND).await;
        let request = NoticeRequest::new(server.url("/notice"), "abc123").unwrap();

        match sender().send(&request).await {
            SendOutcome::Failed(SendError::RequestFailed { status, .. }) => {
                assert_eq!(status, Some(StatusCode::NOT_FOUND));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        // no retry
        assert_eq!(server.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_swallowed() {
        let server = RecordingServer::start(StatusCode::INTERNAL_SERVER_ERROR).await;
        let request = NoticeRequest::new(server.url("/notice"), "abc123").unwrap();

        let outcome = sender().send(&request).await;

        assert!(!outcome.is_delivered());
        assert_eq!(server.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_network_error_is_swallowed() {
        let request = NoticeRequest::new(refused_url().await, "abc123").unwrap();

        match sender().send(&request).await {
            SendOutcome::Failed(SendError::RequestFailed { status, url, .. }) => {
                assert_eq!(status, None);
                assert!(url.ends_with("/refused"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_concurrent_dispatches_are_independent() {
        let server = RecordingServer::start(StatusCode::OK).await;
        let sender = sender();

        let first = sender.dispatch(NoticeRequest::new(server.url("/notice"), "abc123").unwrap());
        let second = sender.dispatch(NoticeRequest::new(server.url("/notice"), "abc123").unwrap());

        assert!(first.await.unwrap().is_delivered());
        assert!(second.await.unwrap().is_delivered());
        assert_eq!(server.requests().await.len(), 2);
    }
}
