use reqwest::Url;
use serde::Serialize;
use thiserror::Error;

/// Reasons a notice request could not be built.
#[derive(Debug, Error, PartialEq)]
pub enum NoticeError {
    #[error("message id must not be empty")]
    EmptyMessageId,

    #[error("invalid target URL: {0}")]
    InvalidTargetUrl(String),
}

/// Wire body of the create-notice-with-button call.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NoticeBody {
    pub post_id: String,
}

/// A single "create notice from this post" request.
///
/// Built when the user picks the menu action, consumed by one send, then
/// dropped.
#[derive(Debug, Clone)]
pub struct NoticeRequest {
    target_url: Url,
    message_id: String,
}

impl NoticeRequest {
    pub fn new(target_url: Url, message_id: impl Into<String>) -> Result<Self, NoticeError> {
        let message_id = message_id.into();
        if message_id.is_empty() {
            return Err(NoticeError::EmptyMessageId);
        }
        if target_url.cannot_be_a_base() || target_url.host_str().is_none() {
            return Err(NoticeError::InvalidTargetUrl(target_url.to_string()));
        }
        Ok(Self {
            target_url,
            message_id,
        })
    }

    pub fn target_url(&self) -> &Url {
        &self.target_url
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn body(&self) -> NoticeBody {
        NoticeBody {
            post_id: self.message_id.clone(),
        }
    }
}
