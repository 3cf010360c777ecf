use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::debug;

use super::model::{DailyNotification, Notice};

/// Client for the external notification service that owns notices.
#[derive(Clone)]
pub struct NotificationClient {
    client: reqwest::Client,
    base_url: String,
}

impl NotificationClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Store a notice. Only a plain 200 counts as registered.
    pub async fn register(&self, notice: &Notice) -> Result<()> {
        let url = format!("{}/api/v1/notification", self.base_url);
        debug!("Registering notice for post {} at {}", notice.post_id, url);

        let response = self
            .client
            .post(&url)
            .json(notice)
            .send()
            .await
            .context("Failed to send notice to notification service")?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Notification service error ({}): {}", status, error_body);
        }

        Ok(())
    }

    /// Whether the service knows this user. Only an explicit 404 means no.
    pub async fn user_exists(&self, user_id: &str) -> Result<bool> {
        let url = format!("{}/api/v1/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("userId", user_id)
            .send()
            .await
            .context("Failed to query notification service user")?;

        Ok(response.status() != StatusCode::NOT_FOUND)
    }

    /// Notices of `user_id` that are due today.
    pub async fn today(&self, user_id: &str) -> Result<Vec<DailyNotification>> {
        let url = format!("{}/api/v1/notification/today", self.base_url);
        debug!("Fetching today's notices for {} from {}", user_id, url);

        let response = self
            .client
            .get(&url)
            .header("userId", user_id)
            .send()
            .await
            .context("Failed to query today's notifications")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Notification service error ({}): {}", status, error_body);
        }

        let list: Option<Vec<DailyNotification>> = response
            .json()
            .await
            .context("Failed to parse today's notifications")?;
        Ok(list.unwrap_or_default())
    }
}
