use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use reqwest::multipart::{Form, Part};
use serde_json::json;
use tracing::debug;

use super::api::{ChannelNames, HostApi};
use super::model::{NewPost, Post, User};

#[derive(Debug, Deserialize)]
struct Channel {
    team_id: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct Team {
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FileUploadResponse {
    #[serde(default)]
    file_infos: Vec<FileInfo>,
}

/// [`HostApi`] over the host's v4 REST API, authenticated as the bot account.
pub struct MattermostApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
    bot_user_id: String,
}

impl MattermostApi {
    pub fn new(site_url: &str, token: &str, bot_user_id: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: site_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            bot_user_id: bot_user_id.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v4{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("Failed to reach host API: {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Host API error on {} ({}): {}", path, status, error_body);
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse host API response from {}", path))
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach host API: {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Host API error on {} ({}): {}", path, status, error_body);
        }

        Ok(response)
    }
}

#[async_trait]
impl HostApi for MattermostApi {
    async fn get_post(&self, post_id: &str) -> Result<Post> {
        self.get_json(&format!("/posts/{}", post_id)).await
    }

    async fn get_user(&self, user_id: &str) -> Result<User> {
        self.get_json(&format!("/users/{}", user_id)).await
    }

    async fn channel_names(&self, channel_id: &str) -> Result<ChannelNames> {
        let channel: Channel = self.get_json(&format!("/channels/{}", channel_id)).await?;
        let team: Team = self.get_json(&format!("/teams/{}", channel.team_id)).await?;
        Ok(ChannelNames {
            team: team.display_name,
            channel: channel.display_name,
        })
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        self.post_json("/posts", &post)
            .await?
            .json()
            .await
            .context("Failed to parse created post")
    }

    async fn send_ephemeral_post(&self, user_id: &str, post: NewPost) -> Result<()> {
        self.post_json(
            "/posts/ephemeral",
            &json!({ "user_id": user_id, "post": post }),
        )
        .await?;
        Ok(())
    }

    async fn upload_file(&self, channel_id: &str, file_name: &str, data: Vec<u8>) -> Result<String> {
        let url = self.url("/files");
        debug!("Uploading {} ({} bytes) to channel {}", file_name, data.len(), channel_id);

        let form = Form::new()
            .text("channel_id", channel_id.to_string())
            .part("files", Part::bytes(data).file_name(file_name.to_string()));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Failed to reach host API: {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Host API error on /files ({}): {}", status, error_body);
        }

        let uploaded: FileUploadResponse = response
            .json()
            .await
            .context("Failed to parse file upload response")?;
        uploaded
            .file_infos
            .into_iter()
            .next()
            .map(|info| info.id)
            .with_context(|| format!("Host returned no file info for {}", file_name))
    }

    async fn add_reaction(&self, post_id: &str, emoji_name: &str) -> Result<()> {
        self.post_json(
            "/reactions",
            &json!({
                "user_id": self.bot_user_id,
                "post_id": post_id,
                "emoji_name": emoji_name,
            }),
        )
        .await?;
        Ok(())
    }
}
