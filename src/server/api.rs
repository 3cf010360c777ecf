use anyhow::Result;
use async_trait::async_trait;

use super::model::{NewPost, Post, User};

/// Team and channel display names, used to label notice attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelNames {
    pub team: String,
    pub channel: String,
}

/// Host operations the plugin server calls on behalf of the bot account.
#[async_trait]
pub trait HostApi: Send + Sync {
    async fn get_post(&self, post_id: &str) -> Result<Post>;

    async fn get_user(&self, user_id: &str) -> Result<User>;

    async fn channel_names(&self, channel_id: &str) -> Result<ChannelNames>;

    /// Create a post authored by the bot and return it with its new id.
    async fn create_post(&self, post: NewPost) -> Result<Post>;

    /// Post visible only to `user_id`.
    async fn send_ephemeral_post(&self, user_id: &str, post: NewPost) -> Result<()>;

    /// Attach `data` to `channel_id` and return the new file id.
    async fn upload_file(&self, channel_id: &str, file_name: &str, data: Vec<u8>) -> Result<String>;

    async fn add_reaction(&self, post_id: &str, emoji_name: &str) -> Result<()>;
}
