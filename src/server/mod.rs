//! The plugin's own HTTP API.
//!
//! Receives create-notice calls from the client half, a host dialog or the web
//! editor, builds a [`Notice`], forwards it to the notification service and
//! reports back to the user with ephemeral posts. Also answers `/mbotc`.

pub mod api;
pub mod attachment;
pub mod command;
pub mod mattermost;
pub mod model;
pub mod notification;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::{FixedOffset, Utc};
use tracing::{error, info, warn};

use crate::route::{
    NOTICE_WITH_BUTTON_SUFFIX, NOTICE_WITH_COMMAND_SUFFIX, NOTICE_WITH_EDITOR_SUFFIX,
    SLASH_COMMAND_SUFFIX,
};
use api::HostApi;
use attachment::Attachment;
use model::{ButtonRequest, DialogFields, DialogSubmission, NewPost, Notice};
use notification::NotificationClient;

const REACTION_REGISTERED: &str = "ok_hand";

/// Upload limit for the editor form, files included.
const EDITOR_BODY_LIMIT: usize = 32 << 20;

pub struct ServerState {
    pub host: Arc<dyn HostApi>,
    pub notifications: NotificationClient,
    /// Linked from the login prompt
    pub client_url: String,
    /// Offset notice timestamps are written in
    pub offset: FixedOffset,
}

impl ServerState {
    async fn reply(&self, user_id: &str, channel_id: &str, message: impl Into<String>) {
        if let Err(e) = self
            .host
            .send_ephemeral_post(user_id, NewPost::text(channel_id, message))
            .await
        {
            error!("Failed to send ephemeral post to {}: {:#}", user_id, e);
        }
    }

    /// Whether the notification service knows `user_id`. Tells the user why
    /// not when it doesn't.
    async fn check_authentication(&self, user_id: &str, channel_id: &str) -> bool {
        match self.notifications.user_exists(user_id).await {
            Ok(true) => true,
            Ok(false) => {
                let message = format!(
                    "Please login first to use MBotC service.\n[Login here]({})",
                    self.client_url
                );
                self.reply(user_id, channel_id, message).await;
                false
            }
            Err(e) => {
                warn!("User check for {} failed: {:#}", user_id, e);
                self.reply(user_id, channel_id, "Oops! Something wrong").await;
                false
            }
        }
    }

    async fn notice_attachment(&self, notice: &Notice) -> Result<Attachment> {
        let names = self.host.channel_names(&notice.channel_id).await?;
        let user = self.host.get_user(&notice.user_id).await?;
        Ok(Attachment::for_notice(
            notice,
            &names.team,
            &names.channel,
            user.display_name(),
        ))
    }

    /// Post the notice attachment as the bot, then register the notice under
    /// the new post's id. A failed registration is only logged.
    async fn post_and_register(&self, mut notice: Notice) -> Result<StatusCode, StatusCode> {
        let attachment = self.notice_attachment(&notice).await.map_err(|e| {
            error!("Failed to build notice attachment: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

        let created = self
            .host
            .create_post(NewPost {
                channel_id: notice.channel_id.clone(),
                message: String::new(),
                file_ids: notice.file_ids.clone(),
                props: Some(attachment.into_props()),
            })
            .await
            .map_err(|e| {
                error!("Failed to create notice post: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;

        notice.post_id = created.id;
        if let Err(e) = self.notifications.register(&notice).await {
            warn!("Notice registration for post {} failed: {:#}", notice.post_id, e);
        }

        Ok(StatusCode::OK)
    }
}

/// Routes relative to the plugin root; anything else is a 400.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(NOTICE_WITH_BUTTON_SUFFIX, post(create_notice_with_button))
        .route(NOTICE_WITH_COMMAND_SUFFIX, post(create_notice_with_command))
        .route(
            NOTICE_WITH_EDITOR_SUFFIX,
            post(create_notice_with_editor).layer(DefaultBodyLimit::max(EDITOR_BODY_LIMIT)),
        )
        .route(SLASH_COMMAND_SUFFIX, post(command::execute_command))
        .fallback(bad_request)
        .with_state(state)
}

/// [`router`] mounted under `/plugins/<plugin_id>`.
pub fn plugin_router(plugin_id: &str, state: Arc<ServerState>) -> Router {
    Router::new()
        .nest(&format!("/plugins/{}", plugin_id), router(state))
        .fallback(bad_request)
}

async fn bad_request() -> (StatusCode, &'static str) {
    (StatusCode::BAD_REQUEST, "Bad Request")
}

async fn create_notice_with_button(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ButtonRequest>,
) -> Result<StatusCode, StatusCode> {
    let post = state.host.get_post(&request.post_id).await.map_err(|e| {
        warn!("Post {} not found: {:#}", request.post_id, e);
        StatusCode::NOT_FOUND
    })?;

    if let Some(requester) = request.user_id.as_deref().filter(|id| !id.is_empty()) {
        if requester != post.user_id {
            state
                .reply(
                    requester,
                    &post.channel_id,
                    "Only post owner can create notification",
                )
                .await;
            return Ok(StatusCode::OK);
        }
    }

    if !state
        .check_authentication(&post.user_id, &post.channel_id)
        .await
    {
        return Ok(StatusCode::OK);
    }

    let notice = Notice::from_post(&post, Utc::now().with_timezone(&state.offset));

    let message = match state.notifications.register(&notice).await {
        Ok(()) => {
            info!("Registered notice for post {}", post.id);
            if let Err(e) = state.host.add_reaction(&post.id, REACTION_REGISTERED).await {
                error!("Failed to react to post {}: {:#}", post.id, e);
            }
            "Registration success"
        }
        Err(e) => {
            warn!("Notice registration for post {} failed: {:#}", post.id, e);
            "Registration failed"
        }
    };
    state.reply(&post.user_id, &post.channel_id, message).await;

    Ok(StatusCode::OK)
}

async fn create_notice_with_command(
    State(state): State<Arc<ServerState>>,
    Json(form): Json<DialogSubmission>,
) -> Result<StatusCode, StatusCode> {
    if form.cancelled {
        return Ok(StatusCode::OK);
    }

    let notice = Notice::from_dialog(&form);
    if let Err(e) = notice.validate_times() {
        info!("Rejected dialog from {}: {}", notice.user_id, e);
        state
            .reply(&notice.user_id, &notice.channel_id, notice.rejection_message())
            .await;
        return Ok(StatusCode::OK);
    }

    state.post_and_register(notice).await
}

/// Multipart form from the web editor. Every `file` part is uploaded to the
/// channel before the notice post is created.
async fn create_notice_with_editor(
    State(state): State<Arc<ServerState>>,
    mut form: Multipart,
) -> Result<StatusCode, StatusCode> {
    let mut user_id = String::new();
    let mut channel_id = String::new();
    let mut fields = DialogFields::default();
    let mut files = Vec::new();

    while let Some(field) = form.next_field().await.map_err(|e| {
        warn!("Malformed editor form: {}", e);
        StatusCode::BAD_REQUEST
    })? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or("file").to_string();
            let data = field.bytes().await.map_err(|e| {
                warn!("Failed to read uploaded file {}: {}", file_name, e);
                StatusCode::BAD_REQUEST
            })?;
            files.push((file_name, data.to_vec()));
            continue;
        }

        let value = field.text().await.map_err(|e| {
            warn!("Failed to read editor field {}: {}", name, e);
            StatusCode::BAD_REQUEST
        })?;
        match name.as_str() {
            "user_id" => user_id = value,
            "channel_id" => channel_id = value,
            "message" => fields.message = value,
            "start_time" => fields.start_time = value,
            "end_time" => fields.end_time = value,
            _ => {}
        }
    }

    let mut notice = Notice::from_fields(&user_id, &channel_id, &fields);
    for (file_name, data) in files {
        let file_id = state
            .host
            .upload_file(&channel_id, &file_name, data)
            .await
            .map_err(|e| {
                error!("Failed to upload {} to channel {}: {:#}", file_name, channel_id, e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
        notice.file_ids.push(file_id);
    }

    state.post_and_register(notice).await
}
