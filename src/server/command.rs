//! `/mbotc` slash command.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{NaiveDate, Utc};
use tracing::{error, info, warn};

use super::attachment::Attachment;
use super::model::{CommandArgs, DailyNotification, NewPost};
use super::ServerState;

const TRIGGER: &str = "/mbotc";

/// Longest preview shown per row before it is cut.
const PREVIEW_CHARS: usize = 100;

pub const HELP_TEXT: &str = "###### Mattermost MBotC Plugin - Slash Command Help\n\
* `/mbotc help` - help text\n\
* `/mbotc today` - List your notifications due today.\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcommand {
    Help,
    Today,
}

impl Subcommand {
    /// Anything that is not a known `/mbotc` subcommand gets the help text.
    pub fn parse(command: &str) -> Self {
        let mut args = command.split_whitespace();
        if args.next() != Some(TRIGGER) {
            return Subcommand::Help;
        }
        match args.next() {
            Some("today") => Subcommand::Today,
            _ => Subcommand::Help,
        }
    }
}

fn preview(message: &str) -> String {
    let flat = message.replace('\n', " ");
    if flat.chars().count() >= PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{} ...", cut)
    } else {
        flat
    }
}

/// Markdown table of today's notices with a link to the day's detail page.
pub fn render_today(list: &[DailyNotification], client_url: &str, today: NaiveDate) -> String {
    let mut text = String::from(
        "# Today's Notification\n| Preview :loudspeaker: | Deadline :calendar: |\n| --- | --- |\n",
    );

    if list.is_empty() {
        text.push_str("| Nothing ... | - |\n");
    }
    for notification in list {
        text.push_str(&format!(
            "| {} | {} | \n",
            preview(&notification.message),
            notification.end_time
        ));
    }

    text.push_str(&format!(
        "[See More]({}/main/detail/{})",
        client_url.trim_end_matches('/'),
        today.format("%Y%m%d")
    ));
    text
}

pub(super) async fn execute_command(
    State(state): State<Arc<ServerState>>,
    Json(args): Json<CommandArgs>,
) -> Result<StatusCode, StatusCode> {
    match Subcommand::parse(&args.command) {
        Subcommand::Help => {
            state.reply(&args.user_id, &args.channel_id, HELP_TEXT).await;
        }
        Subcommand::Today => send_today(&state, &args).await,
    }
    Ok(StatusCode::OK)
}

async fn send_today(state: &ServerState, args: &CommandArgs) {
    let list = match state.notifications.today(&args.user_id).await {
        Ok(list) => list,
        Err(e) => {
            warn!("Today listing for {} failed: {:#}", args.user_id, e);
            state
                .reply(&args.user_id, &args.channel_id, "Oops! Something wrong")
                .await;
            return;
        }
    };
    info!("{} notices due today for {}", list.len(), args.user_id);

    let today = Utc::now().with_timezone(&state.offset).date_naive();
    let text = render_today(&list, &state.client_url, today);
    let post = NewPost {
        channel_id: args.channel_id.clone(),
        props: Some(Attachment::text_only(text).into_props()),
        ..Default::default()
    };
    if let Err(e) = state.host.send_ephemeral_post(&args.user_id, post).await {
        error!("Failed to send today listing to {}: {:#}", args.user_id, e);
    }
}
