use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Layout of every notice timestamp, e.g. "2021-11-04 14:06".
pub const NOTICE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A post as returned by the host.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub channel_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub file_ids: Vec<String>,
}

/// A post the bot asks the host to create, publicly or ephemerally.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct NewPost {
    pub channel_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<serde_json::Value>,
}

impl NewPost {
    pub fn text(channel_id: &str, message: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            message: message.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub nickname: String,
}

impl User {
    /// Nickname when set, username otherwise.
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            &self.username
        } else {
            &self.nickname
        }
    }
}

/// Body of the create-notice-with-button call.
#[derive(Debug, Clone, Deserialize)]
pub struct ButtonRequest {
    pub post_id: String,
    /// Who clicked. Older clients only send `post_id`.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Interactive dialog submission posted by the host.
///
/// The host sends `null` for fields the user left empty.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DialogSubmission {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channel_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub submission: DialogFields,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cancelled: bool,
}

/// User input shared by the dialog and the web editor.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DialogFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// Slash command invocation as the host posts it.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CommandArgs {
    #[serde(default, deserialize_with = "null_as_default")]
    pub command: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channel_id: String,
}

/// One entry of the notification service's today listing.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct DailyNotification {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_time: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Error, PartialEq)]
pub enum NoticeTimeError {
    #[error("invalid notice time '{0}', expected YYYY-MM-DD hh:mm")]
    InvalidFormat(String),
}

/// What the notification service stores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Notice {
    pub user_id: String,
    pub message: String,
    pub start_time: String,
    pub end_time: String,
    pub file_ids: Vec<String>,
    pub channel_id: String,
    pub post_id: String,
}

impl Notice {
    /// Notice for an existing post, running from `now` to the end of that day.
    pub fn from_post<Tz: TimeZone>(post: &Post, now: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            user_id: post.user_id.clone(),
            message: post.message.clone(),
            start_time: now.format(NOTICE_TIME_FORMAT).to_string(),
            end_time: now.format("%Y-%m-%d 23:59").to_string(),
            file_ids: post.file_ids.clone(),
            channel_id: post.channel_id.clone(),
            post_id: post.id.clone(),
        }
    }

    /// Notice from a dialog. A blank end time means a single deadline.
    pub fn from_dialog(form: &DialogSubmission) -> Self {
        Self::from_fields(&form.user_id, &form.channel_id, &form.submission)
    }

    /// Notice from user-entered fields; `end_time` falls back to `start_time`.
    pub fn from_fields(user_id: &str, channel_id: &str, fields: &DialogFields) -> Self {
        let start_time = fields.start_time.clone();
        let end_time = if fields.end_time.is_empty() {
            start_time.clone()
        } else {
            fields.end_time.clone()
        };
        Self {
            user_id: user_id.to_string(),
            message: fields.message.clone(),
            start_time,
            end_time,
            file_ids: Vec::new(),
            channel_id: channel_id.to_string(),
            post_id: String::new(),
        }
    }

    pub fn is_deadline(&self) -> bool {
        self.start_time == self.end_time
    }

    pub fn validate_times(&self) -> Result<(), NoticeTimeError> {
        parse_notice_time(&self.start_time)?;
        parse_notice_time(&self.end_time)?;
        Ok(())
    }

    /// Ephemeral reply echoing what the user typed when validation fails.
    pub fn rejection_message(&self) -> String {
        let end_time = if self.is_deadline() {
            ""
        } else {
            self.end_time.as_str()
        };
        format!(
            "Oops! Failed to Create Notification.\nYour Input: \n\nDate: {}\nEnd date: {}\nMessage: {}",
            self.start_time, end_time, self.message
        )
    }
}

/// Parse a zero-padded `YYYY-MM-DD hh:mm` timestamp.
pub fn parse_notice_time(value: &str) -> Result<NaiveDateTime, NoticeTimeError> {
    let invalid = || NoticeTimeError::InvalidFormat(value.to_string());
    let bytes = value.as_bytes();
    if bytes.len() != 16 {
        return Err(invalid());
    }

    for (i, b) in bytes.iter().enumerate() {
        let ok = match i {
            4 | 7 => *b == b'-',
            10 => b.is_ascii_whitespace(),
            13 => *b == b':',
            _ => b.is_ascii_digit(),
        };
        if !ok {
            return Err(invalid());
        }
    }

    let normalized = format!("{} {}", &value[..10], &value[11..]);
    NaiveDateTime::parse_from_str(&normalized, NOTICE_TIME_FORMAT).map_err(|_| invalid())
}
