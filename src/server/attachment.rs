use serde::Serialize;

use super::model::Notice;

const NOTICE_COLOR: &str = "#1352ab";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

/// Message attachment the bot posts for a newly created notice.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Attachment {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author_name: String,
    pub color: String,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
}

fn field(title: &str, value: &str, short: bool) -> AttachmentField {
    AttachmentField {
        title: title.to_string(),
        value: value.to_string(),
        short,
    }
}

impl Attachment {
    pub fn for_notice(notice: &Notice, team_name: &str, channel_name: &str, author: &str) -> Self {
        let mut fields = if notice.is_deadline() {
            vec![field(":calendar: Deadline", &notice.start_time, false)]
        } else {
            vec![
                field(":calendar: Start Time", &notice.start_time, true),
                field(":calendar: End Time", &notice.end_time, true),
            ]
        };
        fields.push(field(":fountain_pen: Author", author, false));

        Self {
            author_name: format!("{} / {}", team_name, channel_name),
            color: NOTICE_COLOR.to_string(),
            text: notice.message.clone(),
            fields,
        }
    }

    /// Plain colored block, used for command replies.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            author_name: String::new(),
            color: NOTICE_COLOR.to_string(),
            text: text.into(),
            fields: Vec::new(),
        }
    }

    /// Post props carrying this attachment.
    pub fn into_props(self) -> serde_json::Value {
        serde_json::json!({ "attachments": [self] })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(start: &str, end: &str) -> Notice {
        Notice {
            message: "Quarterly review".into(),
            start_time: start.into(),
            end_time: end.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_deadline_has_single_time_field() {
        let attachment = Attachment::for_notice(
            &notice("2021-11-04 14:06", "2021-11-04 14:06"),
            "Dev",
            "town-square",
            "alice",
        );

        assert_eq!(attachment.author_name, "Dev / town-square");
        assert_eq!(attachment.color, "#1352ab");
        assert_eq!(attachment.text, "Quarterly review");
        assert_eq!(
            attachment.fields,
            vec![
                field(":calendar: Deadline", "2021-11-04 14:06", false),
                field(":fountain_pen: Author", "alice", false),
            ]
        );
    }

    #[test]
    fn test_term_has_start_and_end_fields() {
        let attachment = Attachment::for_notice(
            &notice("2021-11-04 14:06", "2021-11-05 09:00"),
            "Dev",
            "general",
            "Al",
        );

        let titles: Vec<_> = attachment.fields.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![":calendar: Start Time", ":calendar: End Time", ":fountain_pen: Author"]
        );
        assert!(attachment.fields[0].short);
        assert!(attachment.fields[1].short);
        assert!(!attachment.fields[2].short);
    }

    #[test]
    fn test_into_props_wraps_attachment_list() {
        let props = Attachment::for_notice(&notice("a", "a"), "T", "C", "U").into_props();
        assert_eq!(props["attachments"][0]["author_name"], "T / C");
        assert_eq!(props["attachments"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_text_only_omits_author_and_fields() {
        let props = Attachment::text_only("# Today").into_props();
        assert_eq!(
            props,
            serde_json::json!({ "attachments": [{ "color": "#1352ab", "text": "# Today" }] })
        );
    }
}
