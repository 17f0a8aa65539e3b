use serde::{Deserialize, Serialize};

use super::parse_mode::ParseMode;

/// Discriminant of an inline query result (`"type"` on the wire).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InlineQueryResultType {
    /// Any token this client does not know yet.
    #[default]
    Unknown,
    Article,
    Photo,
    Gif,
    Mpeg4Gif,
    Video,
    Audio,
    Voice,
    Document,
    Location,
    Venue,
    Contact,
    Game,
    Sticker,
}

impl InlineQueryResultType {
    pub const ALL: &'static [InlineQueryResultType] = &[
        InlineQueryResultType::Unknown,
        InlineQueryResultType::Article,
        InlineQueryResultType::Photo,
        InlineQueryResultType::Gif,
        InlineQueryResultType::Mpeg4Gif,
        InlineQueryResultType::Video,
        InlineQueryResultType::Audio,
        InlineQueryResultType::Voice,
        InlineQueryResultType::Document,
        InlineQueryResultType::Location,
        InlineQueryResultType::Venue,
        InlineQueryResultType::Contact,
        InlineQueryResultType::Game,
        InlineQueryResultType::Sticker,
    ];

    /// Canonical snake_case token.
    pub fn as_str(self) -> &'static str {
        match self {
            InlineQueryResultType::Unknown => "unknown",
            InlineQueryResultType::Article => "article",
            InlineQueryResultType::Photo => "photo",
            InlineQueryResultType::Gif => "gif",
            InlineQueryResultType::Mpeg4Gif => "mpeg4_gif",
            InlineQueryResultType::Video => "video",
            InlineQueryResultType::Audio => "audio",
            InlineQueryResultType::Voice => "voice",
            InlineQueryResultType::Document => "document",
            InlineQueryResultType::Location => "location",
            InlineQueryResultType::Venue => "venue",
            InlineQueryResultType::Contact => "contact",
            InlineQueryResultType::Game => "game",
            InlineQueryResultType::Sticker => "sticker",
        }
    }

    /// Lenient read: underscores are ignored and case does not matter, so
    /// `"mpeg4_gif"`, `"Mpeg4Gif"` and `"MPEG4GIF"` all match.
    pub fn from_wire(token: &str) -> Self {
        let wanted = strip_underscores(token);
        Self::ALL
            .iter()
            .copied()
            .find(|kind| strip_underscores(kind.as_str()).eq_ignore_ascii_case(&wanted))
            .unwrap_or_default()
    }
}

fn strip_underscores(s: &str) -> String {
    s.chars().filter(|c| *c != '_').collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputTextMessageContent {
    pub message_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_web_page_preview: Option<bool>,
}

/// One result of an inline query answer.
///
/// Only the fields used by the supported result kinds are modelled; anything the
/// kind does not use stays `None` and is omitted on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineQueryResult {
    #[serde(rename = "type")]
    pub kind: InlineQueryResultType,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputTextMessageContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl InlineQueryResult {
    pub fn article(
        id: impl Into<String>,
        title: impl Into<String>,
        content: InputTextMessageContent,
    ) -> Self {
        Self {
            kind: InlineQueryResultType::Article,
            id: id.into(),
            title: Some(title.into()),
            description: None,
            input_message_content: Some(content),
            photo_url: None,
            thumb_url: None,
            caption: None,
        }
    }

    pub fn photo(
        id: impl Into<String>,
        photo_url: impl Into<String>,
        thumb_url: impl Into<String>,
    ) -> Self {
        Self {
            kind: InlineQueryResultType::Photo,
            id: id.into(),
            title: None,
            description: None,
            input_message_content: None,
            photo_url: Some(photo_url.into()),
            thumb_url: Some(thumb_url.into()),
            caption: None,
        }
    }
}
