use serde::{Deserialize, Serialize};

use crate::codec::empty_object_as_none;

/// A file ready to be downloaded from the service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub file_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_unique_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    /// Use `https://api.telegram.org/file/bot<token>/<file_path>` to fetch it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// One size of a photo, or a file/sticker thumbnail.
///
/// A missing thumbnail arrives as `{}`; fields typed `Option<PhotoSize>` decode
/// that as `None` through [`empty_object_as_none`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSize {
    #[serde(flatten)]
    pub file: File,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(flatten)]
    pub file: File,
    #[serde(
        default,
        alias = "thumbnail",
        with = "empty_object_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumb: Option<PhotoSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sticker {
    #[serde(flatten)]
    pub file: File,
    pub width: u32,
    pub height: u32,
    #[serde(
        default,
        alias = "thumbnail",
        with = "empty_object_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumb: Option<PhotoSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// How an [`InputFile`] refers to its content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FileType {
    #[default]
    Unknown,
    /// A `file_id` of a file already stored by the service.
    Id,
    /// An HTTP URL the service downloads itself.
    Url,
}

/// File argument of `send*` methods. Serialized as a bare string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InputFile {
    FileId(String),
    Url(String),
}

impl InputFile {
    pub fn file_id(id: impl Into<String>) -> Self {
        InputFile::FileId(id.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        InputFile::Url(url.into())
    }

    pub fn file_type(&self) -> FileType {
        match self {
            InputFile::FileId(_) => FileType::Id,
            InputFile::Url(_) => FileType::Url,
        }
    }
}
