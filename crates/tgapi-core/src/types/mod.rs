//! Bot API data-transfer records.
//!
//! Plain records use derived serde impls; the few with special wire forms get
//! theirs from [`crate::codec`].

pub mod chat;
pub mod chat_id;
pub mod file;
pub mod inline_query_result;
pub mod message;
pub mod parse_mode;
pub mod requests;
pub mod user;

pub use chat::{Chat, ChatMember, ChatMemberStatus, ChatType};
pub use chat_id::ChatId;
pub use file::{Document, File, FileType, InputFile, PhotoSize, Sticker};
pub use inline_query_result::{InlineQueryResult, InlineQueryResultType, InputTextMessageContent};
pub use message::{Message, WebhookInfo};
pub use parse_mode::ParseMode;
pub use requests::{AnswerInlineQuery, SendMessage, SendPhoto, SetWebhook};
pub use user::User;
