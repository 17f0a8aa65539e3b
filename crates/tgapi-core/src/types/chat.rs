use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChatId, User};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Without the leading `@`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Chat {
    /// Address usable in requests: the numeric id is always valid.
    pub fn chat_id(&self) -> ChatId {
        ChatId::Id(self.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
    #[serde(other)]
    Unknown,
}

/// Information about one member of a chat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMember {
    pub user: User,
    pub status: ChatMemberStatus,
    /// Restriction/ban expiry; `None` means forever.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub until_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_be_edited: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_delete_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_restrict_members: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_send_messages: Option<bool>,
}

impl ChatMember {
    pub fn is_admin(&self) -> bool {
        matches!(
            self.status,
            ChatMemberStatus::Creator | ChatMemberStatus::Administrator
        )
    }

    pub fn is_present(&self) -> bool {
        !matches!(self.status, ChatMemberStatus::Left | ChatMemberStatus::Kicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_restricted_member() {
        let m: ChatMember = serde_json::from_value(json!({
            "user": { "id": 5, "is_bot": false, "first_name": "Ann" },
            "status": "restricted",
            "until_date": 1700000000,
            "can_send_messages": false
        }))
        .unwrap();
        assert_eq!(m.status, ChatMemberStatus::Restricted);
        assert_eq!(m.until_date.unwrap().timestamp(), 1_700_000_000);
        assert!(m.is_present());
        assert!(!m.is_admin());
    }

    #[test]
    fn member_requires_user_and_status() {
        assert!(serde_json::from_value::<ChatMember>(json!({ "status": "member" })).is_err());
        assert!(serde_json::from_value::<ChatMember>(json!({
            "user": { "id": 5, "is_bot": false, "first_name": "Ann" }
        }))
        .is_err());
    }

    #[test]
    fn new_statuses_do_not_fail() {
        let m: ChatMember = serde_json::from_value(json!({
            "user": { "id": 1, "is_bot": true, "first_name": "B" },
            "status": "owner_in_waiting"
        }))
        .unwrap();
        assert_eq!(m.status, ChatMemberStatus::Unknown);
    }

    #[test]
    fn chat_kind_and_address() {
        let c: Chat = serde_json::from_value(json!({
            "id": -100123,
            "type": "supergroup",
            "title": "Rustaceans"
        }))
        .unwrap();
        assert_eq!(c.kind, ChatType::Supergroup);
        assert_eq!(c.chat_id(), ChatId::Id(-100123));
    }
}
