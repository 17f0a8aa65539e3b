use std::{fmt, str::FromStr};

use crate::{errors::Error, Result};

/// Address of a chat: a numeric id or a public `@username`.
///
/// On the wire this is a bare JSON number or string (see `codec`). Two values are
/// equal exactly when their canonical strings are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChatId {
    Id(i64),
    /// Always starts with `@` and has at least one character after it.
    Username(String),
}

impl ChatId {
    pub fn from_identifier(id: i64) -> Self {
        ChatId::Id(id)
    }

    pub fn from_username(username: impl Into<String>) -> Result<Self> {
        let username = username.into();
        if is_username(&username) {
            Ok(ChatId::Username(username))
        } else {
            Err(Error::InvalidChatId(username))
        }
    }

    /// `@name` becomes a username, anything else must parse as an `i64`.
    pub fn parse(s: &str) -> Result<Self> {
        if is_username(s) {
            return Ok(ChatId::Username(s.to_string()));
        }
        s.parse::<i64>()
            .map(ChatId::Id)
            .map_err(|_| Error::InvalidChatId(s.to_string()))
    }

    pub fn identifier(&self) -> Option<i64> {
        match self {
            ChatId::Id(id) => Some(*id),
            ChatId::Username(_) => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            ChatId::Id(_) => None,
            ChatId::Username(u) => Some(u),
        }
    }

    pub fn to_canonical_string(&self) -> String {
        match self {
            ChatId::Id(id) => id.to_string(),
            ChatId::Username(u) => u.clone(),
        }
    }
}

fn is_username(s: &str) -> bool {
    s.len() > 1 && s.starts_with('@')
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{id}"),
            ChatId::Username(u) => f.write_str(u),
        }
    }
}

impl FromStr for ChatId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ChatId::parse(s)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parse_prefers_username() {
        assert_eq!(
            ChatId::parse("@rustlang").unwrap(),
            ChatId::Username("@rustlang".to_string())
        );
        assert_eq!(ChatId::parse("-1001234").unwrap(), ChatId::Id(-1001234));
    }

    #[test]
    fn rejects_ambiguous_strings() {
        for bad in ["", "@", "rustlang", "12a", " 42"] {
            assert!(
                matches!(ChatId::parse(bad), Err(Error::InvalidChatId(ref s)) if s == bad),
                "{bad:?} should be rejected"
            );
        }
        assert!(ChatId::from_username("rustlang").is_err());
    }

    #[test]
    fn equality_follows_canonical_form() {
        let a = ChatId::parse("42").unwrap();
        let b = ChatId::from_identifier(42);
        let c: ChatId = 42i64.into();
        assert_eq!(a, b);
        assert_eq!(b, c);

        let set: HashSet<ChatId> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 1);

        assert_ne!(ChatId::parse("@42").unwrap(), ChatId::Id(42));
        assert_eq!(ChatId::Id(42).to_canonical_string(), "42");
        assert_eq!(ChatId::parse("@abc").unwrap().to_string(), "@abc");
    }

    #[test]
    fn accessors() {
        let u = ChatId::from_username("@abc").unwrap();
        assert_eq!(u.username(), Some("@abc"));
        assert_eq!(u.identifier(), None);
        assert_eq!(ChatId::Id(7).identifier(), Some(7));
    }
}
