//! Wire rules for the handful of types whose JSON form is not the structural one.
//!
//! Serde dispatches on type, so each rule is a `Serialize`/`Deserialize` impl on
//! exactly the type it governs; every other DTO uses the derived impls.
//!
//! Reads are lenient where the service may add new tokens (enums degrade to their
//! default member). Chat ids are the exception: a string that is neither
//! `@username` nor an integer is rejected.

use std::fmt;

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::types::{ChatId, InlineQueryResultType, ParseMode};

// ============== ChatId ==============

impl Serialize for ChatId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            ChatId::Id(id) => s.serialize_i64(*id),
            ChatId::Username(u) => s.serialize_str(u),
        }
    }
}

struct ChatIdVisitor;

impl<'de> Visitor<'de> for ChatIdVisitor {
    type Value = ChatId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer chat id or an @username string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ChatId, E> {
        Ok(ChatId::Id(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ChatId, E> {
        i64::try_from(v)
            .map(ChatId::Id)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ChatId, E> {
        ChatId::parse(v).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for ChatId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(ChatIdVisitor)
    }
}

// ============== Token enums ==============

/// Reads a string token and maps it through `from_wire`; any other JSON value,
/// arrays and objects included, is consumed and becomes the default member.
struct TokenVisitor<T> {
    expecting: &'static str,
    from_wire: fn(&str) -> T,
}

impl<'de, T: Default> Visitor<'de> for TokenVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expecting)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        Ok((self.from_wire)(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<T, E> {
        Ok(T::default())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<T, E> {
        Ok(T::default())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<T, E> {
        Ok(T::default())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<T, E> {
        Ok(T::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<T, E> {
        Ok(T::default())
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<T, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(T::default())
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<T, A::Error> {
        while map
            .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
            .is_some()
        {}
        Ok(T::default())
    }
}

impl Serialize for InlineQueryResultType {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InlineQueryResultType {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(TokenVisitor {
            expecting: "an inline query result type",
            from_wire: InlineQueryResultType::from_wire,
        })
    }
}

impl Serialize for ParseMode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParseMode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(TokenVisitor {
            expecting: "a parse mode",
            from_wire: ParseMode::from_wire,
        })
    }
}

// ============== Empty object ==============

/// `#[serde(with = "empty_object_as_none")]` for `Option<T>` fields where the
/// service sends `{}` instead of omitting the field.
pub mod empty_object_as_none {
    use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, s: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        value.serialize(s)
    }

    pub fn deserialize<'de, T, D>(d: D) -> Result<Option<T>, D::Error>
    where
        T: DeserializeOwned,
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(d)?;
        match raw {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
            Some(v) => serde_json::from_value(v)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
