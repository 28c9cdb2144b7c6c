use std::{convert::Infallible, fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Identity of a document in the data store.
///
/// The store hands out numeric ids for documents it numbers itself and keeps
/// string ids for everything else. Numeric-looking strings are read back as
/// numbers, so `"1"` from a URL path and `1` from a JSON body are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl EntityId {
    /// A fresh, time-ordered id for documents created by this service.
    pub fn mint() -> Self {
        Self::Text(Uuid::now_v7().simple().to_string())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{n}"),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for EntityId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(s.to_owned()),
        })
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EntityId::Number(n) => serializer.serialize_i64(*n),
            EntityId::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = EntityId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number or a string id")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<EntityId, E> {
                Ok(EntityId::Number(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntityId, E> {
                i64::try_from(v)
                    .map(EntityId::Number)
                    .map_err(|_| E::custom(format!("id {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<EntityId, E> {
                let Ok(id) = v.parse::<EntityId>();
                Ok(id)
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_and_numbers_are_the_same_key() {
        let from_path: EntityId = "7".parse().unwrap();
        let from_json: EntityId = serde_json::from_str("7").unwrap();
        let from_text: EntityId = serde_json::from_str("\"7\"").unwrap();

        assert_eq!(from_path, EntityId::Number(7));
        assert_eq!(from_json, from_path);
        assert_eq!(from_text, from_path);
    }

    #[test]
    fn text_ids_serialize_as_strings() {
        let id = EntityId::Text("a1b2".to_owned());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a1b2\"");
        assert_eq!(serde_json::to_string(&EntityId::Number(3)).unwrap(), "3");
    }

    #[test]
    fn minted_ids_are_unique() {
        assert_ne!(EntityId::mint(), EntityId::mint());
    }
}
