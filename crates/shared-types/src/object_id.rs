//! # Object Identifiers
//!
//! Graphene chains have no addresses: every on-chain entity is addressed by a
//! `space.type.instance` triple such as `1.2.974337` (an account) or `1.3.0`
//! (the core asset).

use crate::errors::ParseObjectIdError;
use ol_01_encoding::{ConsensusEncode, Encoder, EncodingError};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A protocol object identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId {
    /// Object space (1 = protocol, 2 = implementation).
    pub space: u64,
    /// Object type within the space.
    pub type_id: u64,
    /// Instance number.
    pub instance: u64,
}

impl ObjectId {
    /// The core asset of every Graphene chain.
    pub const CORE_ASSET: ObjectId = ObjectId::new(1, 3, 0);

    pub const fn new(space: u64, type_id: u64, instance: u64) -> Self {
        Self {
            space,
            type_id,
            instance,
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.space, self.type_id, self.instance)
    }
}

impl FromStr for ObjectId {
    type Err = ParseObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let &[space, type_id, instance] = parts.as_slice() else {
            return Err(ParseObjectIdError::ComponentCount {
                input: s.to_string(),
            });
        };

        let component = |text: &str, name: &'static str| {
            // u64::from_str accepts a leading '+', which is not canonical
            if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseObjectIdError::InvalidComponent {
                    input: s.to_string(),
                    component: name,
                });
            }
            text.parse::<u64>()
                .map_err(|_| ParseObjectIdError::InvalidComponent {
                    input: s.to_string(),
                    component: name,
                })
        };

        Ok(Self {
            space: component(space, "space")?,
            type_id: component(type_id, "type")?,
            instance: component(instance, "instance")?,
        })
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Inside an operation the space and type are implied by the field, so only
/// the instance is written as a varint, never the `"1.2.974337"` text.
///
/// The BitShares mainnet transfer in the transaction tests pins this: its
/// `from` account `1.2.974337` appears on the wire as `81bc3b`.
impl ConsensusEncode for ObjectId {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode_uvarint(self.instance);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_and_render() {
        let id: ObjectId = "1.2.974337".parse().unwrap();
        assert_eq!(id, ObjectId::new(1, 2, 974337));
        assert_eq!(id.to_string(), "1.2.974337");
    }

    #[test]
    fn test_rejects_malformed() {
        for text in ["", "1.2", "1.2.3.4", "1..3", "a.b.c", "1.2.-3", "1.2.+3", " 1.2.3", "1.2.3 "] {
            assert!(text.parse::<ObjectId>().is_err(), "{text:?} should be rejected");
        }
        assert!(matches!(
            "1.2".parse::<ObjectId>(),
            Err(ParseObjectIdError::ComponentCount { .. })
        ));
        assert!(matches!(
            "1.x.3".parse::<ObjectId>(),
            Err(ParseObjectIdError::InvalidComponent { component: "type", .. })
        ));
    }

    #[test]
    fn test_json_is_string() {
        let id = ObjectId::new(1, 3, 3232);
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""1.3.3232""#);
        let back: ObjectId = serde_json::from_str(r#""1.3.3232""#).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ObjectId>("\"1.3\"").is_err());
        assert!(serde_json::from_str::<ObjectId>("13").is_err());
    }

    #[test]
    fn test_consensus_encoding_is_instance_varint() {
        let bytes = ol_01_encoding::encode_to_vec(&ObjectId::new(1, 2, 974337)).unwrap();
        assert_eq!(hex::encode(bytes), "81bc3b");
    }

    proptest! {
        #[test]
        fn test_render_parse_round_trip(space in any::<u64>(), type_id in any::<u64>(), instance in any::<u64>()) {
            let id = ObjectId::new(space, type_id, instance);
            prop_assert_eq!(id.to_string().parse::<ObjectId>().unwrap(), id);
        }

        #[test]
        fn test_parse_requires_three_components(parts in proptest::collection::vec(any::<u32>(), 0..6)) {
            let text = parts.iter().map(u32::to_string).collect::<Vec<_>>().join(".");
            prop_assert_eq!(text.parse::<ObjectId>().is_ok(), parts.len() == 3);
        }
    }
}
