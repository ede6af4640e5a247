//! Lenient integer decoding.
//!
//! Nodes send 64-bit quantities as JSON strings once they leave the range a
//! JavaScript number can hold, and some 32-bit fields arrive as strings too.
//! These helpers accept either form through `#[serde(deserialize_with)]`.

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Flex {
    Number(u64),
    Text(String),
}

impl Flex {
    fn into_u64<E: de::Error>(self) -> Result<u64, E> {
        match self {
            Flex::Number(n) => Ok(n),
            Flex::Text(s) => s
                .parse()
                .map_err(|_| E::custom(format!("invalid unsigned integer {s:?}"))),
        }
    }
}

/// `u64` from a JSON number or a decimal string.
pub fn de_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Flex::deserialize(deserializer)?.into_u64()
}

/// `u32` from a JSON number or a decimal string.
pub fn de_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Flex::deserialize(deserializer)?.into_u64()?;
    u32::try_from(value).map_err(|_| de::Error::custom(format!("{value} does not fit in u32")))
}
