//! Chain timestamps.
//!
//! JSON carries `YYYY-MM-DDTHH:MM:SS` with no offset (always UTC); consensus
//! bytes carry Unix seconds as a `uint32`.

use crate::errors::TypesError;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use ol_01_encoding::{ConsensusEncode, Encoder, EncodingError};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// `strftime` layout of node timestamps.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A UTC timestamp with whole-second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(DateTime<Utc>);

impl Time {
    /// Timestamp from Unix seconds.
    pub fn from_unix(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }

    /// Seconds since the Unix epoch.
    pub fn unix(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// `self + ttl`, truncated to whole seconds.
    pub fn checked_add(self, ttl: Duration) -> Option<Self> {
        let secs = i64::try_from(ttl.as_secs()).ok()?;
        self.unix().checked_add(secs).and_then(Self::from_unix)
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl FromStr for Time {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let naive = NaiveDateTime::parse_from_str(s, TIME_FORMAT)
            .map_err(|_| TypesError::InvalidTime(s.to_string()))?;
        Ok(Self(Utc.from_utc_datetime(&naive)))
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

impl ConsensusEncode for Time {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        let secs = self.unix();
        let secs = u32::try_from(secs).map_err(|_| EncodingError::TimestampOutOfRange(secs))?;
        encoder.encode_u32(secs);
        Ok(())
    }
}
