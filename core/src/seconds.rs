//! Serde helpers that express [`Duration`] values as fractional seconds.
//!
//! Use with `#[serde(with = "zenith_core::seconds")]` on `Duration` fields so
//! configuration files can write `reload_time = 1.2`.

use std::time::Duration;

use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

/// Serializes a duration as fractional seconds.
pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(value.as_secs_f64())
}

/// Deserializes fractional seconds, rejecting values a [`Duration`] cannot hold.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(seconds).map_err(|error| {
        D::Error::custom(format!(
            "expected a non-negative number of seconds, found {seconds}: {error}"
        ))
    })
}
