//! Timestamp wire format.
//!
//! All timestamps leave the service as UTC ISO-8601 strings ending in a
//! literal `Z`, with microsecond precision to match PostgreSQL `TIMESTAMPTZ`.
//! Incoming timestamps must carry an explicit offset and are normalized to UTC.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format a timestamp the way it appears on the wire.
pub fn format_utc(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an RFC 3339 timestamp with an explicit offset into UTC.
pub fn parse_utc(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

/// `#[serde(with = "crate::time::utc_z")]` adapter for `DateTime<Utc>` fields.
pub mod utc_z {
    use super::*;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_utc(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_utc(&raw).map_err(|e| {
            serde::de::Error::custom(format!(
                "expected a timezone-aware RFC 3339 timestamp, got '{raw}': {e}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_uses_z_suffix() {
        let dt = Utc.with_ymd_and_hms(2025, 5, 10, 14, 30, 54).unwrap();
        assert_eq!(format_utc(&dt), "2025-05-10T14:30:54.000000Z");
    }

    #[test]
    fn test_parse_normalizes_offset() {
        let dt = parse_utc("2025-05-10T16:30:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 5, 10, 14, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_naive_timestamp() {
        assert!(parse_utc("2025-05-10T14:30:00").is_err());
    }
}
