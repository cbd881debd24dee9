//! Utilities for serde

/// Envelope timestamps: `YYYY-MM-DDTHH:mm:ss.SSS`, always UTC
///
/// Use on `DateTime<Utc>` fields of payload types:
///
/// ```
/// use chrono::{DateTime, Utc};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Order {
///     #[serde(with = "envelope_http_client::serde_utils::timestamp")]
///     created: DateTime<Utc>,
/// }
/// ```
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::Deserialize;

    /// Format string understood by [`chrono`]
    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3f";

    /// Parse a timestamp in [`FORMAT`]
    pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, FORMAT).map(|naive| naive.and_utc())
    }

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    /// Same format for `Option<DateTime<Utc>>`
    pub mod opt {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer};

        pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(s) => super::parse(&s).map(Some).map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}
