//! Serde helpers for wire formats that differ from chrono/serde defaults

/// Time of day as `"HH:MM"`; also accepts `"HH:MM:SS"` on input.
///
/// Seconds are dropped while parsing so a parsed time always renders back
/// to the same value.
pub mod time_hm {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map(to_minute)
            .map_err(|_| format!("invalid time '{}', expected HH:MM", raw))
    }

    /// Truncate to whole minutes, the resolution of the wire format
    pub fn to_minute(time: NaiveTime) -> NaiveTime {
        time.with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(time)
    }
}

/// Optional binary payload carried as standard base64 text.
pub mod base64_opt {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bytes {
            Some(b) => s.serialize_some(&STANDARD.encode(b)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => STANDARD
                .decode(text)
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid base64: {}", e))),
        }
    }
}
