use chrono::{DateTime, SecondsFormat, Utc};

/// Formats an instant as an ISO-8601 / RFC 3339 UTC string with microsecond precision.
pub fn iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current wall-clock time as an ISO-8601 string.
pub fn now_iso8601() -> String {
    iso8601(Utc::now())
}
