use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;

/// Layout used for booking timestamps, e.g. `Tue Jan  2 09:30:00 2024`.
const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse an IANA zone name such as "Europe/Paris".
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.parse::<Tz>().ok()
}

/// Render a timestamp in the given zone, or in the machine's local time when none is set.
pub fn format_timestamp(at: DateTime<Utc>, timezone: Option<Tz>) -> String {
    match timezone {
        Some(tz) => at.with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string(),
        None => at.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
    }
}
