use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::transaction::Timestamp;

/// The current UTC offset of the timezone named `canonical_timezone`, e.g.
/// "Pacific/Auckland", or `None` if the name is not recognised.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Format `time` as "day/month" in the timezone `offset`, e.g. "3/11".
///
/// Returns an empty string if `time` is outside the supported date range.
pub fn format_day_month(time: Timestamp, offset: UtcOffset) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(time) * 1_000_000)
        .map(|date_time| {
            let date_time = date_time.to_offset(offset);
            format!("{}/{}", date_time.day(), u8::from(date_time.month()))
        })
        .unwrap_or_default()
}
