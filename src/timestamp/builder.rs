// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};

use super::grammar::RawFields;

/// Builds a local timestamp from captured fields.
///
/// Out-of-range fields roll into the next larger unit: month 22 of 2010
/// lands in October 2011, day 0 is the last day of the preceding month, and
/// a 25th hour spills into the next day. For fields that already passed
/// validation the normalization is the identity, so both validation
/// policies share this path.
///
/// A wall-clock reading that the local timezone maps twice (a DST fold)
/// resolves to the earlier instant; one it never maps (a DST gap) yields
/// `None`.
pub(crate) fn local_datetime(fields: &RawFields) -> Option<DateTime<Local>> {
    let year = fields.year + (fields.month as i32 - 1).div_euclid(12);
    let month = ((fields.month as i32 - 1).rem_euclid(12) + 1) as u32;

    let offset = Duration::days(fields.day as i64 - 1)
        + Duration::hours(fields.hour as i64)
        + Duration::minutes(fields.minute as i64)
        + Duration::seconds(fields.second as i64)
        + Duration::milliseconds(fields.millisecond as i64);

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|start| start.checked_add_signed(offset))
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// Builds a local timestamp from an absolute unix epoch reading.
pub(crate) fn local_from_epoch(second: i64, millisecond: i64) -> Option<DateTime<Local>> {
    DateTime::from_timestamp(second, millisecond as u32 * 1_000_000)
        .map(|instant| instant.with_timezone(&Local))
}
