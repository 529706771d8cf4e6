// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! The grammar families recognized inside noisy strings.
//!
//! Every extractor works on up to two grammars: a *separated* one, where
//! fields are joined by explicit separator characters, and an *unseparated*
//! one made of fixed-width digit runs. Both tolerate arbitrary text before
//! and after the temporal region. Callers must try the separated grammar
//! first; the unseparated grammar is only a fallback, and swapping that
//! order changes which part of an ambiguous string wins.
//!
//! Milliseconds are honored only when exactly three fraction digits are
//! present. One, two, or four-plus digits leave the match intact but drop
//! the fraction.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Calendar and clock fields captured from one grammar match.
///
/// Fields the grammar has no group for keep their defaults: year 0,
/// month 1, day 1 (the anchor used by time-only matches) and a zero clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl Default for RawFields {
    fn default() -> Self {
        Self {
            year: 0,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }
}

/// Epoch fields captured from one unix-time match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EpochFields {
    pub second: i64,
    pub millisecond: i64,
}

struct Patterns {
    datetime_separated: Regex,
    datetime_unseparated: Regex,
    date_separated: Regex,
    date_unseparated: Regex,
    time_separated: Regex,
    time_unseparated: Regex,
    epoch: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        datetime_separated: Regex::new(
            r"(?x)
            (?P<year>\d{4}) [-_.]
            (?P<month>\d{1,2}) [-_.]
            (?P<day>\d{1,2}) [-_.\x20T]
            (?P<hour>\d{1,2}) [-_.:]
            (?P<minute>\d{2})
            (?: [-_.:] (?P<second>\d{2}) (?: \. (?P<milli>\d{3}) )? )?",
        )
        .unwrap(),
        datetime_unseparated: Regex::new(
            r"(?x)
            (?P<year>\d{4}) (?P<month>\d{2}) (?P<day>\d{2})
            [-_.\x20T]?
            (?P<hour>\d{2}) (?P<minute>\d{2})
            (?: (?P<second>\d{2}) (?: \.? (?P<milli>\d{3}) )? )?",
        )
        .unwrap(),
        date_separated: Regex::new(
            r"(?x)
            (?P<year>\d{4}) [-_.]
            (?P<month>\d{1,2}) [-_.]
            (?P<day>\d{1,2})",
        )
        .unwrap(),
        date_unseparated: Regex::new(r"(?P<year>\d{4})(?P<month>\d{2})(?P<day>\d{2})").unwrap(),
        time_separated: Regex::new(
            r"(?x)
            (?P<hour>\d{1,2}) [-_.:]
            (?P<minute>\d{2})
            (?: [-_.:] (?P<second>\d{2}) (?: \. (?P<milli>\d{3}) )? )?",
        )
        .unwrap(),
        time_unseparated: Regex::new(
            r"(?x)
            (?P<hour>\d{2}) (?P<minute>\d{2})
            (?: (?P<second>\d{2}) (?: \.? (?P<milli>\d{3}) )? )?",
        )
        .unwrap(),
        epoch: Regex::new(r"(?P<second>\d{1,10})(?P<milli>\d{3})?").unwrap(),
    })
}

fn field(captures: &Captures, name: &str) -> Option<u32> {
    captures.name(name).and_then(|m| m.as_str().parse().ok())
}

fn datetime_fields(captures: &Captures) -> Option<RawFields> {
    Some(RawFields {
        year: field(captures, "year")? as i32,
        month: field(captures, "month")?,
        day: field(captures, "day")?,
        hour: field(captures, "hour")?,
        minute: field(captures, "minute")?,
        second: field(captures, "second").unwrap_or(0),
        millisecond: field(captures, "milli").unwrap_or(0),
    })
}

pub(crate) fn datetime_separated(input: &str) -> Option<RawFields> {
    patterns()
        .datetime_separated
        .captures(input)
        .and_then(|captures| datetime_fields(&captures))
}

pub(crate) fn datetime_unseparated(input: &str) -> Option<RawFields> {
    patterns()
        .datetime_unseparated
        .captures(input)
        .and_then(|captures| datetime_fields(&captures))
}

fn date_fields(captures: &Captures) -> Option<RawFields> {
    Some(RawFields {
        year: field(captures, "year")? as i32,
        month: field(captures, "month")?,
        day: field(captures, "day")?,
        ..RawFields::default()
    })
}

pub(crate) fn date_separated(input: &str) -> Option<RawFields> {
    patterns()
        .date_separated
        .captures(input)
        .and_then(|captures| date_fields(&captures))
}

pub(crate) fn date_unseparated(input: &str) -> Option<RawFields> {
    patterns()
        .date_unseparated
        .captures(input)
        .and_then(|captures| date_fields(&captures))
}

fn time_fields(captures: &Captures) -> Option<RawFields> {
    Some(RawFields {
        hour: field(captures, "hour")?,
        minute: field(captures, "minute")?,
        second: field(captures, "second").unwrap_or(0),
        millisecond: field(captures, "milli").unwrap_or(0),
        ..RawFields::default()
    })
}

pub(crate) fn time_separated(input: &str) -> Option<RawFields> {
    patterns()
        .time_separated
        .captures(input)
        .and_then(|captures| time_fields(&captures))
}

pub(crate) fn time_unseparated(input: &str) -> Option<RawFields> {
    patterns()
        .time_unseparated
        .captures(input)
        .and_then(|captures| time_fields(&captures))
}

/// Finds an embedded unix timestamp: up to ten digits of epoch seconds,
/// optionally followed by exactly three millisecond digits. Any digits
/// beyond the thirteenth are noise.
pub(crate) fn epoch(input: &str) -> Option<EpochFields> {
    let captures = patterns().epoch.captures(input)?;
    let second = captures.name("second")?.as_str().parse().ok()?;
    let millisecond = captures
        .name("milli")
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    Some(EpochFields {
        second,
        millisecond,
    })
}
