// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Fuzzy extraction of timestamps from noisy strings.
//!
//! The extractors do not parse a fixed format: they *find* temporal
//! information somewhere inside an arbitrary string, which makes them fit
//! for log names, snapshot names and export dumps. Four flavors exist:
//!
//! * [`parse_unix_time`] - an embedded unix epoch, e.g. `IMG_1553867509.jpg`
//! * [`parse_datetime`] - calendar date plus wall-clock time
//! * [`parse_date`] - calendar date only
//! * [`parse_time`] - wall-clock time only, anchored to year 0
//!
//! "Nothing found" is an ordinary outcome, so every extractor returns an
//! `Option` rather than an error. Extracted fields are checked against real
//! calendar rules before a timestamp is built; [`TimestampParser`] carries
//! that policy explicitly, while the free functions follow the process-wide
//! default (see [`set_require_datetime_field_valid`]).

mod builder;
mod grammar;
mod validate;

pub use validate::{is_datetime_field_valid, ValidationError};

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local};
use log::{debug, trace};

use grammar::RawFields;

static REQUIRE_FIELD_VALIDATION: AtomicBool = AtomicBool::new(true);

/// Sets the process-wide validation policy used by the free extraction
/// functions. Enabled by default; disabling it lets out-of-range fields
/// roll over instead of rejecting the match (month 22 of 2010 becomes
/// October 2011).
///
/// Prefer [`TimestampParser::with_field_validation`] when the policy should
/// not leak to unrelated callers.
pub fn set_require_datetime_field_valid(required: bool) {
    REQUIRE_FIELD_VALIDATION.store(required, Ordering::Relaxed);
}

/// Returns the process-wide validation policy.
pub fn require_datetime_field_valid() -> bool {
    REQUIRE_FIELD_VALIDATION.load(Ordering::Relaxed)
}

/// A configured extractor.
///
/// The only knob is whether captured fields must pass calendar validation
/// before a timestamp is built. The default parser validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampParser {
    validate_fields: bool,
}

impl Default for TimestampParser {
    fn default() -> Self {
        Self {
            validate_fields: true,
        }
    }
}

impl TimestampParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with an explicit validation policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use futil::timestamp::TimestampParser;
    ///
    /// let relaxed = TimestampParser::with_field_validation(false);
    /// let parsed = relaxed.parse_date("2010-22-23").unwrap();
    /// assert_eq!(parsed.date_naive().to_string(), "2011-10-23");
    ///
    /// assert_eq!(TimestampParser::new().parse_date("2010-22-23"), None);
    /// ```
    pub fn with_field_validation(validate_fields: bool) -> Self {
        Self { validate_fields }
    }

    /// Finds a date plus wall-clock time. The separated grammar is tried
    /// first; the fixed-width grammar is the fallback, also taken when the
    /// separated match fails validation.
    pub fn parse_datetime<S: AsRef<str>>(&self, input: S) -> Option<DateTime<Local>> {
        let input = input.as_ref();
        self.extract(input, "separated datetime", grammar::datetime_separated)
            .or_else(|| self.extract(input, "unseparated datetime", grammar::datetime_unseparated))
    }

    /// Finds a calendar date; the clock fields of the result are zero.
    pub fn parse_date<S: AsRef<str>>(&self, input: S) -> Option<DateTime<Local>> {
        let input = input.as_ref();
        self.extract(input, "separated date", grammar::date_separated)
            .or_else(|| self.extract(input, "unseparated date", grammar::date_unseparated))
    }

    /// Finds a wall-clock time, anchored to year 0, month 1, day 1.
    pub fn parse_time<S: AsRef<str>>(&self, input: S) -> Option<DateTime<Local>> {
        let input = input.as_ref();
        self.extract(input, "separated time", grammar::time_separated)
            .or_else(|| self.extract(input, "unseparated time", grammar::time_unseparated))
    }

    /// Finds an embedded unix timestamp. Epoch readings are absolute
    /// instants, not calendar fields, so the validation policy does not
    /// apply here.
    pub fn parse_unix_time<S: AsRef<str>>(&self, input: S) -> Option<DateTime<Local>> {
        let epoch = grammar::epoch(input.as_ref())?;
        builder::local_from_epoch(epoch.second, epoch.millisecond)
    }

    fn extract(
        &self,
        input: &str,
        label: &str,
        matcher: fn(&str) -> Option<RawFields>,
    ) -> Option<DateTime<Local>> {
        let fields = matcher(input)?;
        trace!("{} grammar matched in {:?}", label, input);

        if self.validate_fields {
            if let Err(reason) = validate::is_datetime_field_valid(
                fields.year,
                fields.month,
                fields.day,
                fields.hour,
                fields.minute,
                fields.second,
            ) {
                debug!("dropping {} candidate in {:?}: {}", label, input, reason);
                return None;
            }
        }

        builder::local_datetime(&fields)
    }
}

fn process_default() -> TimestampParser {
    TimestampParser::with_field_validation(require_datetime_field_valid())
}

/// Finds a date plus wall-clock time somewhere in `input` and returns it in
/// the local timezone.
///
/// Two grammars are recognized: a separated one like `2010-02-23 15:34:56.789`
/// (date separators `-`/`_`/`.`, a `-`/`_`/`.`/space/`T` boundary, time
/// separators `-`/`_`/`.`/`:`), and a fixed-width one like
/// `20100223153456.789` whose boundary is optional. Seconds are optional in
/// both; milliseconds count only when exactly three digits are present.
///
/// # Arguments
///
/// * `input` - Any string that may carry a datetime somewhere inside.
///
/// # Returns
///
/// * `Some(DateTime<Local>)` - The first datetime found.
/// * `None` - No grammar matched, or the fields failed validation.
///
/// # Examples
///
/// ```
/// use futil::parse_datetime;
///
/// let parsed = parse_datetime("abc2010-02-23 15:34:56.789ddd.jpg").unwrap();
/// assert_eq!(parsed.naive_local().to_string(), "2010-02-23 15:34:56.789");
///
/// // A bare date carries no time block.
/// assert_eq!(parse_datetime("2010-02-23"), None);
/// ```
pub fn parse_datetime<S: AsRef<str>>(input: S) -> Option<DateTime<Local>> {
    process_default().parse_datetime(input)
}

/// Finds a calendar date somewhere in `input`, accepting `2010-2-23` style
/// separated dates and fixed-width `20100223` runs. The clock fields of the
/// result are zero.
///
/// # Examples
///
/// ```
/// use futil::parse_date;
///
/// let parsed = parse_date("abc2010-2-23-15:34ddd.jpg").unwrap();
/// assert_eq!(parsed.date_naive().to_string(), "2010-02-23");
/// ```
pub fn parse_date<S: AsRef<str>>(input: S) -> Option<DateTime<Local>> {
    process_default().parse_date(input)
}

/// Finds a wall-clock time somewhere in `input`. The result is anchored to
/// year 0, month 1, day 1, which keeps times comparable with each other.
///
/// # Examples
///
/// ```
/// use futil::parse_time;
///
/// let parsed = parse_time("abc15:34-56.78ddd.jpg").unwrap();
/// // Two fraction digits are not milliseconds; the fraction is dropped.
/// assert_eq!(parsed.naive_local().time().to_string(), "15:34:56");
/// ```
pub fn parse_time<S: AsRef<str>>(input: S) -> Option<DateTime<Local>> {
    process_default().parse_time(input)
}

/// Finds an embedded unix timestamp: up to ten digits of epoch seconds,
/// optionally followed by exactly three millisecond digits. The reading is
/// an absolute UTC instant, returned in the local timezone.
///
/// # Examples
///
/// ```
/// use futil::parse_unix_time;
///
/// let parsed = parse_unix_time("snapshot_1553867509757.png").unwrap();
/// assert_eq!(parsed.timestamp_millis(), 1553867509757);
/// ```
pub fn parse_unix_time<S: AsRef<str>>(input: S) -> Option<DateTime<Local>> {
    process_default().parse_unix_time(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(parsed: Option<DateTime<Local>>) -> String {
        parsed
            .map(|t| t.naive_local().to_string())
            .unwrap_or_default()
    }

    #[test]
    fn datetime_prefers_the_separated_grammar() {
        assert_eq!(
            naive(parse_datetime("abc2010-02-23 15:34:56.789ddd.jpg")),
            "2010-02-23 15:34:56.789"
        );
        assert_eq!(
            naive(parse_datetime("abc20100223-1534ddd.jpg")),
            "2010-02-23 15:34:00"
        );
        assert_eq!(
            naive(parse_datetime("20100223153456789")),
            "2010-02-23 15:34:56.789"
        );
    }

    #[test]
    fn datetime_requires_a_time_block() {
        assert_eq!(parse_datetime("2010-02-23"), None);
        assert_eq!(parse_datetime("20100223"), None);
    }

    #[test]
    fn invalid_separated_match_falls_back_to_the_fixed_width_grammar() {
        // Month 99 kills the separated candidate; the fixed-width run
        // later in the string still qualifies.
        assert_eq!(
            naive(TimestampParser::new().parse_datetime("2010-99-23 15:34 20100223-1534")),
            "2010-02-23 15:34:00"
        );
    }

    #[test]
    fn date_ignores_a_trailing_time_block() {
        assert_eq!(naive(parse_date("abc2010-2-23-15:34ddd.jpg")), "2010-02-23 00:00:00");
    }

    #[test]
    fn time_anchors_to_year_zero() {
        assert_eq!(naive(parse_time("abc15:34-56.78ddd.jpg")), "0000-01-01 15:34:56");
    }

    #[test]
    fn unix_time_drops_a_short_fraction() {
        let parsed = parse_unix_time("155386750975abcd").unwrap();
        assert_eq!(parsed.timestamp(), 1553867509);
        assert_eq!(parsed.timestamp_subsec_millis(), 0);
    }

    #[test]
    fn leap_day_parses_only_in_leap_years() {
        let parser = TimestampParser::new();
        assert_eq!(naive(parser.parse_date("2024-02-29")), "2024-02-29 00:00:00");
        assert_eq!(parser.parse_date("2023-02-29"), None);
    }

    #[test]
    fn relaxed_parsers_roll_fields_over() {
        let relaxed = TimestampParser::with_field_validation(false);
        assert_eq!(naive(relaxed.parse_date("x2010-22-23")), "2011-10-23 00:00:00");
        assert_eq!(
            naive(relaxed.parse_datetime("201022231234")),
            "2011-10-23 12:34:00"
        );
    }

    // The only test that touches the process-wide flag; every other test
    // pins its policy through a TimestampParser where the outcome depends
    // on it.
    #[test]
    fn process_policy_gates_the_free_functions() {
        assert_eq!(parse_date("x2010-22-23"), None);

        set_require_datetime_field_valid(false);
        let relaxed = parse_date("x2010-22-23");
        set_require_datetime_field_valid(true);

        assert_eq!(
            relaxed.map(|t| t.date_naive().to_string()),
            Some("2011-10-23".to_string())
        );
        assert!(require_datetime_field_valid());
        assert_eq!(parse_date("x2010-22-23"), None);
    }
}
