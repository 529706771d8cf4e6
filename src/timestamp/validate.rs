// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::error::Error;
use std::fmt::{self, Display};

/// The first calendar rule a field tuple violates, with the offending value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Month(u32),
    Hour(u32),
    Minute(u32),
    Second(u32),
    Day(u32),
    LeapYearDay(u32),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Month(value) => write!(f, "invalid month: {}", value),
            ValidationError::Hour(value) => write!(f, "invalid hour: {}", value),
            ValidationError::Minute(value) => write!(f, "invalid minute: {}", value),
            ValidationError::Second(value) => write!(f, "invalid second: {}", value),
            ValidationError::Day(value) => write!(f, "invalid day: {}", value),
            ValidationError::LeapYearDay(value) => {
                write!(f, "invalid day for leap year: {}", value)
            }
        }
    }
}

impl Error for ValidationError {}

/// Checks a calendar/clock field tuple against real calendar rules.
///
/// Rules are checked in a fixed order and the first violation wins:
/// month 1-12, hour 0-23, minute 0-59, second 0-59, day 1-31, day at most
/// 30 in April, June, September and November, and February capped at 29 in
/// leap years and 28 otherwise.
///
/// # Examples
///
/// ```
/// use futil::timestamp::{is_datetime_field_valid, ValidationError};
///
/// assert!(is_datetime_field_valid(2024, 2, 29, 0, 0, 0).is_ok());
/// assert_eq!(
///     is_datetime_field_valid(2023, 2, 29, 0, 0, 0),
///     Err(ValidationError::Day(29))
/// );
/// ```
pub fn is_datetime_field_valid(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<(), ValidationError> {
    if !(1..=12).contains(&month) {
        Err(ValidationError::Month(month))
    } else if hour > 23 {
        Err(ValidationError::Hour(hour))
    } else if minute > 59 {
        Err(ValidationError::Minute(minute))
    } else if second > 59 {
        Err(ValidationError::Second(second))
    } else if !(1..=31).contains(&day) {
        Err(ValidationError::Day(day))
    } else if day > 30 && matches!(month, 4 | 6 | 9 | 11) {
        Err(ValidationError::Day(day))
    } else if month == 2 {
        if is_leap_year(year) {
            if day > 29 {
                Err(ValidationError::LeapYearDay(day))
            } else {
                Ok(())
            }
        } else if day > 28 {
            Err(ValidationError::Day(day))
        } else {
            Ok(())
        }
    } else {
        Ok(())
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}
