// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Shared assertion helpers for the extraction tests.
//!
//! Assertions compare the wall-clock representation of the extracted
//! instant, which reads the same in every host timezone.

#![allow(dead_code)]

use futil::{parse_date, parse_datetime, parse_time, parse_unix_time};

pub fn check_datetime(input: &str, expected: &str) {
    let parsed = match parse_datetime(input) {
        Some(parsed) => parsed,
        None => panic!("No timestamp extracted from value '{input}'"),
    };
    assert_eq!(
        parsed.naive_local().to_string(),
        expected,
        "Input value: {input}"
    );
}

pub fn check_no_datetime(input: &str) {
    assert_eq!(parse_datetime(input), None, "Input value: {input}");
}

pub fn check_date(input: &str, expected: &str) {
    let parsed = match parse_date(input) {
        Some(parsed) => parsed,
        None => panic!("No date extracted from value '{input}'"),
    };
    assert_eq!(
        parsed.date_naive().to_string(),
        expected,
        "Input value: {input}"
    );
}

pub fn check_no_date(input: &str) {
    assert_eq!(parse_date(input), None, "Input value: {input}");
}

pub fn check_time(input: &str, expected: &str) {
    let parsed = match parse_time(input) {
        Some(parsed) => parsed,
        None => panic!("No time extracted from value '{input}'"),
    };
    assert_eq!(parsed.time().to_string(), expected, "Input value: {input}");
}

pub fn check_no_time(input: &str) {
    assert_eq!(parse_time(input), None, "Input value: {input}");
}

pub fn check_epoch(input: &str, expected_millis: i64) {
    let parsed = match parse_unix_time(input) {
        Some(parsed) => parsed,
        None => panic!("No epoch timestamp extracted from value '{input}'"),
    };
    assert_eq!(
        parsed.timestamp_millis(),
        expected_millis,
        "Input value: {input}"
    );
}

pub fn check_no_epoch(input: &str) {
    assert_eq!(parse_unix_time(input), None, "Input value: {input}");
}
