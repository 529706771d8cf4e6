#![no_main]

use libfuzzer_sys::fuzz_target;

use futil::TimestampParser;

fuzz_target!(|data: &[u8]| {
    let s = std::str::from_utf8(data).unwrap_or("");
    let _ = futil::parse_datetime(s);
    let _ = futil::parse_date(s);
    let _ = futil::parse_time(s);
    let _ = futil::parse_unix_time(s);

    let unchecked = TimestampParser::with_field_validation(false);
    let _ = unchecked.parse_datetime(s);
    let _ = unchecked.parse_date(s);
    let _ = unchecked.parse_time(s);
});
