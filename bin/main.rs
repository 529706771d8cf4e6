use chrono::{DateTime, Local};
use futil::{parse_date, parse_datetime, parse_time, parse_unix_time};

fn main() {
    let input: String = std::env::args().nth(1).unwrap_or("".to_string());
    report("datetime", parse_datetime(&input));
    report("date", parse_date(&input));
    report("time", parse_time(&input));
    report("epoch", parse_unix_time(&input));
}

fn report(label: &str, parsed: Option<DateTime<Local>>) {
    match parsed {
        Some(parsed) => println!("{:<8} {}", label, parsed.format("%+")),
        None => println!("{:<8} no match", label),
    }
}
