use chrono::{DateTime, Local, Utc};

/// ISO-8601 without fractional seconds or offset
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn report_timestamp(at: DateTime<Utc>) -> String {
    at.format(REPORT_TIMESTAMP_FORMAT).to_string()
}

pub fn now_report_timestamp() -> String {
    report_timestamp(Utc::now())
}

/// Wall-clock time used in log prefixes
pub fn now_log_clock() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
