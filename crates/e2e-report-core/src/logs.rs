//! Pod-log trimming for failure reports.
//!
//! Controller logs come in mixed formats (JSON, logfmt, klog, plain text) and
//! are not reliably parseable, so the filter only looks for the first
//! RFC3339 timestamp on each line. Once a line is at or after the cutoff, it
//! and everything after it are kept verbatim.

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use std::sync::OnceLock;

/// Prefix emitted for a line whose timestamp looks like RFC3339 but does not
/// parse.
pub const INVALID_TIME_PREFIX: &str = "Invalid Time, unable to parse date: ";

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2}))")
            .expect("timestamp pattern is a valid regex")
    })
}

/// Keep the lines of `logs` starting at the first one stamped at or after
/// `start`.
///
/// Lines before that point are dropped, except those carrying an unparseable
/// timestamp, which are replaced by an [`INVALID_TIME_PREFIX`] marker line.
pub fn filter_logs(logs: &str, start: DateTime<FixedOffset>) -> String {
    let lines: Vec<&str> = logs.split('\n').collect();
    let mut kept: Vec<String> = Vec::new();

    for (pos, line) in lines.iter().enumerate() {
        let Some(found) = timestamp_pattern().find(line) else {
            continue;
        };
        match DateTime::parse_from_rfc3339(found.as_str()) {
            Err(_) => kept.push(format!("{INVALID_TIME_PREFIX}{line}")),
            Ok(ts) if ts >= start => {
                kept.extend(lines[pos..].iter().map(|l| l.to_string()));
                break;
            }
            Ok(_) => {}
        }
    }

    kept.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn keeps_lines_from_first_timestamp_after_cutoff() {
        let logs = "no-timestamp\n2024-01-01T00:00:00Z start\n2024-01-01T00:00:05Z after";
        assert_eq!(
            filter_logs(logs, at("2024-01-01T00:00:03Z")),
            "2024-01-01T00:00:05Z after"
        );
    }

    #[test]
    fn equal_timestamp_is_kept_with_trailing_lines() {
        let logs = "2024-01-01T00:00:03Z exact\nplain continuation\n2024-01-01T00:00:01Z older";
        assert_eq!(
            filter_logs(logs, at("2024-01-01T00:00:03Z")),
            "2024-01-01T00:00:03Z exact\nplain continuation\n2024-01-01T00:00:01Z older"
        );
    }

    #[test]
    fn unparseable_timestamp_becomes_marker() {
        let logs = "2024-13-45T99:00:00Z bogus\n2024-01-01T00:00:05Z ok";
        assert_eq!(
            filter_logs(logs, at("2024-01-01T00:00:00Z")),
            "Invalid Time, unable to parse date: 2024-13-45T99:00:00Z bogus\n2024-01-01T00:00:05Z ok"
        );
    }

    #[test]
    fn offsets_and_fractions_are_compared_in_utc() {
        let logs = "{\"ts\":\"2024-01-01T01:00:02.5+01:00\",\"msg\":\"early\"}\n\
                    {\"ts\":\"2024-01-01T00:00:04.250Z\",\"msg\":\"late\"}";
        assert_eq!(
            filter_logs(logs, at("2024-01-01T00:00:03Z")),
            "{\"ts\":\"2024-01-01T00:00:04.250Z\",\"msg\":\"late\"}"
        );
    }

    #[test]
    fn nothing_after_cutoff() {
        assert_eq!(filter_logs("2020-01-01T00:00:00Z old", at("2024-01-01T00:00:00Z")), "");
    }
}
