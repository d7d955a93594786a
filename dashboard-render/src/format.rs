//! Text formatting helpers shared by the section renderers.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use ecoearth_core::PostTimestamp;
use std::fmt::Write;

pub const INVALID_DATE: &str = "Invalid Date";
const FALLBACK_TIME_FORMAT: &str = "%H:%M";

/// Plain number text: integers print without a fractional part.
pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// Integer with en-US thousands separators, e.g. `15200` -> `15,200` and
/// `-3` -> `-3`.
pub fn group_thousands(value: impl Into<i128>) -> String {
    let value = value.into();
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Badge tag for a trending topic: lowercased, with only the first space removed.
pub fn topic_tag(topic: &str) -> String {
    topic.to_lowercase().replacen(' ', "", 1)
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Uppercases the first letter of every word.
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }
    out
}

pub fn parse_post_time(timestamp: &PostTimestamp) -> Option<DateTime<Local>> {
    match timestamp {
        PostTimestamp::EpochMillis(millis) if millis.is_finite() => {
            Local.timestamp_millis_opt(*millis as i64).single()
        }
        PostTimestamp::EpochMillis(_) => None,
        PostTimestamp::Text(text) => {
            if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
                return Some(with_offset.with_timezone(&Local));
            }
            // Offset-less timestamps are local wall-clock time.
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
                .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
                .ok()
                .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        }
    }
}

/// Local hour:minute text for a post, or `Invalid Date`.
pub fn format_post_time(timestamp: Option<&PostTimestamp>, time_format: &str) -> String {
    let Some(time) = timestamp.and_then(parse_post_time) else {
        return INVALID_DATE.to_string();
    };

    let mut out = String::new();
    if write!(out, "{}", time.format(time_format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", time.format(FALLBACK_TIME_FORMAT));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(89200), "89,200");
        assert_eq!(group_thousands(1234567u64), "1,234,567");
        assert_eq!(group_thousands(-3i64), "-3");
        assert_eq!(group_thousands(-1234567i64), "-1,234,567");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(82.0), "82");
        assert_eq!(format_number(68.5), "68.5");
    }

    #[test]
    fn test_topic_tag_removes_only_first_space() {
        assert_eq!(topic_tag("Ocean Clean Up"), "oceanclean up");
        assert_eq!(topic_tag("Climate Change"), "climatechange");
        assert_eq!(topic_tag("Biodiversity"), "biodiversity");
        assert_eq!(topic_tag(" Leading Space"), "leading space");
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("ünïcödé", 3), "ünï");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("reddit"), "Reddit");
        assert_eq!(capitalize_words("news api"), "News Api");
    }

    #[test]
    fn test_format_post_time_naive_is_local() {
        let ts = PostTimestamp::Text("2024-05-01T14:05:00.123456".to_string());
        assert_eq!(format_post_time(Some(&ts), "%H:%M"), "14:05");

        let ts = PostTimestamp::Text("2024-05-01T09:30".to_string());
        assert_eq!(format_post_time(Some(&ts), "%H:%M"), "09:30");
    }

    #[test]
    fn test_format_post_time_with_offset() {
        let ts = PostTimestamp::Text("2024-05-01T14:05:00Z".to_string());
        let expected = DateTime::parse_from_rfc3339("2024-05-01T14:05:00Z")
            .unwrap()
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string();
        assert_eq!(format_post_time(Some(&ts), "%H:%M"), expected);
    }

    #[test]
    fn test_format_post_time_epoch_millis() {
        let millis = 1_714_572_300_000_i64;
        let expected = Local
            .timestamp_millis_opt(millis)
            .single()
            .unwrap()
            .format("%H:%M")
            .to_string();
        let ts = PostTimestamp::EpochMillis(millis as f64);
        assert_eq!(format_post_time(Some(&ts), "%H:%M"), expected);
    }

    #[test]
    fn test_format_post_time_invalid() {
        assert_eq!(format_post_time(None, "%H:%M"), INVALID_DATE);
        let ts = PostTimestamp::Text("yesterday".to_string());
        assert_eq!(format_post_time(Some(&ts), "%H:%M"), INVALID_DATE);
    }

    #[test]
    fn test_bad_time_format_falls_back() {
        let ts = PostTimestamp::Text("2024-05-01T14:05:00".to_string());
        assert_eq!(format_post_time(Some(&ts), "%Q"), "14:05");
    }
}
