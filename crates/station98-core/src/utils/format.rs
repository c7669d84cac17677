use chrono::{DateTime, Utc};

/// Parse an ISO-8601 timestamp as sent by the backend.
///
/// Accepts RFC 3339 with fractional seconds (`2025-01-01T10:00:00.123Z`)
/// and without (`2025-01-01T10:00:00Z`). The date and time must be joined
/// by an uppercase `T` and a UTC designator must be an uppercase `Z`;
/// surrounding whitespace is not allowed. Anything else is `None`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    // chrono's RFC 3339 parser also takes a space or lowercase separator
    if value.as_bytes().get(10) != Some(&b'T') || value.ends_with('z') {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Relative description of `at` as seen from `now`: "just now", "5m ago",
/// "3h ago", "2d ago", or "in 4h" for future times.
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();
    if minutes < 0 {
        return format!("in {}", span(-minutes));
    }
    if minutes < 1 {
        return "just now".to_string();
    }
    format!("{} ago", span(minutes))
}

fn span(minutes: i64) -> String {
    if minutes < 1 {
        "under a minute".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        if minutes % 60 >= 30 {
            // Round up: 1h 30m+ becomes 2h
            format!("{}h", hours + 1)
        } else {
            format!("{}h", hours)
        }
    } else {
        let days = minutes / 1440;
        if (minutes % 1440) / 60 >= 12 {
            format!("{}d", days + 1)
        } else {
            format!("{}d", days)
        }
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    if let Some(dt) = parse_timestamp(date) {
        dt.format("%b %d, %Y %H:%M UTC").to_string()
    } else if date.len() >= 10 {
        // Try to parse YYYY-MM-DD format
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}
