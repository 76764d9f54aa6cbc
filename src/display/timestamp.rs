use chrono::{DateTime, Local, NaiveDateTime};

/// Render a message timestamp for the list row
///
/// Messages from today show as a short time, older ones as month/day.
/// An absent or unparseable timestamp renders as an empty string.
pub fn display_timestamp(date: Option<&str>) -> String {
    match date {
        Some(date) => format_relative(date, Local::now()),
        None => String::new(),
    }
}

fn format_relative(date: &str, now: DateTime<Local>) -> String {
    let Some(local) = parse_timestamp(date) else {
        return String::new();
    };

    if local.date_naive() == now.date_naive() {
        local.format("%H:%M").to_string()
    } else {
        local.format("%b %-d").to_string()
    }
}

fn parse_timestamp(date: &str) -> Option<DateTime<Local>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Some(parsed.with_timezone(&Local));
    }

    // Offset-less ISO timestamps are taken as local time
    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .and_then(|naive| naive.and_local_timezone(Local).single())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_same_day_renders_time() {
        let now = Local::now();
        let rendered = format_relative(&now.to_rfc3339(), now);
        assert_eq!(rendered, now.format("%H:%M").to_string());
        assert!(rendered.contains(':'));
    }

    #[test]
    fn test_other_day_renders_date() {
        let now = Local::now();
        let then = now - Duration::days(40);
        let rendered = format_relative(&then.to_rfc3339(), now);
        assert_eq!(rendered, then.format("%b %-d").to_string());
        assert!(!rendered.contains(':'));
    }

    #[test]
    fn test_unparseable_renders_empty() {
        let rendered = format_relative("not-a-date", Local::now());
        assert_eq!(rendered, "");
    }

    #[test]
    fn test_absent_renders_empty() {
        assert_eq!(display_timestamp(None), "");
    }

    #[test]
    fn test_offsetless_iso_accepted() {
        let rendered = format_relative("2025-07-01T09:30:00", Local::now());
        assert!(!rendered.is_empty());
    }
}
