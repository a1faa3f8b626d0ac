use chrono::{DateTime, Local, TimeZone};

pub fn format_timestamp(timestamp: Option<i64>) -> String {
    let Some(ts) = timestamp else {
        return "-".to_string();
    };

    let datetime: DateTime<Local> = match Local.timestamp_millis_opt(ts).single() {
        Some(dt) => dt,
        None => return "-".to_string(),
    };

    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// First line of `text`, cut to `max_chars` characters.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let cut: String = line.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// First eight characters of an id, enough to tell rows apart.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_missing() {
        assert_eq!(format_timestamp(None), "-");
        assert_eq!(format_timestamp(Some(0)).len(), 19);
    }

    #[test]
    fn test_preview_text() {
        assert_eq!(preview_text("hello\nworld", 20), "hello");
        assert_eq!(preview_text("あいうえおかきくけこ", 6), "あいう...");
        assert_eq!(preview_text("", 10), "");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("00000000-0000-0000"), "00000000");
        assert_eq!(short_id("abc"), "abc");
    }
}
