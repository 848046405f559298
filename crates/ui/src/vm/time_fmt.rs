use chrono::{DateTime, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// `-` for missing timestamps, as in the history table.
#[must_use]
pub fn format_optional_datetime(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_owned(), format_datetime)
}

#[cfg(test)]
mod tests {
    use exam_core::time::fixed_now;

    use super::*;

    #[test]
    fn formats_minutes_precision() {
        assert_eq!(format_datetime(fixed_now()), "2023-11-14 22:13");
        assert_eq!(format_optional_datetime(None), "-");
    }
}
