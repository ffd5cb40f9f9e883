use chrono::{Local, NaiveDate};

/// Sheet dates are plain `YYYY-MM-DD` strings.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a sheet date for display ("January 5, 2026").
/// Returns the input unchanged when it can't be parsed.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(d) => d.format("%B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// True when the program starts within the next seven days, today
/// inclusive. Unparseable dates are never "soon".
pub fn starts_within_week(date: &str) -> bool {
    starts_within_week_at(date, Local::now().date_naive())
}

pub fn starts_within_week_at(date: &str, today: NaiveDate) -> bool {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(d) => {
            let days = d.signed_duration_since(today).num_days();
            (0..=7).contains(&days)
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2099-01-01"), "January 1, 2099");
        assert_eq!(format_date("2024-11-30"), "November 30, 2024");
    }

    #[test]
    fn test_format_date_passthrough_on_garbage() {
        assert_eq!(format_date("soon"), "soon");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_starts_within_week_boundaries() {
        let today = day(2024, 6, 10);
        assert!(starts_within_week_at("2024-06-10", today));
        assert!(starts_within_week_at("2024-06-17", today));
        assert!(!starts_within_week_at("2024-06-18", today));
        assert!(!starts_within_week_at("2024-06-09", today));
    }

    #[test]
    fn test_starts_within_week_bad_date() {
        assert!(!starts_within_week_at("not-a-date", day(2024, 6, 10)));
    }
}
