//! Clock-time and week arithmetic for the calendar grid

use chrono::{Datelike, Duration, NaiveDate};

/// Convert a 24-hour "HH:MM" string to minutes since midnight.
/// Returns `None` for anything that is not two colon-separated integers
/// with hours in 0-23 and minutes in 0-59.
pub fn time_to_minutes(time: &str) -> Option<i32> {
    let (hours, minutes) = time.split_once(':')?;
    let hours = hours.parse::<i32>().ok()?;
    let minutes = minutes.parse::<i32>().ok()?;

    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }

    Some(hours * 60 + minutes)
}

/// The seven days of the calendar week containing `reference`, Sunday first.
pub fn week_days(reference: NaiveDate) -> [NaiveDate; 7] {
    let sunday = reference - Duration::days(reference.weekday().num_days_from_sunday() as i64);
    std::array::from_fn(|i| sunday + Duration::days(i as i64))
}

/// ISO "YYYY-MM-DD" key used for day partitioning and the service's
/// notion of "today".
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn minutes_at_bounds() {
        assert_eq!(time_to_minutes("00:00"), Some(0));
        assert_eq!(time_to_minutes("23:59"), Some(1439));
        assert_eq!(time_to_minutes("08:00"), Some(480));
    }

    #[test]
    fn minutes_strictly_monotonic_over_the_day() {
        let mut previous = -1;
        for hour in 0..24 {
            for minute in 0..60 {
                let formatted = format!("{:02}:{:02}", hour, minute);
                let value = time_to_minutes(&formatted).unwrap();
                assert!(value > previous, "{} did not increase", formatted);
                previous = value;
            }
        }
    }

    #[test]
    fn malformed_times_are_rejected() {
        for input in ["", "10", "10:", ":30", "24:00", "12:60", "1a:00", "10:00:00", "-1:30"] {
            assert_eq!(time_to_minutes(input), None, "{:?} should not parse", input);
        }
    }

    #[test]
    fn week_is_seven_consecutive_days_containing_reference() {
        let reference = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(); // a Wednesday
        let days = week_days(reference);

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].weekday(), Weekday::Sun);
        for pair in days.windows(2) {
            assert_eq!(pair[1], pair[0] + Duration::days(1));
        }
        assert!(days.contains(&reference));
    }

    #[test]
    fn week_is_stable_across_days_of_the_same_week() {
        let wednesday = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        let expected = week_days(wednesday);
        for offset in -3..=3 {
            let sibling = wednesday + Duration::days(offset);
            assert_eq!(week_days(sibling), expected);
        }
    }

    #[test]
    fn date_key_is_iso_formatted() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(date_key(date), "2025-03-04");
    }
}
