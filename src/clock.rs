//! Time, date and greeting formatting

use chrono::{Datelike, Timelike};

use crate::constants::day_part;
use crate::state::TimeFormat;

/// Local-time window used for greetings and quote selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    pub fn from_hour(hour: u32) -> Self {
        if (day_part::MORNING_START..day_part::AFTERNOON_START).contains(&hour) {
            DayPart::Morning
        } else if (day_part::AFTERNOON_START..day_part::EVENING_START).contains(&hour) {
            DayPart::Afternoon
        } else if (day_part::EVENING_START..day_part::NIGHT_START).contains(&hour) {
            DayPart::Evening
        } else {
            DayPart::Night
        }
    }
}

pub fn greeting(hour: u32) -> &'static str {
    match DayPart::from_hour(hour) {
        DayPart::Morning => "Good morning",
        DayPart::Afternoon => "Good afternoon",
        DayPart::Evening => "Good evening",
        DayPart::Night => "Up late?",
    }
}

/// `h:mm` / `HH:mm` clock text, without the seconds suffix
pub fn format_time(time: &impl Timelike, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwelveHour => {
            let (_, hour) = time.hour12();
            format!("{}:{:02}", hour, time.minute())
        }
        TimeFormat::TwentyFourHour => format!("{:02}:{:02}", time.hour(), time.minute()),
    }
}

/// `:ss` suffix, rendered smaller than the main clock text
pub fn format_seconds(time: &impl Timelike) -> String {
    format!(":{:02}", time.second())
}

/// `Monday, Nov 4`
pub fn format_date(date: &impl Datelike) -> String {
    format!(
        "{}, {} {}",
        weekday_name(date.weekday()),
        month_abbrev(date.month()),
        date.day()
    )
}

fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;
    match weekday {
        Mon => "Monday",
        Tue => "Tuesday",
        Wed => "Wednesday",
        Thu => "Thursday",
        Fri => "Friday",
        Sat => "Saturday",
        Sun => "Sunday",
    }
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn time(hour: u32, min: u32, sec: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, sec).unwrap()
    }

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting(4), "Up late?");
        assert_eq!(greeting(5), "Good morning");
        assert_eq!(greeting(11), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(16), "Good afternoon");
        assert_eq!(greeting(17), "Good evening");
        assert_eq!(greeting(21), "Good evening");
        assert_eq!(greeting(22), "Up late?");
        assert_eq!(greeting(0), "Up late?");
    }

    #[test]
    fn test_twelve_hour_format() {
        assert_eq!(format_time(&time(0, 5, 0), TimeFormat::TwelveHour), "12:05");
        assert_eq!(format_time(&time(9, 30, 0), TimeFormat::TwelveHour), "9:30");
        assert_eq!(format_time(&time(12, 0, 0), TimeFormat::TwelveHour), "12:00");
        assert_eq!(format_time(&time(23, 59, 0), TimeFormat::TwelveHour), "11:59");
    }

    #[test]
    fn test_twenty_four_hour_format() {
        assert_eq!(
            format_time(&time(0, 5, 0), TimeFormat::TwentyFourHour),
            "00:05"
        );
        assert_eq!(
            format_time(&time(23, 59, 0), TimeFormat::TwentyFourHour),
            "23:59"
        );
    }

    #[test]
    fn test_seconds_suffix_zero_padded() {
        assert_eq!(format_seconds(&time(10, 0, 7)), ":07");
        assert_eq!(format_seconds(&time(10, 0, 42)), ":42");
    }

    #[test]
    fn test_date_format() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 4).unwrap();
        assert_eq!(format_date(&date), "Monday, Nov 4");

        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(format_date(&date), "Wednesday, Jan 1");
    }
}
