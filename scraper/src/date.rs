use chrono::{Datelike, NaiveDate};

pub const MONTHS: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September", "Oktober",
    "November", "Dezember",
];

/// Parse a German first-publication date as written in the overview table.
///
/// Accepted shapes, each optionally led by a weekday such as `Montag,`:
/// - `3. Juni 1981` gives that exact day
/// - `Juni 1981` gives the last day of the month
/// - `1981` gives the 31st of December
///
/// Anything else yields `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts: Vec<&str> = text.split_whitespace().collect();
    if parts.first().map_or(false, |first| first.contains(',')) {
        parts.remove(0);
    }

    match parts.as_slice() {
        [day, month, year] => {
            let day = day.trim_end_matches('.').parse::<u32>().ok()?;
            NaiveDate::from_ymd_opt(parse_year(year)?, month_number(month)?, day)
        }
        [month, year] => {
            let year = parse_year(year)?;
            let month = month_number(month)?;
            NaiveDate::from_ymd_opt(year, month, get_last_day_of_month(year, month)?)
        }
        [year] => NaiveDate::from_ymd_opt(parse_year(year)?, 12, 31),
        _ => None,
    }
}

/// 1-based month number for a German month name. Case-sensitive.
pub fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|month| *month == name)
        .map(|index| index as u32 + 1)
}

/// Get the last day of a month
pub fn get_last_day_of_month(year: i32, month: u32) -> Option<u32> {
    // The last day of the month is the day before the first day of the next month
    let first_day_of_next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month.checked_add(1)?, 1)?
    };

    let last_day = first_day_of_next_month.pred_opt()?;
    Some(last_day.day())
}

/// Years are written with exactly four digits.
fn parse_year(token: &str) -> Option<i32> {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<i32>().ok()
}
