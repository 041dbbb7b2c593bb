use chrono::NaiveDate;

use crate::date::{get_last_day_of_month, month_number, parse_date};

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

#[test]
fn test_full_date_with_weekday() {
    assert_eq!(parse_date("Montag, 3. Juni 1981"), ymd(1981, 6, 3));
    assert_eq!(parse_date("Freitag, 8. September 1961"), ymd(1961, 9, 8));
}

#[test]
fn test_full_date_without_weekday() {
    assert_eq!(parse_date("24. Dezember 1999"), ymd(1999, 12, 24));
    assert_eq!(parse_date("  1. März 2001 \n"), ymd(2001, 3, 1));
}

#[test]
fn test_month_and_year_defaults_to_last_day() {
    assert_eq!(parse_date("Juni 1981"), ymd(1981, 6, 30));
    assert_eq!(parse_date("Februar 1980"), ymd(1980, 2, 29));
    assert_eq!(parse_date("Februar 1981"), ymd(1981, 2, 28));
    assert_eq!(parse_date("Dezember 1970"), ymd(1970, 12, 31));
}

#[test]
fn test_year_only_defaults_to_new_years_eve() {
    assert_eq!(parse_date("1975"), ymd(1975, 12, 31));
}

#[test]
fn test_invalid_dates_are_absent() {
    assert_eq!(parse_date("unbekannt"), None);
    assert_eq!(parse_date("Juni neunzehn"), None);
    assert_eq!(parse_date("3. Juni 19x1"), None);
    assert_eq!(parse_date("3. june 1981"), None);
    assert_eq!(parse_date("3. juni 1981"), None);
    assert_eq!(parse_date("31. Februar 1981"), None);
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("Montag,"), None);
    assert_eq!(parse_date("am 3. Juni 1981 erschienen"), None);
}

#[test]
fn test_year_must_have_four_digits() {
    assert_eq!(parse_date("Dezember 2147483647"), None);
    assert_eq!(parse_date("2147483647"), None);
    assert_eq!(parse_date("3. Juni 19810"), None);
    assert_eq!(parse_date("Juni +1981"), None);
    assert_eq!(parse_date("-044"), None);
    assert_eq!(parse_date("981"), None);
}

#[test]
fn test_month_names() {
    assert_eq!(month_number("Januar"), Some(1));
    assert_eq!(month_number("März"), Some(3));
    assert_eq!(month_number("Dezember"), Some(12));
    assert_eq!(month_number("Maerz"), None);
}

#[test]
fn test_last_day_of_month() {
    assert_eq!(get_last_day_of_month(2023, 4), Some(30));
    assert_eq!(get_last_day_of_month(2024, 2), Some(29));
    assert_eq!(get_last_day_of_month(2023, 12), Some(31));
    assert_eq!(get_last_day_of_month(2023, 13), None);
    assert_eq!(get_last_day_of_month(i32::MAX, 12), None);
    assert_eq!(get_last_day_of_month(2023, u32::MAX), None);
}
