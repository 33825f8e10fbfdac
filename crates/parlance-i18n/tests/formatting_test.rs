//! Integration tests for date, number and list formatting

use chrono::{Datelike, Duration, Utc};
use parlance_common::test_utils::mock_timestamp;
use parlance_config::I18nConfig;
use parlance_i18n::{FormatDateOptions, Locale, Registry};
use std::sync::Arc;

fn english() -> Arc<Locale> {
    Registry::new(&I18nConfig::default()).unwrap().get("en_US").unwrap()
}

fn month_day(locale: &Locale, date: chrono::DateTime<Utc>) -> String {
    format!("{} {}", locale.months()[date.month0() as usize], date.day())
}

#[test]
fn test_format_date_full() {
    let locale = english();
    let date = mock_timestamp(2013, 4, 28, 18, 35, 0);
    assert_eq!(
        locale.format_date(date, FormatDateOptions::full()),
        "April 28, 2013 at 6:35 pm"
    );
}

#[test]
fn test_format_date_relative() {
    let locale = english();
    let now = Utc::now();
    let options = FormatDateOptions::default();

    assert_eq!(
        locale.format_date_at(now - Duration::seconds(2), now, options),
        "2 seconds ago"
    );
    assert_eq!(locale.format_date(now - Duration::minutes(2), options), "2 minutes ago");
    assert_eq!(locale.format_date(now - Duration::hours(2), options), "2 hours ago");
}

#[test]
fn test_format_date_shorter() {
    let locale = english();
    let now = Utc::now();
    let options = FormatDateOptions::shorter();

    assert_eq!(locale.format_date_at(now - Duration::days(1), now, options), "yesterday");

    let two_days = now - Duration::days(2);
    let weekday = &locale.weekdays()[two_days.weekday().num_days_from_monday() as usize];
    assert_eq!(&locale.format_date_at(two_days, now, options), weekday);

    let days_300 = now - Duration::days(300);
    assert_eq!(locale.format_date_at(days_300, now, options), month_day(&locale, days_300));

    let days_500 = now - Duration::days(500);
    assert_eq!(
        locale.format_date_at(days_500, now, options),
        format!("{}, {}", month_day(&locale, days_500), days_500.year())
    );
}

#[test]
fn test_format_day() {
    let locale = english();
    let date = mock_timestamp(2013, 4, 28, 18, 35, 0);
    assert_eq!(locale.format_day(date, 0, true), "Sunday, April 28");
    assert_eq!(locale.format_day(date, 0, false), "April 28");
}

#[test]
fn test_friendly_number() {
    assert_eq!(english().friendly_number(1_000_000), "1,000,000");
}

#[test]
fn test_list() {
    let locale = english();
    assert_eq!(locale.list::<&str>(&[]), "");
    assert_eq!(locale.list(&["A"]), "A");
    assert_eq!(locale.list(&["A", "B"]), "A and B");
    assert_eq!(locale.list(&["A", "B", "C"]), "A, B and C");
}
