//! Locale-aware date, number and list formatting
//!
//! Every phrase and template used here is passed through the locale's
//! catalog before placeholders are filled in, so catalogs can localize the
//! output. Placeholders use the `%(name)s` / `%(name)d` syntax.

use crate::locale::Locale;
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Timelike, Utc};
use std::fmt::Display;

/// Future instants closer than this are treated as "now" in relative mode.
const CLOCK_SKEW_SECONDS: i64 = 60;
/// Below this many days, `shorter` renders just the weekday.
const WEEKDAY_WINDOW_DAYS: i64 = 7;
/// Below this many days, `shorter` omits the year.
const SAME_YEAR_WINDOW_DAYS: i64 = 365;

/// Options for [`Locale::format_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDateOptions {
    /// Minutes to subtract from UTC to get local time.
    pub gmt_offset: i32,
    /// Allow "N seconds ago" style and "yesterday" output.
    pub relative: bool,
    /// Prefer the shortest calendar rendering.
    pub shorter: bool,
    /// Always render the absolute date with time of day.
    pub full_format: bool,
}

impl Default for FormatDateOptions {
    fn default() -> Self {
        Self {
            gmt_offset: 0,
            relative: true,
            shorter: false,
            full_format: false,
        }
    }
}

impl FormatDateOptions {
    /// Absolute date with time of day.
    pub fn full() -> Self {
        Self {
            full_format: true,
            ..Self::default()
        }
    }

    /// Relative output with the short calendar tiers.
    pub fn shorter() -> Self {
        Self {
            shorter: true,
            ..Self::default()
        }
    }

    /// Sets the offset in minutes west of UTC.
    #[must_use]
    pub fn with_gmt_offset(mut self, minutes: i32) -> Self {
        self.gmt_offset = minutes;
        self
    }

    /// Enables or disables relative phrasing.
    #[must_use]
    pub fn with_relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }
}

/// Replaces `%(name)s` and `%(name)d` placeholders with the matching
/// argument and `%%` with `%`. Unknown placeholders are left as written.
pub fn interpolate(template: &str, args: &[(&str, &dyn Display)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        if let Some(after) = tail.strip_prefix("%%") {
            out.push('%');
            rest = after;
            continue;
        }

        let placeholder = tail.strip_prefix("%(").and_then(|inner| {
            let close = inner.find(')')?;
            let name = &inner[..close];
            let conversion = inner[close + 1..].chars().next().filter(|c| matches!(c, 's' | 'd'))?;
            let (_, value) = args.iter().find(|(key, _)| *key == name)?;
            Some((value, "%(".len() + close + 1 + conversion.len_utf8()))
        });

        match placeholder {
            Some((value, consumed)) => {
                out.push_str(&value.to_string());
                rest = &tail[consumed..];
            }
            None => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn twelve_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        hour => hour,
    }
}

impl Locale {
    /// Formats `date` relative to the current time.
    ///
    /// Tiers, first match wins: seconds, minutes and hours ago (relative
    /// mode, under a day elapsed); "yesterday"; the weekday within a week;
    /// "Month Day" within a year; otherwise "Month Day, Year". The three
    /// calendar tiers only apply with `shorter`. `full_format` renders
    /// "Month Day, Year at time" instead.
    ///
    /// Instants less than a minute in the future count as now in relative
    /// mode; anything further ahead is rendered in full format.
    pub fn format_date(&self, date: DateTime<Utc>, options: FormatDateOptions) -> String {
        self.format_date_at(date, Utc::now(), options)
    }

    /// [`Locale::format_date`] against an explicit "now".
    pub fn format_date_at(
        &self,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
        options: FormatDateOptions,
    ) -> String {
        let mut date = date;
        let mut full_format = options.full_format;
        if date > now {
            if options.relative && (date - now).num_seconds() < CLOCK_SKEW_SECONDS {
                date = now;
            } else {
                full_format = true;
            }
        }

        let offset = Duration::minutes(i64::from(options.gmt_offset));
        let local_date = (date - offset).naive_utc();
        let local_yesterday = (now - offset).naive_utc() - Duration::hours(24);
        let difference = now - date;
        let seconds = difference.num_seconds();
        let days = difference.num_days();

        let template = if full_format {
            "%(month_name)s %(day)s, %(year)s at %(time)s"
        } else {
            if options.relative {
                if seconds < 60 {
                    return self.elapsed("1 second ago", "%(seconds)d seconds ago", "seconds", seconds);
                }
                if seconds < 60 * 60 {
                    return self.elapsed("1 minute ago", "%(minutes)d minutes ago", "minutes", seconds / 60);
                }
                if seconds < 24 * 60 * 60 {
                    return self.elapsed("1 hour ago", "%(hours)d hours ago", "hours", seconds / (60 * 60));
                }
            }

            if options.shorter && options.relative && days == 1 && local_date.date() == local_yesterday.date() {
                "yesterday"
            } else if options.shorter && days < WEEKDAY_WINDOW_DAYS {
                "%(weekday)s"
            } else if options.shorter && days < SAME_YEAR_WINDOW_DAYS {
                "%(month_name)s %(day)s"
            } else {
                "%(month_name)s %(day)s, %(year)s"
            }
        };

        self.render(template, local_date)
    }

    /// "Weekday, Month Day" or, without `dow`, "Month Day".
    pub fn format_day(&self, date: DateTime<Utc>, gmt_offset: i32, dow: bool) -> String {
        let local_date = (date - Duration::minutes(i64::from(gmt_offset))).naive_utc();
        let template = if dow {
            "%(weekday)s, %(month_name)s %(day)s"
        } else {
            "%(month_name)s %(day)s"
        };
        self.render(template, local_date)
    }

    /// Groups digits with commas for English locales; other locales get
    /// the plain integer.
    pub fn friendly_number(&self, value: i64) -> String {
        if self.code().language() != "en" {
            return value.to_string();
        }

        let digits = value.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if value < 0 {
            grouped.push('-');
        }
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        grouped
    }

    /// Joins items as "A, B and C". Two items get no comma; one item is
    /// returned as is; none yields an empty string.
    pub fn list<S: AsRef<str>>(&self, parts: &[S]) -> String {
        match parts {
            [] => String::new(),
            [only] => only.as_ref().to_string(),
            [init @ .., last] => {
                let comma = if self.code().language() == "fa" {
                    "\u{60c} "
                } else {
                    ", "
                };
                let commas = init
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<&str>>()
                    .join(comma);
                let last = last.as_ref();
                interpolate(
                    &self.translate("%(commas)s and %(last)s"),
                    &[("commas", &commas), ("last", &last)],
                )
            }
        }
    }

    fn elapsed(&self, singular: &str, plural: &str, name: &str, count: i64) -> String {
        interpolate(&self.translate_plural(singular, plural, count), &[(name, &count)])
    }

    fn render(&self, template: &str, local_date: NaiveDateTime) -> String {
        let month_name = &self.months[local_date.month0() as usize];
        let weekday = &self.weekdays[local_date.weekday().num_days_from_monday() as usize];
        let day = local_date.day();
        let year = local_date.year();
        let time = self.clock(local_date);

        interpolate(
            &self.translate(template),
            &[
                ("month_name", month_name),
                ("weekday", weekday),
                ("day", &day),
                ("year", &year),
                ("time", &time),
            ],
        )
    }

    /// 12-hour clock for US English and Simplified Chinese, 24-hour
    /// elsewhere.
    fn clock(&self, local_date: NaiveDateTime) -> String {
        let hour = local_date.hour();
        let minute = local_date.minute();
        match self.code().as_str() {
            "en" | "en_US" => format!(
                "{}:{:02} {}",
                twelve_hour(hour),
                minute,
                if hour >= 12 { "pm" } else { "am" }
            ),
            "zh_CN" => format!(
                "{}{}:{:02}",
                if hour >= 12 { "\u{4e0b}\u{5348}" } else { "\u{4e0a}\u{5348}" },
                twelve_hour(hour),
                minute
            ),
            _ => format!("{hour}:{minute:02}"),
        }
    }
}
