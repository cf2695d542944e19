//! Locale-aware display formatting for prices and dates
//!
//! The storefront renders money and calendar dates in a single fixed
//! locale. Formatting never fails: non-finite amounts and unparseable dates
//! degrade to fallback text instead of an error.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Text rendered for a date that cannot be interpreted
pub const INVALID_DATE: &str = "Invalid Date";

/// Outer bound, in milliseconds, of an accepted epoch timestamp
///
/// chrono's own range ends earlier (near 8.21e15 ms); instants past it, or
/// whose local time would overflow, also render as [`INVALID_DATE`].
const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LocalePreset {
    /// Vietnamese, prices in đồng
    #[default]
    #[serde(rename = "vi-VN")]
    ViVn,
    /// US English, prices in dollars
    #[serde(rename = "en-US")]
    EnUs,
}

impl LocalePreset {
    /// BCP 47 tag of the locale
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::ViVn => "vi-VN",
            Self::EnUs => "en-US",
        }
    }

    /// ISO 4217 code of the locale's currency
    #[must_use]
    pub const fn currency_code(&self) -> &'static str {
        match self {
            Self::ViVn => "VND",
            Self::EnUs => "USD",
        }
    }

    const fn currency_symbol(self) -> &'static str {
        match self {
            Self::ViVn => "₫",
            Self::EnUs => "$",
        }
    }

    const fn fraction_digits(self) -> u32 {
        match self {
            Self::ViVn => 0,
            Self::EnUs => 2,
        }
    }

    const fn group_separator(self) -> char {
        match self {
            Self::ViVn => '.',
            Self::EnUs => ',',
        }
    }

    const fn decimal_separator(self) -> char {
        match self {
            Self::ViVn => ',',
            Self::EnUs => '.',
        }
    }

    /// UTC offset, in minutes, dates are shown in by default
    #[must_use]
    pub const fn default_utc_offset_minutes(&self) -> i32 {
        match self {
            Self::ViVn => 7 * 60,
            Self::EnUs => 0,
        }
    }
}

impl fmt::Display for LocalePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LocalePreset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "vi-vn" | "vi" => Ok(Self::ViVn),
            "en-us" | "en" => Ok(Self::EnUs),
            _ => Err(DomainError::UnsupportedLocale(s.to_string())),
        }
    }
}

/// Anything that can be shown as a calendar date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLike {
    /// An instant in time
    Instant(DateTime<Utc>),
    /// A calendar day, shown as-is
    Day(NaiveDate),
    /// Milliseconds since the Unix epoch
    EpochMillis(i64),
    /// Free text as received from the backend or a form field
    Text(String),
}

impl From<DateTime<Utc>> for DateLike {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Instant(value)
    }
}

impl From<NaiveDate> for DateLike {
    fn from(value: NaiveDate) -> Self {
        Self::Day(value)
    }
}

impl From<i64> for DateLike {
    fn from(value: i64) -> Self {
        Self::EpochMillis(value)
    }
}

impl From<&str> for DateLike {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DateLike {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Formats prices and dates for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formatter {
    locale: LocalePreset,
    offset: FixedOffset,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::for_locale(LocalePreset::default())
    }
}

impl Formatter {
    /// Formatter for a locale using the locale's default UTC offset
    #[must_use]
    pub fn for_locale(locale: LocalePreset) -> Self {
        Self::with_offset(locale, locale.default_utc_offset_minutes())
    }

    /// Formatter for a locale with an explicit UTC offset in minutes
    ///
    /// Offsets outside ±24h fall back to UTC.
    #[must_use]
    pub fn with_offset(locale: LocalePreset, utc_offset_minutes: i32) -> Self {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { locale, offset }
    }

    /// The locale in use
    #[must_use]
    pub const fn locale(&self) -> LocalePreset {
        self.locale
    }

    /// Render an amount of money in the locale's currency
    ///
    /// `vi-VN`: `1.234.567 ₫` (no-break space before the symbol, no minor
    /// units). `en-US`: `$1,234.57`.
    #[must_use]
    pub fn format_currency(&self, amount: f64) -> String {
        let (negative, magnitude) = if amount.is_nan() {
            (false, "NaN".to_string())
        } else if amount.is_infinite() {
            (amount < 0.0, "∞".to_string())
        } else {
            self.format_magnitude(amount)
        };

        let sign = if negative { "-" } else { "" };
        let symbol = self.locale.currency_symbol();
        match self.locale {
            LocalePreset::ViVn => format!("{sign}{magnitude}\u{a0}{symbol}"),
            LocalePreset::EnUs => format!("{sign}{symbol}{magnitude}"),
        }
    }

    /// Render a date in the locale's short numeric form
    ///
    /// `vi-VN`: `d/m/yyyy`; `en-US`: `m/d/yyyy`. Inputs that do not denote a
    /// date render as [`INVALID_DATE`].
    pub fn format_date(&self, value: impl Into<DateLike>) -> String {
        self.resolve_day(&value.into())
            .map_or_else(|| INVALID_DATE.to_string(), |day| self.render_day(day))
    }

    fn render_day(&self, day: NaiveDate) -> String {
        match self.locale {
            LocalePreset::ViVn => format!("{}/{}/{}", day.day(), day.month(), day.year()),
            LocalePreset::EnUs => format!("{}/{}/{}", day.month(), day.day(), day.year()),
        }
    }

    fn resolve_day(&self, value: &DateLike) -> Option<NaiveDate> {
        match value {
            DateLike::Instant(instant) => self.local_day(*instant),
            DateLike::Day(day) => Some(*day),
            DateLike::EpochMillis(ms) => {
                if ms.unsigned_abs() > MAX_EPOCH_MILLIS.unsigned_abs() {
                    return None;
                }
                DateTime::<Utc>::from_timestamp_millis(*ms).and_then(|dt| self.local_day(dt))
            },
            DateLike::Text(text) => self.parse_text(text.trim()),
        }
    }

    fn local_day(&self, instant: DateTime<Utc>) -> Option<NaiveDate> {
        instant
            .naive_utc()
            .checked_add_offset(self.offset)
            .map(|local| local.date())
    }

    fn parse_text(&self, text: &str) -> Option<NaiveDate> {
        if text.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return self.local_day(dt.with_timezone(&Utc));
        }

        // A bare date is midnight UTC
        if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return day
                .and_hms_opt(0, 0, 0)
                .and_then(|midnight| self.local_day(midnight.and_utc()));
        }

        // Date-times without an offset are wall-clock time in the local zone
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|pattern| NaiveDateTime::parse_from_str(text, pattern).ok())
            .and_then(|naive| self.offset.from_local_datetime(&naive).single())
            .map(|dt| dt.date_naive())
    }

    fn format_magnitude(&self, amount: f64) -> (bool, String) {
        let digits = self.locale.fraction_digits();
        let scale = 10_f64.powi(i32::try_from(digits).unwrap_or(0));
        let scaled = (amount.abs() * scale).round();
        let negative = amount.is_sign_negative();

        let raw = format!("{scaled:.0}");
        let width = digits as usize + 1;
        let padded = format!("{raw:0>width$}");
        let split = padded.len() - digits as usize;
        let (int_part, frac_part) = padded.split_at(split);

        let mut out = group_digits(int_part, self.locale.group_separator());
        if digits > 0 {
            out.push(self.locale.decimal_separator());
            out.push_str(frac_part);
        }
        (negative, out)
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
