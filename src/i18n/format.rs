//! Locale-aware formatting of currency, numbers, dates and times.
//!
//! Every function here is total: when the locale is unknown, the calendar
//! tag cannot be resolved, or the value is not finite, the manual fallback
//! path is taken instead of failing. Fallbacks are logged at `debug` and
//! counted in [`I18nMetrics`], never reported to the caller.

use crate::i18n::{
    ComponentOrder, Grouping, I18nMetrics, Locale, LocaleRegistry, NumberConfig, SymbolPosition,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use num_format::{CustomFormat, ToFormattedString};
use tracing::debug;

/// Maximum fraction digits kept by `format_number`.
const NUMBER_MAX_FRACTION_DIGITS: usize = 3;

const NBSP: &str = "\u{a0}";

/// Anything that can be rendered as a date.
#[derive(Debug, Clone, PartialEq)]
pub enum DateValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// ISO-8601 / RFC 3339 text, parsed lazily
    Text(String),
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Date(date)
    }
}

impl From<NaiveDateTime> for DateValue {
    fn from(datetime: NaiveDateTime) -> Self {
        DateValue::DateTime(datetime)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateValue {
    fn from(datetime: DateTime<Tz>) -> Self {
        DateValue::DateTime(datetime.naive_local())
    }
}

impl From<&str> for DateValue {
    fn from(text: &str) -> Self {
        DateValue::Text(text.to_string())
    }
}

impl From<String> for DateValue {
    fn from(text: String) -> Self {
        DateValue::Text(text)
    }
}

impl DateValue {
    fn to_naive(&self) -> Result<NaiveDateTime, String> {
        match self {
            DateValue::Date(date) => Ok(date.and_time(NaiveTime::MIN)),
            DateValue::DateTime(datetime) => Ok(*datetime),
            DateValue::Text(text) => parse_date_text(text.trim()),
        }
    }

    /// ISO `YYYY-MM-DD` used when formatting degrades.
    fn iso_date(&self) -> String {
        match self {
            DateValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            DateValue::DateTime(datetime) => datetime.format("%Y-%m-%d").to_string(),
            DateValue::Text(text) => match parse_date_text(text.trim()) {
                Ok(datetime) => datetime.format("%Y-%m-%d").to_string(),
                Err(_) => text.trim().chars().take(10).collect(),
            },
        }
    }
}

fn parse_date_text(text: &str) -> Result<NaiveDateTime, String> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, pattern) {
            return Ok(datetime);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|e| format!("unparseable date '{}': {}", text, e))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStyle {
    /// "01"
    TwoDigit,
    /// Localized month name
    Long,
}

/// Options for [`format_date`]. Day is always 2-digit, year numeric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateOptions {
    /// Overrides the locale default (2-digit for day-month-year locales,
    /// long otherwise)
    pub month: Option<MonthStyle>,

    /// Append hour and minute
    pub with_time: bool,
}

/// Format a monetary amount with the locale's currency conventions.
///
/// ```ignore
/// assert_eq!(format_currency(1000.0, "en"), "$1,000.00");
/// ```
pub fn format_currency(amount: f64, code: &str) -> String {
    let registry = LocaleRegistry::global();
    match registry.get(code) {
        Ok(locale) if amount.is_finite() => match currency_with_locale(amount, locale) {
            Ok(formatted) => formatted,
            Err(reason) => {
                degraded("currency", code, &reason);
                manual_currency(amount, locale)
            }
        },
        Ok(locale) => {
            degraded("currency", code, "non-finite amount");
            manual_currency(amount, locale)
        }
        Err(e) => {
            degraded("currency", code, &e.to_string());
            manual_currency(amount, registry.default_locale())
        }
    }
}

/// Format a number with the locale's grouping and decimal separators,
/// keeping at most three fraction digits.
pub fn format_number(value: f64, code: &str) -> String {
    match LocaleRegistry::global().get(code) {
        Ok(locale) if value.is_finite() => {
            let fixed = trim_fraction(&fixed(value, NUMBER_MAX_FRACTION_DIGITS));
            localize_fixed(&fixed, &locale.number).unwrap_or_else(|reason| {
                degraded("number", code, &reason);
                manual_number(value)
            })
        }
        Ok(_) => {
            degraded("number", code, "non-finite value");
            value.to_string()
        }
        Err(e) => {
            degraded("number", code, &e.to_string());
            manual_number(value)
        }
    }
}

/// Format a date for the locale.
///
/// Defaults: 2-digit day, numeric year, 2-digit month for day-month-year
/// locales and the localized month name for the others. Falls back to the
/// ISO date when formatting fails.
pub fn format_date(
    value: impl Into<DateValue>,
    code: &str,
    options: Option<DateOptions>,
) -> String {
    let value = value.into();
    match try_format_date(&value, code, options.unwrap_or_default()) {
        Ok(formatted) => formatted,
        Err(reason) => {
            degraded("date", code, &reason);
            value.iso_date()
        }
    }
}

/// [`format_date`] with hour and minute appended.
pub fn format_date_time(value: impl Into<DateValue>, code: &str) -> String {
    format_date(
        value,
        code,
        Some(DateOptions {
            month: None,
            with_time: true,
        }),
    )
}

/// Hour and minute only, on the locale's 12- or 24-hour clock.
pub fn format_time(value: impl Into<DateValue>, code: &str) -> String {
    let value = value.into();
    let parsed = value.to_naive();
    match (LocaleRegistry::global().get(code), parsed) {
        (Ok(locale), Ok(datetime)) => time_part(&datetime, locale.date.hour12),
        (Err(e), Ok(datetime)) => {
            degraded("time", code, &e.to_string());
            time_part(&datetime, false)
        }
        (_, Err(reason)) => {
            degraded("time", code, &reason);
            value.iso_date()
        }
    }
}

fn try_format_date(value: &DateValue, code: &str, options: DateOptions) -> Result<String, String> {
    let locale = LocaleRegistry::global()
        .get(code)
        .map_err(|e| e.to_string())?;
    let datetime = value.to_naive()?;
    let order = locale.date.order;

    let month = options.month.unwrap_or(match order {
        ComponentOrder::Dmy => MonthStyle::TwoDigit,
        ComponentOrder::Mdy | ComponentOrder::Ymd => MonthStyle::Long,
    });

    let date = datetime.date();
    let date_part = match month {
        MonthStyle::TwoDigit => date
            .format(&numeric_pattern(order, locale.date.separator))
            .to_string(),
        MonthStyle::Long => {
            let calendar = calendar_locale(locale.date.calendar_tag)?;
            date.format_localized(long_pattern(order), calendar)
                .to_string()
        }
    };

    if options.with_time {
        Ok(format!("{} {}", date_part, time_part(&datetime, locale.date.hour12)))
    } else {
        Ok(date_part)
    }
}

/// Resolve a BCP 47 tag ("ar-QA") with the localized calendar backend.
fn calendar_locale(tag: &str) -> Result<chrono::Locale, String> {
    let posix = tag.replace('-', "_");
    chrono::Locale::try_from(posix.as_str())
        .map_err(|_| format!("unsupported calendar tag '{}'", tag))
}

fn numeric_pattern(order: ComponentOrder, separator: &str) -> String {
    let parts = match order {
        ComponentOrder::Mdy => ["%m", "%d", "%Y"],
        ComponentOrder::Dmy => ["%d", "%m", "%Y"],
        ComponentOrder::Ymd => ["%Y", "%m", "%d"],
    };
    parts.join(separator)
}

fn long_pattern(order: ComponentOrder) -> &'static str {
    match order {
        ComponentOrder::Mdy => "%B %d, %Y",
        ComponentOrder::Dmy => "%d %B %Y",
        ComponentOrder::Ymd => "%Y %B %d",
    }
}

fn time_part(datetime: &NaiveDateTime, hour12: bool) -> String {
    let pattern = if hour12 { "%I:%M %p" } else { "%H:%M" };
    datetime.format(pattern).to_string()
}

fn currency_with_locale(amount: f64, locale: &Locale) -> Result<String, String> {
    let currency = &locale.currency;
    let magnitude = fixed(amount.abs(), currency.decimal_places);
    let negative = amount < 0.0 && magnitude.chars().any(|c| matches!(c, '1'..='9'));
    let digits = localize_fixed(&magnitude, &locale.number)?;
    let space = if currency.spaced { NBSP } else { "" };

    let body = match currency.symbol_position {
        SymbolPosition::Before => format!("{}{}{}", currency.symbol, space, digits),
        SymbolPosition::After => format!("{}{}{}", digits, space, currency.symbol),
    };

    if negative {
        Ok(format!("-{}", body))
    } else {
        Ok(body)
    }
}

/// `symbol + toFixed` (or `toFixed + symbol`), no grouping.
fn manual_currency(amount: f64, locale: &Locale) -> String {
    let currency = &locale.currency;
    let amount = fixed(amount, currency.decimal_places);
    match currency.symbol_position {
        SymbolPosition::Before => format!("{}{}", currency.symbol, amount),
        SymbolPosition::After => format!("{}{}", amount, currency.symbol),
    }
}

/// Comma-grouped number with a '.' decimal point.
fn manual_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = trim_fraction(&fixed(value, NUMBER_MAX_FRACTION_DIGITS));
    let (sign, unsigned) = split_sign(&fixed);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };
    let grouped = group_thousands(int_part, ",");
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

fn fixed(value: f64, places: usize) -> String {
    // Normalize -0.0 so it never renders as "-0"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", places, value)
}

/// Drop trailing fraction zeros ("1.500" -> "1.5", "2.000" -> "2").
fn trim_fraction(fixed: &str) -> String {
    if !fixed.contains('.') {
        return fixed.to_string();
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn split_sign(fixed: &str) -> (&str, &str) {
    match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    }
}

/// num-format rules for the locale's separators and grouping.
fn number_format(number: &NumberConfig) -> Result<CustomFormat, String> {
    let grouping = match number.grouping {
        Grouping::Thousands => num_format::Grouping::Standard,
        Grouping::Indian => num_format::Grouping::Indian,
    };
    CustomFormat::builder()
        .grouping(grouping)
        .separator(number.grouping_separator)
        .decimal(number.decimal_separator)
        .build()
        .map_err(|e| format!("invalid number format: {}", e))
}

/// Re-render a `{:.N}` string with the locale's separators.
///
/// Fails when the integer part does not fit a `u128`.
fn localize_fixed(fixed: &str, number: &NumberConfig) -> Result<String, String> {
    let format = number_format(number)?;
    let (sign, unsigned) = split_sign(fixed);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };
    let grouped = int_part
        .parse::<u128>()
        .map_err(|_| format!("integer part '{}' out of range", int_part))?
        .to_formatted_string(&format);
    Ok(match frac_part {
        Some(frac) => format!("{}{}{}{}", sign, grouped, number.decimal_separator, frac),
        None => format!("{}{}", sign, grouped),
    })
}

/// Groups of three for the degraded path, where no locale rules apply.
fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

fn degraded(kind: &str, code: &str, reason: &str) {
    I18nMetrics::global().record_formatting_fallback();
    debug!("Degraded {} formatting for '{}': {}", kind, code, reason);
}
