//! Locale-specific business rules: lookup, rule application and
//! validation of business data.
//!
//! Lookups never fail. A locale without an explicit table resolves to the
//! default locale's rule set, and a missing field is reported as `None`.

mod data;
mod types;

pub use data::{ARABIC_RULES, ENGLISH_RULES, FRENCH_RULES};
pub use types::*;

use crate::i18n::format::{self, DateValue};
use crate::i18n::{ComponentOrder, LocaleRegistry, SymbolPosition, DEFAULT_LOCALE};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

static RULE_SETS: [(&str, &BusinessRuleSet); 3] = [
    ("en", &ENGLISH_RULES),
    ("ar", &ARABIC_RULES),
    ("fr", &FRENCH_RULES),
];

static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Business data checked by [`BusinessRuleEngine::validate`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RuleInput {
    /// Customer age in years
    pub age: Option<u32>,
    /// Monetary amount of a payment or invoice
    pub amount: Option<f64>,
    /// Deposit offered for a contract
    pub deposit: Option<f64>,
    /// Scheduled working hours per week
    pub weekly_hours: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl RuleValidation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Value handed to [`BusinessRuleEngine::format_data`].
#[derive(Debug, Clone, PartialEq)]
pub enum DataInput {
    Currency(f64),
    Date(DateValue),
    Phone(String),
}

/// A formatted value along with the convention used to produce it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FormattedData {
    Currency {
        value: f64,
        formatted: String,
        symbol: &'static str,
        position: SymbolPosition,
    },
    Date {
        formatted: String,
        pattern: String,
    },
    Phone {
        value: String,
        formatted: String,
        pattern: &'static str,
    },
}

/// Business rule engine keyed by locale code.
pub struct BusinessRuleEngine;

impl BusinessRuleEngine {
    /// Rule set for a locale, falling back to the default locale's set.
    pub fn rule_set(code: &str) -> &'static BusinessRuleSet {
        if let Some((_, rules)) = RULE_SETS.iter().find(|(key, _)| *key == code) {
            return rules;
        }
        debug!(
            "No business rules for '{}', using '{}' rules",
            code, DEFAULT_LOCALE
        );
        RULE_SETS
            .iter()
            .find(|(key, _)| *key == DEFAULT_LOCALE)
            .map(|(_, rules)| *rules)
            .unwrap_or(&ENGLISH_RULES)
    }

    /// `true` if the locale has its own table rather than the fallback.
    pub fn has_explicit_rules(code: &str) -> bool {
        RULE_SETS.iter().any(|(key, _)| *key == code)
    }

    pub fn category(code: &str, category: RuleCategory) -> CategoryRules<'static> {
        Self::rule_set(code).category(category)
    }

    /// Raw value of a field in a category, or `None` if the rule set does
    /// not define it.
    ///
    /// `field` may be snake_case or camelCase and may address nested
    /// fields with dots (e.g. `"working_hours.regular.start"`).
    pub fn apply_rule(code: &str, category: RuleCategory, field: &str) -> Option<Value> {
        let mut value = serde_json::to_value(Self::category(code, category)).ok()?;
        for segment in field.split('.') {
            value = value.get(to_snake_case(segment))?.clone();
        }
        if value.is_null() {
            None
        } else {
            Some(value)
        }
    }

    /// Whether a field is defined and truthy (not `false`, `0` or empty).
    pub fn rule_applies(code: &str, category: RuleCategory, field: &str) -> bool {
        match Self::apply_rule(code, category, field) {
            Some(Value::Bool(flag)) => flag,
            Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(_)) => true,
            Some(Value::Null) | None => false,
        }
    }

    /// Validate business data against the locale's rules for a category.
    ///
    /// Errors are ordered by check; `valid` is true iff there are none.
    pub fn validate(data: &RuleInput, code: &str, category: RuleCategory) -> RuleValidation {
        let rules = Self::rule_set(code);
        let errors = match category {
            RuleCategory::Contracts => validate_contracts(data, &rules.contracts),
            RuleCategory::Financial => validate_financial(data),
            RuleCategory::Hr => validate_hr(data, &rules.hr),
            RuleCategory::Fleet | RuleCategory::Legal | RuleCategory::Cultural => Vec::new(),
        };
        RuleValidation::from_errors(errors)
    }

    /// Deposit required for a contract: the configured share of its value,
    /// never below the configured minimum.
    pub fn required_deposit(code: &str, contract_value: f64) -> f64 {
        let deposit = &Self::rule_set(code).contracts.deposit_requirements;
        (contract_value * deposit.percentage).max(deposit.minimum)
    }

    /// Late fee for an overdue amount: the monthly rate charged for every
    /// started 30-day period after the grace period, rounded to cents.
    pub fn late_fee(code: &str, amount: f64, days_overdue: u32) -> f64 {
        let rules = &Self::rule_set(code).financial.late_fee_rules;
        if !rules.enabled || amount <= 0.0 || days_overdue <= rules.grace_period_days {
            return 0.0;
        }
        let chargeable_days = days_overdue - rules.grace_period_days;
        let months = chargeable_days.div_ceil(30);
        (amount * rules.rate * months as f64 * 100.0).round() / 100.0
    }

    pub fn is_holiday(code: &str, date: NaiveDate) -> bool {
        let iso = date.format("%Y-%m-%d").to_string();
        Self::rule_set(code)
            .cultural
            .holiday_calendar
            .iter()
            .any(|holiday| *holiday == iso)
    }

    /// Format a value and report the convention used.
    pub fn format_data(input: DataInput, code: &str) -> FormattedData {
        let registry = LocaleRegistry::global();
        let locale = registry
            .get(code)
            .unwrap_or_else(|_| registry.default_locale());

        match input {
            DataInput::Currency(amount) => FormattedData::Currency {
                value: amount,
                formatted: format::format_currency(amount, code),
                symbol: locale.currency.symbol,
                position: locale.currency.symbol_position,
            },
            DataInput::Date(value) => FormattedData::Date {
                formatted: format::format_date(value, code, None),
                pattern: date_pattern(locale.date.order, locale.date.separator),
            },
            DataInput::Phone(phone) => FormattedData::Phone {
                formatted: format_phone(&phone),
                value: phone,
                pattern: "(XXX) XXX-XXXX",
            },
        }
    }
}

fn validate_contracts(data: &RuleInput, rules: &ContractRules) -> Vec<String> {
    let mut errors = Vec::new();
    if let Some(age) = data.age {
        if age < rules.minimum_age {
            errors.push(format!("Minimum age requirement is {}", rules.minimum_age));
        }
    }
    if let Some(deposit) = data.deposit {
        if deposit < rules.deposit_requirements.minimum {
            errors.push(format!(
                "Deposit must be at least {}",
                rules.deposit_requirements.minimum
            ));
        }
    }
    errors
}

fn validate_financial(data: &RuleInput) -> Vec<String> {
    let mut errors = Vec::new();
    if let Some(amount) = data.amount {
        if amount <= 0.0 {
            errors.push("Amount must be greater than zero".to_string());
        }
    }
    errors
}

fn validate_hr(data: &RuleInput, rules: &HrRules) -> Vec<String> {
    let mut errors = Vec::new();
    let legal_maximum = rules.working_hours.legal_maximum;
    if let (Some(hours), Some(maximum)) = (data.weekly_hours, legal_maximum) {
        if hours > maximum {
            errors.push(format!("Weekly hours exceed the legal maximum of {}", maximum));
        }
    }
    errors
}

/// Group a bare 10-digit number as `(XXX) XXX-XXXX`; anything else is
/// returned unchanged.
fn format_phone(phone: &str) -> String {
    let regex = PHONE_REGEX.get_or_init(|| Regex::new(r"(\d{3})(\d{3})(\d{4})").unwrap());
    regex.replace(phone, "($1) $2-$3").into_owned()
}

fn date_pattern(order: ComponentOrder, separator: &str) -> String {
    let parts = match order {
        ComponentOrder::Mdy => ["MM", "DD", "YYYY"],
        ComponentOrder::Dmy => ["DD", "MM", "YYYY"],
        ComponentOrder::Ymd => ["YYYY", "MM", "DD"],
    };
    parts.join(separator)
}

fn to_snake_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
