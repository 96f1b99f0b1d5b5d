//! Presentation bindings: what a rendering layer reads for the active locale.

use crate::i18n::format::{self, DateOptions, DateValue};
use crate::i18n::mirror::{mirror_transform, should_mirror};
use crate::i18n::resolver::LocaleResolver;
use crate::i18n::rules::{
    BusinessRuleEngine, BusinessRuleSet, RuleCategory, RuleInput, RuleValidation,
};
use crate::i18n::{Direction, Language, Locale, LocaleRegistry};
use serde::Serialize;
use serde_json::Value;

/// Snapshot of one locale with its formatting and rule helpers bound.
///
/// Cheap to build; take a fresh one after every locale change.
#[derive(Debug, Clone, Copy)]
pub struct LocaleContext {
    language: Language,
}

impl LocaleContext {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn from_resolver(resolver: &LocaleResolver) -> Self {
        Self::new(resolver.current())
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn code(&self) -> &'static str {
        self.language.code()
    }

    pub fn locale(&self) -> &'static Locale {
        self.language.locale()
    }

    pub fn direction(&self) -> Direction {
        self.language.direction()
    }

    pub fn is_rtl(&self) -> bool {
        self.language.is_rtl()
    }

    /// Logical start edge for text alignment.
    pub fn text_align(&self) -> &'static str {
        match self.direction() {
            Direction::Ltr => "left",
            Direction::Rtl => "right",
        }
    }

    pub fn format_currency(&self, amount: f64) -> String {
        format::format_currency(amount, self.code())
    }

    pub fn format_number(&self, value: f64) -> String {
        format::format_number(value, self.code())
    }

    pub fn format_date(&self, value: impl Into<DateValue>, options: Option<DateOptions>) -> String {
        format::format_date(value, self.code(), options)
    }

    pub fn format_date_time(&self, value: impl Into<DateValue>) -> String {
        format::format_date_time(value, self.code())
    }

    pub fn format_time(&self, value: impl Into<DateValue>) -> String {
        format::format_time(value, self.code())
    }

    pub fn should_mirror(&self, icon: &str, force: bool) -> bool {
        should_mirror(icon, self.code(), force)
    }

    pub fn rules(&self) -> &'static BusinessRuleSet {
        BusinessRuleEngine::rule_set(self.code())
    }

    pub fn rule(&self, category: RuleCategory, field: &str) -> Option<Value> {
        BusinessRuleEngine::apply_rule(self.code(), category, field)
    }

    pub fn validate(&self, data: &RuleInput, category: RuleCategory) -> RuleValidation {
        BusinessRuleEngine::validate(data, self.code(), category)
    }
}

/// One entry of a language switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitcherOption {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub direction: Direction,
    pub selected: bool,
}

/// Switcher entries in registry order, with `current` marked selected.
pub fn switcher_options(current: &str) -> Vec<SwitcherOption> {
    LocaleRegistry::global()
        .locales()
        .iter()
        .map(|locale| SwitcherOption {
            code: locale.code,
            name: locale.name,
            native_name: locale.native_name,
            direction: locale.direction,
            selected: locale.code == current,
        })
        .collect()
}

/// An icon reference that flips itself for right-to-left locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirroredIcon {
    pub id: String,
    pub force_mirror: bool,
    /// Transform the caller already applies (e.g. a rotation)
    pub existing_transform: Option<String>,
}

impl MirroredIcon {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            force_mirror: false,
            existing_transform: None,
        }
    }

    pub fn force(mut self) -> Self {
        self.force_mirror = true;
        self
    }

    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.existing_transform = Some(transform.into());
        self
    }

    pub fn is_mirrored(&self, code: &str) -> bool {
        should_mirror(&self.id, code, self.force_mirror)
    }

    /// Inline `transform` for the locale, if any.
    pub fn transform(&self, code: &str) -> Option<String> {
        mirror_transform(self.is_mirrored(code), self.existing_transform.as_deref())
    }

    /// Full inline style attribute value, if any.
    pub fn style(&self, code: &str) -> Option<String> {
        self.transform(code)
            .map(|transform| format!("transform: {};", transform))
    }
}
