//! Translation completeness validation.
//!
//! Each (locale, namespace) map is compared against the baseline locale's
//! map for the same namespace. Missing and empty keys count against
//! completeness; placeholder, markup and length checks only add issues.

use crate::i18n::loader::{TranslationLoader, TranslationMap, DEFAULT_NAMESPACES};
use crate::i18n::{I18nMetrics, LocaleRegistry, DEFAULT_LOCALE};
use futures::future::join_all;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, warn};

/// Default drift (percent of the baseline length) before a length warning.
pub const DEFAULT_LENGTH_DRIFT_THRESHOLD: f64 = 30.0;

// Regex patterns for extraction (cached for performance)
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn default_placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").unwrap())
}

fn default_tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Complete,
    Incomplete,
    Missing,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Missing,
    Empty,
    Formatting,
    Length,
    /// The map could not be loaded at all
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub key: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    fn error(issue_type: IssueType, key: &str, message: String) -> Self {
        Self {
            issue_type,
            severity: Severity::Error,
            key: key.to_string(),
            message,
            suggestion: None,
        }
    }

    fn warning(issue_type: IssueType, key: &str, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(issue_type, key, message)
        }
    }

    fn suggest(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

/// Outcome of validating one (locale, namespace) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub locale: String,
    pub namespace: String,
    pub status: ValidationStatus,
    /// Baseline keys absent from the target, sorted
    pub missing_keys: Vec<String>,
    /// Target keys whose value is empty or whitespace, sorted
    pub empty_values: Vec<String>,
    pub issues: Vec<ValidationIssue>,
    /// Percentage (0-100) of baseline keys present with a non-empty value
    pub completeness: u32,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|issue| issue.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == Severity::Warning)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn invalid(locale: &str, namespace: &str, reason: String) -> Self {
        Self {
            locale: locale.to_string(),
            namespace: namespace.to_string(),
            status: ValidationStatus::Invalid,
            missing_keys: Vec::new(),
            empty_values: Vec::new(),
            issues: vec![ValidationIssue::error(IssueType::Load, "namespace", reason)],
            completeness: 0,
        }
    }
}

/// Validation policy.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Locale every other locale is compared against
    pub baseline_locale: String,

    /// Namespaces covered by `validate_all`
    pub namespaces: Vec<String>,

    /// Percent of the baseline length a translation may drift before a
    /// `length` warning
    pub length_drift_threshold: f64,

    /// Overrides the `{{name}}` placeholder pattern. Capture group 1, if
    /// present, is the placeholder name.
    pub placeholder_pattern: Option<Regex>,

    /// Overrides the `<tag ...>` markup pattern
    pub tag_pattern: Option<Regex>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            baseline_locale: DEFAULT_LOCALE.to_string(),
            namespaces: DEFAULT_NAMESPACES.iter().map(|ns| ns.to_string()).collect(),
            length_drift_threshold: DEFAULT_LENGTH_DRIFT_THRESHOLD,
            placeholder_pattern: None,
            tag_pattern: None,
        }
    }
}

/// Validator for translation completeness and consistency.
pub struct TranslationValidator {
    loader: Arc<dyn TranslationLoader>,
    config: ValidatorConfig,
    cache: RwLock<HashMap<(String, String), ValidationResult>>,
}

impl TranslationValidator {
    pub fn new(loader: Arc<dyn TranslationLoader>, config: ValidatorConfig) -> Self {
        Self {
            loader,
            config,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate one locale's namespace against the baseline.
    ///
    /// Results are cached per (locale, namespace). Load failures produce an
    /// `Invalid` result, which is not cached so the next call retries.
    pub async fn validate(&self, code: &str, namespace: &str) -> ValidationResult {
        let cache_key = (code.to_string(), namespace.to_string());
        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&cache_key)
            .cloned();
        if let Some(cached) = cached {
            I18nMetrics::global().record_cache_hit();
            return cached;
        }
        I18nMetrics::global().record_cache_miss();

        let baseline = &self.config.baseline_locale;
        let (baseline_map, target_map) = futures::join!(
            self.loader.load(baseline, namespace),
            self.loader.load(code, namespace)
        );

        let result = match (baseline_map, target_map) {
            (Ok(baseline_map), Ok(target_map)) => {
                self.compare(code, namespace, &baseline_map, &target_map)
            }
            (Err(e), _) => {
                I18nMetrics::global().record_load_failure();
                warn!("Failed to load baseline '{}/{}': {:#}", baseline, namespace, e);
                return ValidationResult::invalid(
                    code,
                    namespace,
                    format!("Failed to load baseline '{}' translations: {:#}", baseline, e),
                );
            }
            (_, Err(e)) => {
                I18nMetrics::global().record_load_failure();
                warn!("Failed to load '{}/{}': {:#}", code, namespace, e);
                return ValidationResult::invalid(
                    code,
                    namespace,
                    format!("Failed to load translations: {:#}", e),
                );
            }
        };

        debug!(
            "Validated '{}/{}': {:?} ({}%)",
            code, namespace, result.status, result.completeness
        );
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cache_key, result.clone());
        result
    }

    /// Validate every registered locale against every configured namespace.
    ///
    /// One pair failing to load never stops the others.
    pub async fn validate_all(&self) -> Vec<ValidationResult> {
        let codes = LocaleRegistry::global().codes();
        let pairs: Vec<(&str, &str)> = codes
            .iter()
            .flat_map(|code| {
                self.config
                    .namespaces
                    .iter()
                    .map(move |namespace| (*code, namespace.as_str()))
            })
            .collect();

        join_all(
            pairs
                .into_iter()
                .map(|(code, namespace)| self.validate(code, namespace)),
        )
        .await
    }

    /// Drop every cached result.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn cached_results(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Compare a target map against the baseline map. Pure.
    pub fn compare(
        &self,
        code: &str,
        namespace: &str,
        baseline: &TranslationMap,
        target: &TranslationMap,
    ) -> ValidationResult {
        let mut issues = Vec::new();

        let baseline_keys: BTreeSet<&String> = baseline.keys().collect();
        let target_keys: BTreeSet<&String> = target.keys().collect();

        let missing_keys: Vec<String> = baseline_keys
            .difference(&target_keys)
            .map(|key| key.to_string())
            .collect();
        for key in &missing_keys {
            issues.push(
                ValidationIssue::error(
                    IssueType::Missing,
                    key,
                    format!("Missing translation for key '{}'", key),
                )
                .suggest(format!("Add a '{}' translation for '{}'", code, key)),
            );
        }

        let mut empty_values = Vec::new();
        for key in &target_keys {
            let value = &target[*key];
            if value.trim().is_empty() {
                empty_values.push(key.to_string());
                issues.push(ValidationIssue::error(
                    IssueType::Empty,
                    key,
                    format!("Empty translation for key '{}'", key),
                ));
                continue;
            }
            if let Some(reference) = baseline.get(*key) {
                self.check_structure(key, reference, value, &mut issues);
            }
        }

        let empty_in_baseline = empty_values
            .iter()
            .filter(|key| baseline.contains_key(*key))
            .count();
        let completeness = completeness(baseline.len(), missing_keys.len() + empty_in_baseline);

        let has_errors = issues.iter().any(|issue| issue.severity == Severity::Error);
        let status = if missing_keys.is_empty() && empty_values.is_empty() && !has_errors {
            ValidationStatus::Complete
        } else if completeness == 0 && !baseline.is_empty() {
            ValidationStatus::Missing
        } else {
            ValidationStatus::Incomplete
        };

        ValidationResult {
            locale: code.to_string(),
            namespace: namespace.to_string(),
            status,
            missing_keys,
            empty_values,
            issues,
            completeness,
        }
    }

    fn check_structure(
        &self,
        key: &str,
        reference: &str,
        translation: &str,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let placeholders: &Regex = match &self.config.placeholder_pattern {
            Some(pattern) => pattern,
            None => default_placeholder_regex(),
        };
        let expected = extract_placeholders(placeholders, reference);
        let found = extract_placeholders(placeholders, translation);
        for name in expected.difference(&found) {
            issues.push(
                ValidationIssue::error(
                    IssueType::Formatting,
                    key,
                    format!("Missing placeholder {{{{{}}}}}", name),
                )
                .suggest(format!("Keep {{{{{}}}}} in the translation", name)),
            );
        }
        for name in found.difference(&expected) {
            issues.push(ValidationIssue::warning(
                IssueType::Formatting,
                key,
                format!("Unexpected placeholder {{{{{}}}}}", name),
            ));
        }

        let tags: &Regex = match &self.config.tag_pattern {
            Some(pattern) => pattern,
            None => default_tag_regex(),
        };
        let expected = extract_tags(tags, reference);
        let found = extract_tags(tags, translation);
        for tag in expected.difference(&found) {
            issues.push(ValidationIssue::error(
                IssueType::Formatting,
                key,
                format!("Missing markup tag {}", tag),
            ));
        }
        for tag in found.difference(&expected) {
            issues.push(ValidationIssue::warning(
                IssueType::Formatting,
                key,
                format!("Unexpected markup tag {}", tag),
            ));
        }

        let reference_len = reference.chars().count();
        if reference_len > 0 {
            let translation_len = translation.chars().count();
            let drift =
                translation_len.abs_diff(reference_len) as f64 / reference_len as f64 * 100.0;
            if drift > self.config.length_drift_threshold {
                issues.push(ValidationIssue::warning(
                    IssueType::Length,
                    key,
                    format!(
                        "Translation length differs from baseline by {:.0}% ({} vs {} characters)",
                        drift, translation_len, reference_len
                    ),
                ));
            }
        }
    }
}

/// Placeholder names (capture group 1, or the whole match without it).
fn extract_placeholders(regex: &Regex, text: &str) -> BTreeSet<String> {
    regex
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).or_else(|| cap.get(0)))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Distinct markup tags, duplicates collapsed.
fn extract_tags(regex: &Regex, text: &str) -> BTreeSet<String> {
    regex
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Share of `total` keys not in `deficient`, rounded, as a percentage.
fn completeness(total: usize, deficient: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let present = total.saturating_sub(deficient);
    (present as f64 / total as f64 * 100.0).round() as u32
}
