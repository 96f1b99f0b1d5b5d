//! Aggregate summaries and text reports over validation results.

use crate::i18n::validator::{Severity, ValidationResult, ValidationStatus};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub complete: usize,
    pub incomplete: usize,
    pub missing: usize,
    pub invalid: usize,

    /// Mean completeness over all results (0 when there are none)
    pub average_completeness: f64,

    /// Locales with at least one issue
    pub locales_with_issues: BTreeSet<String>,
}

impl ValidationSummary {
    /// `true` when no result is invalid or carries an error.
    pub fn passed(&self, results: &[ValidationResult]) -> bool {
        self.invalid == 0 && !results.iter().any(ValidationResult::has_errors)
    }
}

pub fn summarize(results: &[ValidationResult]) -> ValidationSummary {
    let mut summary = ValidationSummary {
        total: results.len(),
        ..Default::default()
    };

    for result in results {
        match result.status {
            ValidationStatus::Complete => summary.complete += 1,
            ValidationStatus::Incomplete => summary.incomplete += 1,
            ValidationStatus::Missing => summary.missing += 1,
            ValidationStatus::Invalid => summary.invalid += 1,
        }
        if !result.issues.is_empty() {
            summary.locales_with_issues.insert(result.locale.clone());
        }
    }

    if !results.is_empty() {
        let total: u64 = results.iter().map(|r| u64::from(r.completeness)).sum();
        summary.average_completeness = total as f64 / results.len() as f64;
    }
    summary
}

/// Render the summary plus a per-locale, per-namespace issue breakdown.
pub fn generate_report(results: &[ValidationResult]) -> String {
    let summary = summarize(results);
    let mut out = String::new();

    out.push_str("Translation Validation Report\n");
    out.push_str("=============================\n");
    out.push_str(&format!("Results: {}\n", summary.total));
    out.push_str(&format!(
        "  complete: {}, incomplete: {}, missing: {}, invalid: {}\n",
        summary.complete, summary.incomplete, summary.missing, summary.invalid
    ));
    out.push_str(&format!(
        "Average completeness: {:.1}%\n",
        summary.average_completeness
    ));
    if summary.locales_with_issues.is_empty() {
        out.push_str("Locales with issues: none\n");
    } else {
        let locales: Vec<&str> = summary
            .locales_with_issues
            .iter()
            .map(String::as_str)
            .collect();
        out.push_str(&format!("Locales with issues: {}\n", locales.join(", ")));
    }

    let mut by_locale: BTreeMap<&str, Vec<&ValidationResult>> = BTreeMap::new();
    for result in results.iter().filter(|r| !r.issues.is_empty()) {
        by_locale.entry(&result.locale).or_default().push(result);
    }

    for (locale, mut locale_results) in by_locale {
        locale_results.sort_by(|a, b| a.namespace.cmp(&b.namespace));
        out.push_str(&format!("\n[{}]\n", locale));
        for result in locale_results {
            out.push_str(&format!(
                "  {}: {} ({}%)\n",
                result.namespace,
                status_label(result.status),
                result.completeness
            ));
            for issue in &result.issues {
                let severity = match issue.severity {
                    Severity::Error => "ERROR",
                    Severity::Warning => "WARN",
                };
                out.push_str(&format!(
                    "    - {} [{}] {}\n",
                    severity, issue.key, issue.message
                ));
                if let Some(suggestion) = &issue.suggestion {
                    out.push_str(&format!("      suggestion: {}\n", suggestion));
                }
            }
        }
    }

    out
}

fn status_label(status: ValidationStatus) -> &'static str {
    match status {
        ValidationStatus::Complete => "complete",
        ValidationStatus::Incomplete => "incomplete",
        ValidationStatus::Missing => "missing",
        ValidationStatus::Invalid => "invalid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::validator::{IssueType, ValidationIssue};

    fn result(
        locale: &str,
        namespace: &str,
        status: ValidationStatus,
        completeness: u32,
    ) -> ValidationResult {
        ValidationResult {
            locale: locale.to_string(),
            namespace: namespace.to_string(),
            status,
            missing_keys: Vec::new(),
            empty_values: Vec::new(),
            issues: Vec::new(),
            completeness,
        }
    }

    fn with_issue(mut result: ValidationResult, severity: Severity) -> ValidationResult {
        result.issues.push(ValidationIssue {
            issue_type: IssueType::Missing,
            severity,
            key: "vehicle.plate".to_string(),
            message: "Missing translation for key 'vehicle.plate'".to_string(),
            suggestion: Some("Add it".to_string()),
        });
        result
    }

    // ==================== Summary Tests ====================

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_completeness, 0.0);
        assert!(summary.locales_with_issues.is_empty());
    }

    #[test]
    fn test_summarize_counts_statuses() {
        let results = vec![
            result("en", "common", ValidationStatus::Complete, 100),
            with_issue(result("ar", "fleet", ValidationStatus::Incomplete, 50), Severity::Error),
            with_issue(result("ar", "hr", ValidationStatus::Missing, 0), Severity::Error),
            with_issue(result("fr", "legal", ValidationStatus::Invalid, 0), Severity::Error),
        ];

        let summary = summarize(&results);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.complete, 1);
        assert_eq!(summary.incomplete, 1);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.average_completeness, 37.5);
        assert_eq!(
            summary.locales_with_issues.into_iter().collect::<Vec<_>>(),
            vec!["ar".to_string(), "fr".to_string()]
        );
    }

    #[test]
    fn test_passed_ignores_warnings() {
        let results = vec![with_issue(
            result("fr", "common", ValidationStatus::Complete, 100),
            Severity::Warning,
        )];
        assert!(summarize(&results).passed(&results));

        let results = vec![with_issue(
            result("fr", "common", ValidationStatus::Incomplete, 90),
            Severity::Error,
        )];
        assert!(!summarize(&results).passed(&results));
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_clean_run() {
        let report = generate_report(&[result("en", "common", ValidationStatus::Complete, 100)]);
        assert!(report.contains("Results: 1"));
        assert!(report.contains("Average completeness: 100.0%"));
        assert!(report.contains("Locales with issues: none"));
        assert!(!report.contains("["));
    }

    #[test]
    fn test_report_lists_issues_per_locale() {
        let results = vec![
            with_issue(result("ar", "hr", ValidationStatus::Incomplete, 80), Severity::Error),
            with_issue(result("ar", "fleet", ValidationStatus::Incomplete, 90), Severity::Warning),
        ];

        let report = generate_report(&results);

        assert!(report.contains("[ar]"));
        assert!(report.contains("  fleet: incomplete (90%)"));
        assert!(report.contains("ERROR [vehicle.plate]"));
        assert!(report.contains("WARN [vehicle.plate]"));
        assert!(report.contains("suggestion: Add it"));
        // Namespaces are sorted within a locale
        assert!(report.find("fleet:").unwrap() < report.find("hr:").unwrap());
    }

    #[test]
    fn test_report_is_deterministic() {
        let results = vec![
            with_issue(result("fr", "legal", ValidationStatus::Invalid, 0), Severity::Error),
            with_issue(result("ar", "hr", ValidationStatus::Missing, 0), Severity::Error),
        ];
        assert_eq!(generate_report(&results), generate_report(&results));
    }
}
