//! Integration tests for the Fleetify i18n core
//!
//! These tests drive the public API the way an application shell would:
//! formatting through the registry, switching through a resolver backed by
//! real collaborators, and validating the catalogs shipped under `locales/`.

use chrono::NaiveDate;
use fleetify_i18n::i18n::{
    format_currency, generate_report, should_mirror, summarize, BusinessRuleEngine,
    ChangeOutcome, Direction, FilePreferenceStore, FsTranslationLoader, I18nError,
    InMemoryDocument, IssueType, Language, LocaleContext, LocaleRegistry, LocaleResolver,
    MemoryPreferenceStore, PreferenceStore, RuleCategory, RuleInput, Severity,
    StaticTranslationLoader, SymbolPosition, TranslationLoader, TranslationValidator,
    ValidationStatus, ValidatorConfig,
};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

// ==================== Test Helpers ====================

const NAMESPACES: &[&str] = &["common", "fleet", "finance", "legal", "contracts", "hr"];

/// Loader with a small catalog for every namespace of `codes`.
fn catalog_loader(codes: &[&str]) -> StaticTranslationLoader {
    let mut loader = StaticTranslationLoader::new();
    for code in codes {
        for namespace in NAMESPACES {
            loader.insert(
                code,
                namespace,
                [("title", format!("{} {}", namespace, code))],
            );
        }
    }
    loader
}

fn resolver_with(
    store: Arc<MemoryPreferenceStore>,
    document: Arc<InMemoryDocument>,
) -> LocaleResolver {
    LocaleResolver::new(store, Arc::new(catalog_loader(&["en", "ar", "fr"])), document)
}

fn shipped_locales() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("locales")
}

/// Write `<root>/<code>/<namespace>.json`.
fn write_catalog(root: &TempDir, code: &str, namespace: &str, json: &str) {
    let dir = root.path().join(code);
    std::fs::create_dir_all(&dir).expect("Failed to create locale dir");
    std::fs::write(dir.join(format!("{}.json", namespace)), json)
        .expect("Failed to write catalog");
}

// ==================== Registry & Formatting ====================

#[test]
fn test_registry_describes_en_and_ar() {
    let registry = LocaleRegistry::global();

    let en = registry.get("en").unwrap();
    assert_eq!(en.direction, Direction::Ltr);
    assert_eq!(en.currency.iso_code, "USD");
    assert_eq!(en.currency.symbol, "$");
    assert_eq!(en.currency.symbol_position, SymbolPosition::Before);
    assert_eq!(en.currency.decimal_places, 2);

    let ar = registry.get("ar").unwrap();
    assert_eq!(ar.direction, Direction::Rtl);
    assert_eq!(ar.currency.iso_code, "QAR");
    assert_eq!(ar.currency.symbol, "ر.ق");
    assert_eq!(ar.currency.symbol_position, SymbolPosition::Before);
    assert_eq!(ar.currency.decimal_places, 2);
    assert!(ar.mirrored_icons.contains(&"chevron-left"));
}

#[test]
fn test_every_registered_locale_is_consistent() {
    let registry = LocaleRegistry::global();
    for code in registry.codes() {
        let locale = registry.get(code).unwrap();
        assert_eq!(locale.code, code);
        assert_eq!(locale.is_rtl(), locale.direction == Direction::Rtl);
        if locale.direction == Direction::Ltr {
            assert!(
                locale.mirrored_icons.is_empty(),
                "{} mirrors icons while left-to-right",
                code
            );
        }
        // Formatting never fails for a registered locale
        assert!(!format_currency(1.5, code).is_empty());
    }
}

#[test]
fn test_currency_formatting_en_and_ar() {
    assert_eq!(format_currency(1000.0, "en"), "$1,000.00");

    let arabic = format_currency(1000.0, "ar");
    assert!(arabic.contains("ر.ق"));
    assert!(arabic.contains("1,000.00"));
}

#[test]
fn test_context_formats_through_locale() {
    let context = LocaleContext::new(Language::from_code("ar").unwrap());
    assert!(context.is_rtl());
    assert_eq!(context.format_currency(1000.0), format_currency(1000.0, "ar"));
}

// ==================== Resolver ====================

#[tokio::test]
async fn test_change_to_rtl_updates_state_and_document() {
    let document = Arc::new(InMemoryDocument::new());
    let store = Arc::new(MemoryPreferenceStore::with_code("en"));
    let resolver = resolver_with(store.clone(), document.clone());

    resolver.initialize().await.unwrap();
    assert_eq!(resolver.current().code(), "en");
    assert!(document.snapshot().has_class("ltr"));

    let outcome = resolver.change_locale("ar").await.unwrap();

    assert_eq!(outcome, ChangeOutcome::Applied);
    assert_eq!(resolver.direction(), Direction::Rtl);
    assert!(resolver.is_rtl());

    let state = document.snapshot();
    assert!(state.has_class("rtl"));
    assert!(!state.has_class("ltr"));
    assert_eq!(state.attribute("lang"), Some("ar"));
    assert_eq!(state.attribute("dir"), Some("rtl"));
    assert_eq!(store.stored().as_deref(), Some("ar"));
    assert_eq!(resolver.translate("common", "title"), "common ar");
}

#[tokio::test]
async fn test_change_to_unknown_locale_keeps_current() {
    let document = Arc::new(InMemoryDocument::new());
    let store = Arc::new(MemoryPreferenceStore::with_code("en"));
    let resolver = resolver_with(store.clone(), document.clone());
    resolver.initialize().await.unwrap();
    let before = document.snapshot();

    let err = resolver.change_locale("xx").await.unwrap_err();

    assert_eq!(err, I18nError::UnknownLocale("xx".to_string()));
    assert_eq!(resolver.current().code(), "en");
    assert_eq!(document.snapshot(), before);
    assert_eq!(store.stored().as_deref(), Some("en"));
}

#[tokio::test]
async fn test_switching_back_leaves_no_stale_classes() {
    let document = Arc::new(InMemoryDocument::new());
    let resolver = resolver_with(Arc::new(MemoryPreferenceStore::new()), document.clone());
    resolver.initialize().await.unwrap();

    resolver.change_locale("ar").await.unwrap();
    resolver.change_locale("fr").await.unwrap();
    resolver.change_locale("en").await.unwrap();

    let state = document.snapshot();
    assert!(state.has_class("ltr"));
    assert!(!state.has_class("rtl"));
    assert!(!state.has_class("font-arabic"));
}

#[tokio::test]
async fn test_preference_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs").join("language.json");
    let loader: Arc<dyn TranslationLoader> = Arc::new(catalog_loader(&["en", "fr"]));

    let first = LocaleResolver::new(
        Arc::new(FilePreferenceStore::new(&path)),
        loader.clone(),
        Arc::new(InMemoryDocument::new()),
    );
    first.initialize().await.unwrap();
    first.change_locale("fr").await.unwrap();

    let store = FilePreferenceStore::new(&path);
    assert_eq!(store.load().await.unwrap().as_deref(), Some("fr"));

    let second = LocaleResolver::new(
        Arc::new(store),
        loader,
        Arc::new(InMemoryDocument::new()),
    );
    second.initialize().await.unwrap();
    assert_eq!(second.current().code(), "fr");
}

// ==================== Icon Mirroring ====================

#[test]
fn test_icon_mirroring_policy() {
    assert!(should_mirror("chevron-left", "ar", false));
    assert!(!should_mirror("chevron-left", "en", false));
    assert!(!should_mirror("unlisted-icon", "ar", false));
}

// ==================== Business Rules ====================

#[test]
fn test_contract_minimum_age() {
    let under_age = RuleInput {
        age: Some(17),
        ..Default::default()
    };
    let result = BusinessRuleEngine::validate(&under_age, "en", RuleCategory::Contracts);
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["Minimum age requirement is 21".to_string()]);

    let adult = RuleInput {
        age: Some(25),
        ..Default::default()
    };
    let result = BusinessRuleEngine::validate(&adult, "en", RuleCategory::Contracts);
    assert!(result.valid);
    assert!(result.errors.is_empty());
}

#[test]
fn test_rules_differ_per_locale() {
    let holiday = NaiveDate::from_ymd_opt(2024, 12, 18).unwrap();
    assert!(BusinessRuleEngine::is_holiday("ar", holiday));
    assert!(!BusinessRuleEngine::is_holiday("en", holiday));

    assert!(
        BusinessRuleEngine::required_deposit("ar", 1_000.0)
            >= BusinessRuleEngine::required_deposit("en", 1_000.0)
    );
}

// ==================== Translation Validation ====================

#[tokio::test]
async fn test_placeholder_mismatch_is_distinct_from_completeness() {
    let loader = StaticTranslationLoader::new()
        .with("en", "common", [("a", "Hello {{name}}"), ("b", "World")])
        .with("fr", "common", [("a", "Bonjour"), ("b", "Monde")]);
    let validator = TranslationValidator::new(Arc::new(loader), ValidatorConfig::default());

    let result = validator.validate("fr", "common").await;

    assert!(result.missing_keys.is_empty());
    assert!(result.empty_values.is_empty());
    assert_eq!(result.completeness, 100);
    assert_eq!(result.status, ValidationStatus::Incomplete);
    let formatting: Vec<_> = result
        .issues
        .iter()
        .filter(|issue| issue.issue_type == IssueType::Formatting)
        .collect();
    assert_eq!(formatting.len(), 1);
    assert_eq!(formatting[0].key, "a");
    assert_eq!(formatting[0].severity, Severity::Error);
}

#[tokio::test]
async fn test_fs_catalogs_validate_end_to_end() {
    let root = TempDir::new().unwrap();
    write_catalog(
        &root,
        "en",
        "fleet",
        r#"{
            "vehicle": {"plate": "Plate", "status": {"rented": "Rented"}},
            "notice": "<b>{{count}}</b> due"
        }"#,
    );
    write_catalog(
        &root,
        "fr",
        "fleet",
        r#"{"vehicle": {"plate": "Plaque", "status": {"rented": ""}}}"#,
    );

    let validator = TranslationValidator::new(
        Arc::new(FsTranslationLoader::new(root.path())),
        ValidatorConfig::default(),
    );
    let result = validator.validate("fr", "fleet").await;

    assert_eq!(result.missing_keys, vec!["notice".to_string()]);
    assert_eq!(result.empty_values, vec!["vehicle.status.rented".to_string()]);
    assert_eq!(result.completeness, 33);
    assert_eq!(result.status, ValidationStatus::Incomplete);

    let report = generate_report(&[result]);
    assert!(report.contains("[fr]"));
    assert!(report.contains("notice"));
}

#[tokio::test]
async fn test_shipped_catalogs_have_no_errors() {
    let validator = TranslationValidator::new(
        Arc::new(FsTranslationLoader::new(shipped_locales())),
        ValidatorConfig::default(),
    );

    let results = validator.validate_all().await;

    let registered = LocaleRegistry::global().codes().len();
    assert_eq!(results.len(), registered * NAMESPACES.len());
    for result in &results {
        assert_ne!(
            result.status,
            ValidationStatus::Invalid,
            "{}/{} failed to load",
            result.locale,
            result.namespace
        );
        assert!(
            !result.has_errors(),
            "{}/{} has errors: {:?}",
            result.locale,
            result.namespace,
            result.issues
        );
        assert_eq!(result.completeness, 100);
    }

    let summary = summarize(&results);
    assert_eq!(summary.invalid, 0);
    assert!(summary.passed(&results));
}

#[tokio::test]
async fn test_switch_through_every_locale_with_shipped_catalogs() {
    let document = Arc::new(InMemoryDocument::new());
    let resolver = LocaleResolver::new(
        Arc::new(MemoryPreferenceStore::new()),
        Arc::new(FsTranslationLoader::new(shipped_locales())),
        document.clone(),
    );
    resolver.initialize().await.unwrap();

    for code in LocaleRegistry::global().codes() {
        let outcome = resolver.change_locale(code).await.unwrap();

        assert_eq!(outcome, ChangeOutcome::Applied);
        assert_eq!(resolver.current().code(), code);
        assert_eq!(document.snapshot().attribute("lang"), Some(code));
        assert_ne!(resolver.translate("common", "actions.save"), "actions.save");
    }
}
