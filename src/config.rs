use crate::i18n::loader::DEFAULT_NAMESPACES;
use crate::i18n::validator::{ValidatorConfig, DEFAULT_LENGTH_DRIFT_THRESHOLD};
use crate::i18n::{LocaleRegistry, DEFAULT_LOCALE};
use anyhow::{bail, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Translations
    pub translations_dir: PathBuf,
    pub namespaces: Vec<String>,
    pub baseline_locale: String,

    // Locale resolution
    pub default_locale: String,
    pub environment_locale: Option<String>,
    pub preference_file: PathBuf,

    // Validation
    pub length_drift_threshold: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            // Translations
            translations_dir: std::env::var("TRANSLATIONS_DIR")
                .unwrap_or_else(|_| "locales".to_string())
                .into(),
            namespaces: std::env::var("TRANSLATION_NAMESPACES")
                .ok()
                .map(|v| parse_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or_else(|| DEFAULT_NAMESPACES.iter().map(|ns| ns.to_string()).collect()),
            baseline_locale: std::env::var("BASELINE_LOCALE")
                .unwrap_or_else(|_| DEFAULT_LOCALE.to_string()),

            // Locale resolution - APP_LOCALE wins over the POSIX LANG
            default_locale: std::env::var("DEFAULT_LOCALE")
                .unwrap_or_else(|_| DEFAULT_LOCALE.to_string()),
            environment_locale: std::env::var("APP_LOCALE")
                .or_else(|_| std::env::var("LANG"))
                .ok()
                .filter(|v| !v.trim().is_empty()),
            preference_file: std::env::var("PREFERENCE_FILE")
                .unwrap_or_else(|_| ".fleetify-language.json".to_string())
                .into(),

            // Validation
            length_drift_threshold: std::env::var("LENGTH_DRIFT_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &f64| v.is_finite() && *v >= 0.0)
                .unwrap_or(DEFAULT_LENGTH_DRIFT_THRESHOLD),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let registry = LocaleRegistry::global();
        if !registry.contains(&self.baseline_locale) {
            bail!(
                "BASELINE_LOCALE '{}' is not a supported locale (expected one of: {})",
                self.baseline_locale,
                registry.codes().join(", ")
            );
        }
        if !registry.contains(&self.default_locale) {
            bail!(
                "DEFAULT_LOCALE '{}' is not a supported locale (expected one of: {})",
                self.default_locale,
                registry.codes().join(", ")
            );
        }
        Ok(())
    }

    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            baseline_locale: self.baseline_locale.clone(),
            namespaces: self.namespaces.clone(),
            length_drift_threshold: self.length_drift_threshold,
            ..Default::default()
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "TRANSLATIONS_DIR",
        "TRANSLATION_NAMESPACES",
        "BASELINE_LOCALE",
        "DEFAULT_LOCALE",
        "APP_LOCALE",
        "LANG",
        "PREFERENCE_FILE",
        "LENGTH_DRIFT_THRESHOLD",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("common, fleet,,hr "), vec!["common", "fleet", "hr"]);
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.translations_dir, PathBuf::from("locales"));
        assert_eq!(config.namespaces.len(), DEFAULT_NAMESPACES.len());
        assert_eq!(config.baseline_locale, "en");
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.environment_locale, None);
        assert_eq!(config.preference_file, PathBuf::from(".fleetify-language.json"));
        assert_eq!(config.length_drift_threshold, 30.0);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("TRANSLATIONS_DIR", "/srv/locales");
        std::env::set_var("TRANSLATION_NAMESPACES", "common,legal");
        std::env::set_var("BASELINE_LOCALE", "ar");
        std::env::set_var("LENGTH_DRIFT_THRESHOLD", "45");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.translations_dir, PathBuf::from("/srv/locales"));
        assert_eq!(config.namespaces, vec!["common", "legal"]);
        assert_eq!(config.baseline_locale, "ar");
        assert_eq!(config.length_drift_threshold, 45.0);
        assert_eq!(config.validator_config().baseline_locale, "ar");
    }

    #[test]
    #[serial]
    fn test_app_locale_wins_over_lang() {
        clear_env();
        std::env::set_var("LANG", "fr_FR.UTF-8");
        assert_eq!(
            Config::from_env().unwrap().environment_locale.as_deref(),
            Some("fr_FR.UTF-8")
        );

        std::env::set_var("APP_LOCALE", "ar");
        assert_eq!(Config::from_env().unwrap().environment_locale.as_deref(), Some("ar"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_threshold_uses_default() {
        clear_env();
        std::env::set_var("LENGTH_DRIFT_THRESHOLD", "-5");
        assert_eq!(Config::from_env().unwrap().length_drift_threshold, 30.0);
        std::env::set_var("LENGTH_DRIFT_THRESHOLD", "lots");
        assert_eq!(Config::from_env().unwrap().length_drift_threshold, 30.0);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_unsupported_baseline_is_rejected() {
        clear_env();
        std::env::set_var("BASELINE_LOCALE", "xx");
        let err = Config::from_env().unwrap_err();
        clear_env();

        assert!(err.to_string().contains("BASELINE_LOCALE 'xx'"));
    }
}
