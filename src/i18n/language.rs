//! Language type: a locale code that has been validated against the registry.

use crate::i18n::{Direction, I18nError, Locale, LocaleRegistry, DEFAULT_LOCALE};

/// A validated locale handle.
///
/// Only codes present in the registry can be turned into a `Language`, so
/// holding one means the locale's conventions are always available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };

    pub const ARABIC: Language = Language { code: "ar" };

    /// Create a Language from a locale code string.
    ///
    /// # Errors
    /// `I18nError::UnknownLocale` if the code is not registered.
    pub fn from_code(code: &str) -> Result<Language, I18nError> {
        let locale = LocaleRegistry::global().get(code)?;
        Ok(Language {
            // Use the static str from the registry
            code: locale.code,
        })
    }

    /// Normalize an environment locale string ("ar_QA.UTF-8", "fr-CA",
    /// "EN") to a registered language, if its primary subtag is supported.
    pub fn from_environment(raw: &str) -> Option<Language> {
        let primary = raw
            .split(|c| c == '-' || c == '_' || c == '.' || c == '@')
            .next()?
            .trim()
            .to_ascii_lowercase();
        Language::from_code(&primary).ok()
    }

    /// The fallback language (`DEFAULT_LOCALE`).
    pub fn fallback() -> Language {
        Language::from_code(DEFAULT_LOCALE).unwrap_or(Language::ENGLISH)
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full locale configuration from the registry.
    pub fn locale(&self) -> &'static Locale {
        let registry = LocaleRegistry::global();
        registry
            .get(self.code)
            .unwrap_or_else(|_| registry.default_locale())
    }

    pub fn direction(&self) -> Direction {
        self.locale().direction
    }

    pub fn is_rtl(&self) -> bool {
        self.locale().is_rtl()
    }

    pub fn name(&self) -> &'static str {
        self.locale().name
    }

    pub fn native_name(&self) -> &'static str {
        self.locale().native_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert_eq!(english.direction(), Direction::Ltr);
    }

    #[test]
    fn test_arabic_constant() {
        let arabic = Language::ARABIC;
        assert_eq!(arabic.code(), "ar");
        assert_eq!(arabic.native_name(), "العربية");
        assert!(arabic.is_rtl());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_french() {
        let language = Language::from_code("fr").expect("Should succeed");
        assert_eq!(language.code(), "fr");
        assert_eq!(language.native_name(), "Français");
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("xx");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    // ==================== from_environment Tests ====================

    #[test]
    fn test_from_environment_posix_locale() {
        assert_eq!(Language::from_environment("ar_QA.UTF-8"), Some(Language::ARABIC));
    }

    #[test]
    fn test_from_environment_bcp47_tag() {
        let language = Language::from_environment("fr-CA").unwrap();
        assert_eq!(language.code(), "fr");
    }

    #[test]
    fn test_from_environment_uppercase() {
        assert_eq!(Language::from_environment("EN"), Some(Language::ENGLISH));
    }

    #[test]
    fn test_from_environment_unsupported() {
        assert_eq!(Language::from_environment("pt_BR.UTF-8"), None);
        assert_eq!(Language::from_environment("C"), None);
        assert_eq!(Language::from_environment(""), None);
    }

    #[test]
    fn test_fallback_is_english() {
        assert_eq!(Language::fallback(), Language::ENGLISH);
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_language_equality() {
        let lang1 = Language::ENGLISH;
        let lang2 = Language::from_code("en").unwrap();
        assert_eq!(lang1, lang2);
        assert_ne!(Language::ENGLISH, Language::ARABIC);
    }

    #[test]
    fn test_language_locale_access() {
        let locale = Language::ARABIC.locale();
        assert_eq!(locale.code, "ar");
        assert_eq!(locale.currency.iso_code, "QAR");
    }
}
