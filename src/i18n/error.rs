//! Errors surfaced by the locale core.
//!
//! Only `UnknownLocale` and `InitializationFailure` are meant to reach the
//! presentation layer. Formatting and rule lookups never fail; translation
//! validation turns load failures into `Invalid` results instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum I18nError {
    /// The requested code is not in the locale registry.
    #[error("Unknown locale code: '{0}'")]
    UnknownLocale(String),

    /// The initial locale bootstrap failed. The UI offers a manual retry.
    #[error("Locale initialization failed: {0}")]
    InitializationFailure(String),

    /// `change_locale` was called before a successful `initialize`.
    #[error("Locale resolver is not initialized")]
    NotInitialized,

    /// A translation namespace could not be loaded for a locale change.
    #[error("Failed to load '{namespace}' translations for '{locale}': {message}")]
    TranslationLoad {
        locale: String,
        namespace: String,
        message: String,
    },

    /// The preference store rejected the new locale.
    #[error("Failed to persist language preference: {0}")]
    Preference(String),

    /// The document sink could not apply a locale's effects.
    #[error("Failed to apply document effects: {0}")]
    DocumentEffects(String),
}

impl I18nError {
    pub fn is_unknown_locale(&self) -> bool {
        matches!(self, I18nError::UnknownLocale(_))
    }
}
