//! Internationalization core for the fleet management app.
//!
//! # Architecture
//!
//! - `registry`: single source of truth for supported locales and their conventions
//! - `language`: validated locale handle
//! - `format`: currency, number, date and time formatting per locale
//! - `rules`: locale-specific business rules and the rule engine
//! - `resolver`: active locale state, switching and document side effects
//! - `document`: planning and applying per-locale document effects
//! - `mirror`: icon mirroring under right-to-left locales
//! - `loader` / `preference`: translation and preference collaborators
//! - `validator` / `report`: translation completeness checks and reports
//! - `bindings`: context snapshot, switcher options and mirrored icons for UIs
//! - `metrics`: diagnostics counters
//!
//! # Example
//!
//! ```rust,ignore
//! use fleetify_i18n::i18n::{format_currency, LocaleResolver};
//!
//! let resolver = LocaleResolver::new(store, loader, document);
//! resolver.initialize().await?;
//! resolver.change_locale("ar").await?;
//! assert!(resolver.is_rtl());
//! assert_eq!(format_currency(1000.0, "en"), "$1,000.00");
//! ```

pub mod bindings;
pub mod document;
mod error;
pub mod format;
mod language;
pub mod loader;
mod metrics;
pub mod mirror;
pub mod preference;
mod registry;
pub mod report;
pub mod resolver;
pub mod rules;
pub mod validator;

pub use bindings::{switcher_options, LocaleContext, MirroredIcon, SwitcherOption};
pub use document::{plan_document_effects, DocumentOp, DocumentSink, InMemoryDocument};
pub use error::I18nError;
pub use format::{
    format_currency, format_date, format_date_time, format_number, format_time, DateOptions,
    DateValue, MonthStyle,
};
pub use language::Language;
pub use loader::{FsTranslationLoader, StaticTranslationLoader, TranslationLoader, TranslationMap};
pub use metrics::{I18nMetrics, MetricsReport};
pub use mirror::{mirror_transform, should_mirror};
pub use preference::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use registry::{
    ComponentOrder, CurrencyConfig, DateConfig, Direction, Grouping, Locale, LocaleRegistry,
    NumberConfig, SymbolPosition, DEFAULT_LOCALE,
};
pub use report::{generate_report, summarize, ValidationSummary};
pub use resolver::{ActiveLocaleState, ChangeOutcome, LocaleResolver, ResolverState};
pub use rules::{BusinessRuleEngine, BusinessRuleSet, RuleCategory, RuleInput, RuleValidation};
pub use validator::{
    IssueType, Severity, TranslationValidator, ValidationIssue, ValidationResult,
    ValidationStatus, ValidatorConfig,
};
