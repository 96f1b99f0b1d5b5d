//! Active locale resolution and switching.
//!
//! The resolver owns the only mutable locale state in the crate. It starts
//! `Uninitialized`, becomes `Ready` after [`LocaleResolver::initialize`]
//! resolves a locale and applies its document effects, or `Error` if that
//! bootstrap fails. Calling `initialize` again from `Error` is the retry.
//!
//! Locale changes run in a fixed order: persist the preference, publish the
//! new state, apply document effects, notify listeners. A step that fails
//! leaves the published state at its previous value and runs no later step.
//!
//! Each change is stamped with a sequence number before its translations
//! load. Once loaded it commits only if no newer change was issued in the
//! meantime, so a slow switch can never overwrite a faster, later one.

use crate::i18n::document::{plan_document_effects, DocumentSink};
use crate::i18n::loader::{TranslationLoader, TranslationMap, DEFAULT_NAMESPACES};
use crate::i18n::preference::PreferenceStore;
use crate::i18n::{Direction, I18nError, I18nMetrics, Language, Locale};
use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

/// Lifecycle of a [`LocaleResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverState {
    Uninitialized,
    Ready,
    /// Bootstrap failed; the message is shown next to a manual retry
    Error(String),
}

/// Snapshot published to subscribers on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLocaleState {
    pub language: Language,
    pub state: ResolverState,
    /// Sequence number of the change that produced this snapshot
    pub sequence: u64,
}

impl ActiveLocaleState {
    pub fn code(&self) -> &'static str {
        self.language.code()
    }

    pub fn is_initialized(&self) -> bool {
        self.state == ResolverState::Ready
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ResolverState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Result of a successful [`LocaleResolver::change_locale`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The new locale is active
    Applied,
    /// A newer change was issued while this one was loading; nothing applied
    Superseded,
}

/// Callback invoked with the new language after a change is applied.
pub type LocaleListener = Box<dyn Fn(Language) + Send + Sync>;

/// Resolves, switches and publishes the active locale.
pub struct LocaleResolver {
    store: Arc<dyn PreferenceStore>,
    loader: Arc<dyn TranslationLoader>,
    document: Arc<dyn DocumentSink>,
    namespaces: Vec<String>,
    environment_locale: Option<String>,
    fallback: Language,

    state: watch::Sender<ActiveLocaleState>,

    /// Serializes the write path; holds the locale whose effects are applied
    applied: Mutex<Option<&'static Locale>>,

    sequence: AtomicU64,
    catalog: RwLock<HashMap<String, TranslationMap>>,
    listeners: RwLock<Vec<Arc<dyn Fn(Language) + Send + Sync>>>,
}

impl LocaleResolver {
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        loader: Arc<dyn TranslationLoader>,
        document: Arc<dyn DocumentSink>,
    ) -> Self {
        let (state, _) = watch::channel(ActiveLocaleState {
            language: Language::fallback(),
            state: ResolverState::Uninitialized,
            sequence: 0,
        });

        Self {
            store,
            loader,
            document,
            namespaces: DEFAULT_NAMESPACES.iter().map(|ns| ns.to_string()).collect(),
            environment_locale: None,
            fallback: Language::fallback(),
            state,
            applied: Mutex::new(None),
            sequence: AtomicU64::new(0),
            catalog: RwLock::new(HashMap::new()),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Namespaces loaded on initialization and on every change.
    pub fn with_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    /// Host locale string (e.g. `LANG`) consulted when no preference is stored.
    pub fn with_environment_locale(mut self, raw: Option<String>) -> Self {
        self.environment_locale = raw;
        self
    }

    /// Language used when neither a stored nor an environment locale resolves.
    pub fn with_fallback(mut self, fallback: Language) -> Self {
        self.fallback = fallback;
        self.state.send_modify(|state| state.language = fallback);
        self
    }

    // ==================== Readers ====================

    pub fn snapshot(&self) -> ActiveLocaleState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published state change.
    pub fn subscribe(&self) -> watch::Receiver<ActiveLocaleState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> Language {
        self.state.borrow().language
    }

    pub fn is_rtl(&self) -> bool {
        self.current().is_rtl()
    }

    pub fn direction(&self) -> Direction {
        self.current().direction()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.borrow().is_initialized()
    }

    /// Translated string for `key`, or the key itself when absent.
    pub fn translate(&self, namespace: &str, key: &str) -> String {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(namespace)
            .and_then(|map| map.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// [`translate`](Self::translate) with `{{name}}` placeholders filled in.
    pub fn translate_with(&self, namespace: &str, key: &str, params: &[(&str, &str)]) -> String {
        params
            .iter()
            .fold(self.translate(namespace, key), |text, (name, value)| {
                text.replace(&format!("{{{{{}}}}}", name), value)
                    .replace(&format!("{{{{ {} }}}}", name), value)
            })
    }

    /// Register a callback for applied locale changes.
    pub fn on_change(&self, listener: LocaleListener) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::from(listener));
    }

    // ==================== Writers ====================

    /// Resolve the initial locale and apply its effects.
    ///
    /// Order: stored preference, then the environment locale, then the
    /// fallback. A stored code that is no longer registered is ignored.
    /// Does nothing once `Ready`.
    ///
    /// # Errors
    /// `I18nError::InitializationFailure` if translations cannot be loaded
    /// or the document rejects the effects. The resolver is then in `Error`.
    pub async fn initialize(&self) -> Result<(), I18nError> {
        let mut applied = self.applied.lock().await;
        if self.is_initialized() {
            return Ok(());
        }

        let language = self.resolve_initial().await;
        info!("Initializing locale '{}'", language.code());

        let catalog = match self.load_catalog(language).await {
            Ok(catalog) => catalog,
            Err(e) => return Err(self.fail_initialization(e.to_string())),
        };

        let locale = language.locale();
        if let Err(e) = self.document.apply(&plan_document_effects(*applied, locale)) {
            return Err(self.fail_initialization(format!("{:#}", e)));
        }

        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = catalog;
        *applied = Some(locale);
        let sequence = self.sequence.load(Ordering::SeqCst);
        self.state.send_replace(ActiveLocaleState {
            language,
            state: ResolverState::Ready,
            sequence,
        });

        info!(
            "Locale '{}' ready ({})",
            language.code(),
            language.direction()
        );
        Ok(())
    }

    /// Switch the active locale.
    ///
    /// # Errors
    /// - `UnknownLocale` if `code` is not registered
    /// - `NotInitialized` before a successful `initialize`
    /// - `TranslationLoad`, `Preference` or `DocumentEffects` if a step fails
    ///
    /// In every error case the published state is left unchanged.
    pub async fn change_locale(&self, code: &str) -> Result<ChangeOutcome, I18nError> {
        let language = Language::from_code(code)?;
        if !self.is_initialized() {
            return Err(I18nError::NotInitialized);
        }

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Locale change #{} to '{}' started", sequence, code);

        let catalog = self.load_catalog(language).await?;

        let mut applied = self.applied.lock().await;
        let latest = self.sequence.load(Ordering::SeqCst);
        if sequence != latest {
            debug!(
                "Locale change #{} to '{}' superseded by #{}",
                sequence, code, latest
            );
            return Ok(ChangeOutcome::Superseded);
        }

        let previous_state = self.snapshot();
        let prev_locale = *applied;
        let locale = language.locale();

        // 1. persist
        self.store
            .save(language.code())
            .await
            .map_err(|e| I18nError::Preference(format!("{:#}", e)))?;

        // 2. publish
        self.state.send_replace(ActiveLocaleState {
            language,
            state: ResolverState::Ready,
            sequence,
        });

        // 3. document effects
        if let Err(e) = self.document.apply(&plan_document_effects(prev_locale, locale)) {
            warn!("Document effects for '{}' failed: {:#}", code, e);
            // Ops before the failure may have landed; put the previous locale back
            if let Some(prev) = prev_locale {
                if let Err(e) = self.document.apply(&plan_document_effects(Some(locale), prev)) {
                    warn!("Could not restore document for '{}': {:#}", prev.code, e);
                }
            }
            self.state.send_replace(previous_state.clone());
            if let Err(e) = self.store.save(previous_state.code()).await {
                warn!("Could not restore language preference: {:#}", e);
            }
            return Err(I18nError::DocumentEffects(format!("{:#}", e)));
        }

        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = catalog;
        *applied = Some(locale);

        // 4. notify, still under the write lock so listeners see changes in order.
        // The listener list is copied so a listener may register another.
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in &listeners {
            listener(language);
        }

        info!(
            "Switched locale to '{}' ({})",
            language.code(),
            language.direction()
        );
        Ok(ChangeOutcome::Applied)
    }

    async fn resolve_initial(&self) -> Language {
        let stored = match self.store.load().await {
            Ok(Some(code)) => match Language::from_code(&code) {
                Ok(language) => Some(language),
                Err(e) => {
                    warn!("Ignoring stored language preference: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read language preference: {:#}", e);
                None
            }
        };

        stored
            .or_else(|| {
                self.environment_locale
                    .as_deref()
                    .and_then(Language::from_environment)
            })
            .unwrap_or(self.fallback)
    }

    async fn load_catalog(
        &self,
        language: Language,
    ) -> Result<HashMap<String, TranslationMap>, I18nError> {
        let code = language.code();
        let loads = self.namespaces.iter().map(|namespace| async move {
            self.loader
                .load(code, namespace)
                .await
                .map(|map| (namespace.clone(), map))
                .map_err(|e| I18nError::TranslationLoad {
                    locale: code.to_string(),
                    namespace: namespace.clone(),
                    message: format!("{:#}", e),
                })
        });

        match try_join_all(loads).await {
            Ok(maps) => Ok(maps.into_iter().collect()),
            Err(e) => {
                I18nMetrics::global().record_load_failure();
                warn!("{}", e);
                Err(e)
            }
        }
    }

    fn fail_initialization(&self, message: String) -> I18nError {
        error!("Locale initialization failed: {}", message);
        self.state.send_modify(|state| {
            state.state = ResolverState::Error(message.clone());
        });
        I18nError::InitializationFailure(message)
    }
}
