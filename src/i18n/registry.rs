//! Locale registry: Single source of truth for all supported locales.
//!
//! The table is built once on first access (`OnceLock`) and is immutable
//! thereafter. Every `Locale` is fully populated at registration time so
//! downstream code never has to deal with absent conventions.

use crate::i18n::I18nError;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Code of the locale everything falls back to.
pub const DEFAULT_LOCALE: &str = "en";

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Value used for the root `dir` attribute and the body class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Ltr => Direction::Rtl,
            Direction::Rtl => Direction::Ltr,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order of the date components in the locale's short numeric form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentOrder {
    /// month/day/year
    Mdy,
    /// day/month/year
    Dmy,
    /// year/month/day
    Ymd,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateConfig {
    /// Tag handed to the localized calendar backend (e.g. "en-US", "ar-QA")
    pub calendar_tag: &'static str,
    pub order: ComponentOrder,
    pub separator: &'static str,
    /// 0 = Sunday .. 6 = Saturday
    pub first_day_of_week: u8,
    /// Whether times are shown on a 12-hour clock
    pub hour12: bool,
}

/// Digit grouping scheme for the integer part of a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grouping {
    /// Groups of three: 1,234,567
    Thousands,
    /// Last three, then groups of two: 12,34,567
    Indian,
}

#[derive(Debug, Clone, Serialize)]
pub struct NumberConfig {
    pub decimal_separator: &'static str,
    pub grouping_separator: &'static str,
    pub grouping: Grouping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    After,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrencyConfig {
    /// ISO 4217 code (e.g. "USD", "QAR")
    pub iso_code: &'static str,
    pub symbol: &'static str,
    pub calendar_tag: &'static str,
    pub decimal_places: usize,
    pub symbol_position: SymbolPosition,
    /// Whether a non-breaking space separates symbol and amount
    pub spaced: bool,
}

/// Configuration for a supported locale.
#[derive(Debug, Clone, Serialize)]
pub struct Locale {
    /// Short stable identifier (e.g. "en", "ar"), used as key everywhere
    pub code: &'static str,

    /// English name (e.g. "Arabic")
    pub name: &'static str,

    /// Native name (e.g. "العربية")
    pub native_name: &'static str,

    pub direction: Direction,
    pub date: DateConfig,
    pub number: NumberConfig,
    pub currency: CurrencyConfig,

    /// Body class applied while the locale is active
    pub font_hint: Option<&'static str>,

    /// Icons flipped horizontally when this locale is right-to-left
    pub mirrored_icons: &'static [&'static str],
}

impl Locale {
    pub fn is_rtl(&self) -> bool {
        self.direction == Direction::Rtl
    }
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<Locale>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global registry, building it on first call.
    pub fn global() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Look up a locale by code.
    ///
    /// # Errors
    /// `I18nError::UnknownLocale` if the code is not registered. Boundary
    /// callers (resolver, formatting) fall back instead of propagating this.
    pub fn get(&self, code: &str) -> Result<&Locale, I18nError> {
        self.locales
            .iter()
            .find(|locale| locale.code == code)
            .ok_or_else(|| I18nError::UnknownLocale(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_ok()
    }

    /// Registered codes in table order, for driving switcher UIs.
    pub fn codes(&self) -> Vec<&'static str> {
        self.locales.iter().map(|locale| locale.code).collect()
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// `true` only for registered right-to-left locales.
    pub fn is_rtl(&self, code: &str) -> bool {
        self.get(code).map(Locale::is_rtl).unwrap_or(false)
    }

    /// The locale everything falls back to.
    pub fn default_locale(&self) -> &Locale {
        self.get(DEFAULT_LOCALE).unwrap_or(&self.locales[0])
    }

    /// Every font class any locale may apply, used to clear stale ones.
    pub fn font_hints(&self) -> Vec<&'static str> {
        let mut hints: Vec<&'static str> =
            self.locales.iter().filter_map(|locale| locale.font_hint).collect();
        hints.dedup();
        hints
    }
}

const RTL_MIRRORED_ICONS: &[&str] = &[
    "chevron-left",
    "chevron-right",
    "chevrons-left",
    "chevrons-right",
    "arrow-left",
    "arrow-right",
    "arrow-back",
    "arrow-forward",
    "corner-down-left",
    "corner-down-right",
    "skip-back",
    "skip-forward",
    "undo",
    "redo",
    "reply",
    "send",
    "log-in",
    "log-out",
    "external-link",
    "list",
    "align-left",
    "align-right",
    "indent",
    "outdent",
];

/// The built-in locale table, in switcher order.
fn default_locales() -> Vec<Locale> {
    vec![
        Locale {
            code: "en",
            name: "English",
            native_name: "English",
            direction: Direction::Ltr,
            date: DateConfig {
                calendar_tag: "en-US",
                order: ComponentOrder::Mdy,
                separator: "/",
                first_day_of_week: 0,
                hour12: true,
            },
            number: NumberConfig {
                decimal_separator: ".",
                grouping_separator: ",",
                grouping: Grouping::Thousands,
            },
            currency: CurrencyConfig {
                iso_code: "USD",
                symbol: "$",
                calendar_tag: "en-US",
                decimal_places: 2,
                symbol_position: SymbolPosition::Before,
                spaced: false,
            },
            font_hint: None,
            mirrored_icons: &[],
        },
        Locale {
            code: "ar",
            name: "Arabic",
            native_name: "العربية",
            direction: Direction::Rtl,
            date: DateConfig {
                calendar_tag: "ar-QA",
                order: ComponentOrder::Dmy,
                separator: "/",
                first_day_of_week: 6,
                hour12: true,
            },
            number: NumberConfig {
                decimal_separator: ".",
                grouping_separator: ",",
                grouping: Grouping::Thousands,
            },
            currency: CurrencyConfig {
                iso_code: "QAR",
                symbol: "ر.ق",
                calendar_tag: "ar-QA",
                decimal_places: 2,
                symbol_position: SymbolPosition::Before,
                spaced: true,
            },
            font_hint: Some("font-arabic"),
            mirrored_icons: RTL_MIRRORED_ICONS,
        },
        Locale {
            code: "fr",
            name: "French",
            native_name: "Français",
            direction: Direction::Ltr,
            date: DateConfig {
                calendar_tag: "fr-FR",
                order: ComponentOrder::Dmy,
                separator: "/",
                first_day_of_week: 1,
                hour12: false,
            },
            number: NumberConfig {
                decimal_separator: ",",
                grouping_separator: "\u{202f}",
                grouping: Grouping::Thousands,
            },
            currency: CurrencyConfig {
                iso_code: "EUR",
                symbol: "€",
                calendar_tag: "fr-FR",
                decimal_places: 2,
                symbol_position: SymbolPosition::After,
                spaced: true,
            },
            font_hint: None,
            mirrored_icons: &[],
        },
        Locale {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            direction: Direction::Ltr,
            date: DateConfig {
                calendar_tag: "es-ES",
                order: ComponentOrder::Dmy,
                separator: "/",
                first_day_of_week: 1,
                hour12: false,
            },
            number: NumberConfig {
                decimal_separator: ",",
                grouping_separator: ".",
                grouping: Grouping::Thousands,
            },
            currency: CurrencyConfig {
                iso_code: "EUR",
                symbol: "€",
                calendar_tag: "es-ES",
                decimal_places: 2,
                symbol_position: SymbolPosition::After,
                spaced: true,
            },
            font_hint: None,
            mirrored_icons: &[],
        },
        Locale {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            direction: Direction::Ltr,
            date: DateConfig {
                calendar_tag: "de-DE",
                order: ComponentOrder::Dmy,
                separator: ".",
                first_day_of_week: 1,
                hour12: false,
            },
            number: NumberConfig {
                decimal_separator: ",",
                grouping_separator: ".",
                grouping: Grouping::Thousands,
            },
            currency: CurrencyConfig {
                iso_code: "EUR",
                symbol: "€",
                calendar_tag: "de-DE",
                decimal_places: 2,
                symbol_position: SymbolPosition::After,
                spaced: true,
            },
            font_hint: None,
            mirrored_icons: &[],
        },
        Locale {
            code: "zh",
            name: "Chinese",
            native_name: "中文",
            direction: Direction::Ltr,
            date: DateConfig {
                calendar_tag: "zh-CN",
                order: ComponentOrder::Ymd,
                separator: "/",
                first_day_of_week: 1,
                hour12: false,
            },
            number: NumberConfig {
                decimal_separator: ".",
                grouping_separator: ",",
                grouping: Grouping::Thousands,
            },
            currency: CurrencyConfig {
                iso_code: "CNY",
                symbol: "¥",
                calendar_tag: "zh-CN",
                decimal_places: 2,
                symbol_position: SymbolPosition::Before,
                spaced: false,
            },
            font_hint: Some("font-chinese"),
            mirrored_icons: &[],
        },
        Locale {
            code: "hi",
            name: "Hindi",
            native_name: "हिन्दी",
            direction: Direction::Ltr,
            date: DateConfig {
                calendar_tag: "hi-IN",
                order: ComponentOrder::Dmy,
                separator: "/",
                first_day_of_week: 0,
                hour12: true,
            },
            number: NumberConfig {
                decimal_separator: ".",
                grouping_separator: ",",
                grouping: Grouping::Indian,
            },
            currency: CurrencyConfig {
                iso_code: "INR",
                symbol: "₹",
                calendar_tag: "hi-IN",
                decimal_places: 2,
                symbol_position: SymbolPosition::Before,
                spaced: false,
            },
            font_hint: Some("font-devanagari"),
            mirrored_icons: &[],
        },
        Locale {
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
            direction: Direction::Ltr,
            date: DateConfig {
                calendar_tag: "ja-JP",
                order: ComponentOrder::Ymd,
                separator: "/",
                first_day_of_week: 0,
                hour12: false,
            },
            number: NumberConfig {
                decimal_separator: ".",
                grouping_separator: ",",
                grouping: Grouping::Thousands,
            },
            currency: CurrencyConfig {
                iso_code: "JPY",
                symbol: "¥",
                calendar_tag: "ja-JP",
                decimal_places: 0,
                symbol_position: SymbolPosition::Before,
                spaced: false,
            },
            font_hint: Some("font-japanese"),
            mirrored_icons: &[],
        },
    ]
}
