//! Document side effects of a locale change.
//!
//! Planning is pure: [`plan_document_effects`] turns a (previous, next)
//! locale pair into an ordered list of [`DocumentOp`]s. Applying them is the
//! job of a [`DocumentSink`]. Every op sets, removes or replaces state, so
//! re-applying a plan never changes the document a second time.

use crate::i18n::mirror::mirrored_icon_css;
use crate::i18n::{Direction, Locale, LocaleRegistry};
use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, PoisonError};

/// Root attribute holding the locale code.
pub const LANG_ATTRIBUTE: &str = "lang";

/// Root attribute holding the text direction.
pub const DIR_ATTRIBUTE: &str = "dir";

/// Id of the single stylesheet block the resolver owns.
pub const DIRECTION_STYLE_ID: &str = "fleetify-direction-styles";

/// One idempotent write against the host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOp {
    /// Set a root element attribute, replacing any previous value.
    SetAttribute { name: &'static str, value: String },
    /// Remove a body class if present.
    RemoveClass(String),
    /// Add a body class if absent.
    AddClass(String),
    /// Insert a stylesheet block, or replace it if the id already exists.
    ReplaceStyle { id: &'static str, css: String },
}

/// Host document that applies planned effects.
pub trait DocumentSink: Send + Sync {
    /// Apply the ops in order. A failure leaves later ops unapplied.
    fn apply(&self, ops: &[DocumentOp]) -> Result<()>;
}

/// Plan the document writes for switching from `prev` to `next`.
///
/// Order: `lang`, `dir`, direction classes, font classes, stylesheet. When
/// `prev` is unknown every font class any locale may apply is cleared.
pub fn plan_document_effects(prev: Option<&Locale>, next: &Locale) -> Vec<DocumentOp> {
    let direction = next.direction;
    let mut ops = vec![
        DocumentOp::SetAttribute {
            name: LANG_ATTRIBUTE,
            value: next.code.to_string(),
        },
        DocumentOp::SetAttribute {
            name: DIR_ATTRIBUTE,
            value: direction.as_str().to_string(),
        },
        DocumentOp::RemoveClass(direction.opposite().as_str().to_string()),
        DocumentOp::AddClass(direction.as_str().to_string()),
    ];

    let stale_fonts: Vec<&str> = match prev {
        Some(prev) => prev.font_hint.into_iter().collect(),
        None => LocaleRegistry::global().font_hints(),
    };
    ops.extend(
        stale_fonts
            .into_iter()
            .filter(|font| Some(*font) != next.font_hint)
            .map(|font| DocumentOp::RemoveClass(font.to_string())),
    );
    if let Some(font) = next.font_hint {
        ops.push(DocumentOp::AddClass(font.to_string()));
    }

    ops.push(DocumentOp::ReplaceStyle {
        id: DIRECTION_STYLE_ID,
        css: direction_css(next),
    });
    ops
}

/// Mirrored-icon and mixed-content rules for the locale's direction.
fn direction_css(locale: &Locale) -> String {
    let mut css = String::new();
    match locale.direction {
        Direction::Rtl => {
            css.push_str(&mirrored_icon_css(locale.mirrored_icons));
            css.push_str(
                "[dir=\"rtl\"] .ltr-content { direction: ltr; unicode-bidi: isolate; }\n",
            );
            css.push_str(
                "[dir=\"rtl\"] input[type=\"email\"], [dir=\"rtl\"] input[type=\"url\"], \
                 [dir=\"rtl\"] input[type=\"tel\"] { direction: ltr; text-align: right; }\n",
            );
        }
        Direction::Ltr => {
            css.push_str(
                "[dir=\"ltr\"] .rtl-content { direction: rtl; unicode-bidi: isolate; }\n",
            );
        }
    }
    css
}

/// Observable state of an [`InMemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    pub attributes: BTreeMap<String, String>,
    pub body_classes: BTreeSet<String>,
    pub styles: BTreeMap<String, String>,
}

impl DocumentState {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn style(&self, id: &str) -> Option<&str> {
        self.styles.get(id).map(String::as_str)
    }

    fn apply(&mut self, op: &DocumentOp) {
        match op {
            DocumentOp::SetAttribute { name, value } => {
                self.attributes.insert(name.to_string(), value.clone());
            }
            DocumentOp::RemoveClass(class) => {
                self.body_classes.remove(class);
            }
            DocumentOp::AddClass(class) => {
                self.body_classes.insert(class.clone());
            }
            DocumentOp::ReplaceStyle { id, css } => {
                self.styles.insert(id.to_string(), css.clone());
            }
        }
    }
}

/// Document held in memory, for headless hosts and tests.
#[derive(Debug, Default)]
pub struct InMemoryDocument {
    state: Mutex<DocumentState>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> DocumentState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DocumentSink for InMemoryDocument {
    fn apply(&self, ops: &[DocumentOp]) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        for op in ops {
            state.apply(op);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(code: &str) -> &'static Locale {
        LocaleRegistry::global().get(code).unwrap()
    }

    // ==================== Planning Tests ====================

    #[test]
    fn test_plan_order_for_rtl() {
        let ops = plan_document_effects(Some(locale("en")), locale("ar"));

        assert_eq!(
            ops[0],
            DocumentOp::SetAttribute {
                name: "lang",
                value: "ar".to_string()
            }
        );
        assert_eq!(
            ops[1],
            DocumentOp::SetAttribute {
                name: "dir",
                value: "rtl".to_string()
            }
        );
        assert_eq!(ops[2], DocumentOp::RemoveClass("ltr".to_string()));
        assert_eq!(ops[3], DocumentOp::AddClass("rtl".to_string()));
        assert_eq!(ops[4], DocumentOp::AddClass("font-arabic".to_string()));
        assert!(matches!(
            ops.last(),
            Some(DocumentOp::ReplaceStyle { id: DIRECTION_STYLE_ID, .. })
        ));
    }

    #[test]
    fn test_plan_removes_previous_font() {
        let ops = plan_document_effects(Some(locale("ar")), locale("en"));
        assert!(ops.contains(&DocumentOp::RemoveClass("font-arabic".to_string())));
        assert!(!ops
            .iter()
            .any(|op| matches!(op, DocumentOp::AddClass(class) if class.starts_with("font-"))));
    }

    #[test]
    fn test_plan_without_previous_clears_all_fonts() {
        let ops = plan_document_effects(None, locale("zh"));
        for font in LocaleRegistry::global().font_hints() {
            if font != "font-chinese" {
                assert!(ops.contains(&DocumentOp::RemoveClass(font.to_string())));
            }
        }
        assert!(ops.contains(&DocumentOp::AddClass("font-chinese".to_string())));
        assert!(!ops.contains(&DocumentOp::RemoveClass("font-chinese".to_string())));
    }

    #[test]
    fn test_rtl_stylesheet_mirrors_icons() {
        let ops = plan_document_effects(None, locale("ar"));
        match ops.last() {
            Some(DocumentOp::ReplaceStyle { css, .. }) => {
                assert!(css.contains(".icon-chevron-left { transform: scaleX(-1); }"));
                assert!(css.contains(".ltr-content"));
            }
            other => panic!("unexpected op: {:?}", other),
        }
    }

    #[test]
    fn test_ltr_stylesheet_has_no_mirroring() {
        let ops = plan_document_effects(None, locale("en"));
        match ops.last() {
            Some(DocumentOp::ReplaceStyle { css, .. }) => {
                assert!(!css.contains("scaleX"));
                assert!(css.contains(".rtl-content"));
            }
            other => panic!("unexpected op: {:?}", other),
        }
    }

    // ==================== Application Tests ====================

    #[test]
    fn test_apply_sets_document_state() {
        let document = InMemoryDocument::new();
        document
            .apply(&plan_document_effects(None, locale("ar")))
            .unwrap();

        let state = document.snapshot();
        assert_eq!(state.attribute("lang"), Some("ar"));
        assert_eq!(state.attribute("dir"), Some("rtl"));
        assert!(state.has_class("rtl"));
        assert!(!state.has_class("ltr"));
        assert!(state.has_class("font-arabic"));
        assert_eq!(state.styles.len(), 1);
    }

    #[test]
    fn test_apply_twice_is_idempotent() {
        let document = InMemoryDocument::new();
        let plan = plan_document_effects(None, locale("ar"));

        document.apply(&plan).unwrap();
        let once = document.snapshot();
        document.apply(&plan).unwrap();

        assert_eq!(document.snapshot(), once);
    }

    #[test]
    fn test_switching_back_leaves_no_stale_state() {
        let document = InMemoryDocument::new();
        document
            .apply(&plan_document_effects(None, locale("en")))
            .unwrap();
        let initial = document.snapshot();

        document
            .apply(&plan_document_effects(Some(locale("en")), locale("ar")))
            .unwrap();
        document
            .apply(&plan_document_effects(Some(locale("ar")), locale("en")))
            .unwrap();

        assert_eq!(document.snapshot(), initial);
    }

    #[test]
    fn test_font_classes_do_not_accumulate() {
        let document = InMemoryDocument::new();
        let mut prev: Option<&Locale> = None;
        for code in ["zh", "hi", "ja", "ar"] {
            document
                .apply(&plan_document_effects(prev, locale(code)))
                .unwrap();
            prev = Some(locale(code));
        }

        let fonts: Vec<_> = document
            .snapshot()
            .body_classes
            .into_iter()
            .filter(|class| class.starts_with("font-"))
            .collect();
        assert_eq!(fonts, vec!["font-arabic".to_string()]);
    }
}
