//! Icon mirroring policy.
//!
//! Mirroring only changes how an icon is drawn, never which icon it is.
//! The decision is re-derived from `(icon, locale, force)` on every call.

use crate::i18n::LocaleRegistry;

/// CSS transform that flips an element horizontally.
pub const MIRROR_TRANSFORM: &str = "scaleX(-1)";

/// Whether `icon` should be flipped for the locale.
///
/// `force` mirrors unconditionally. Otherwise the locale must be
/// right-to-left and list the icon (case-insensitive) in its mirrored set.
/// Unknown locale codes never mirror.
pub fn should_mirror(icon: &str, code: &str, force: bool) -> bool {
    if force {
        return true;
    }
    match LocaleRegistry::global().get(code) {
        Ok(locale) if locale.is_rtl() => locale
            .mirrored_icons
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(icon.trim())),
        _ => false,
    }
}

/// Compose the flip with any transform the caller already applies.
///
/// Returns `None` when there is nothing to set.
pub fn mirror_transform(mirror: bool, existing: Option<&str>) -> Option<String> {
    let existing = existing.map(str::trim).filter(|t| !t.is_empty());
    match (mirror, existing) {
        (true, Some(existing)) => Some(format!("{} {}", existing, MIRROR_TRANSFORM)),
        (true, None) => Some(MIRROR_TRANSFORM.to_string()),
        (false, existing) => existing.map(str::to_string),
    }
}

/// `[dir="rtl"]`-scoped rules that flip every icon in `icons`.
pub(crate) fn mirrored_icon_css(icons: &[&str]) -> String {
    icons
        .iter()
        .map(|icon| {
            format!(
                "[dir=\"rtl\"] .icon-{} {{ transform: {}; }}\n",
                icon, MIRROR_TRANSFORM
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== should_mirror Tests ====================

    #[test]
    fn test_mirror_listed_icon_in_rtl() {
        assert!(should_mirror("chevron-left", "ar", false));
    }

    #[test]
    fn test_no_mirror_in_ltr() {
        assert!(!should_mirror("chevron-left", "en", false));
    }

    #[test]
    fn test_no_mirror_for_unlisted_icon() {
        assert!(!should_mirror("unlisted-icon", "ar", false));
    }

    #[test]
    fn test_mirror_is_case_insensitive() {
        assert!(should_mirror("Chevron-Left", "ar", false));
        assert!(should_mirror("ARROW-RIGHT", "ar", false));
    }

    #[test]
    fn test_force_mirror_overrides_direction() {
        assert!(should_mirror("unlisted-icon", "en", true));
        assert!(should_mirror("anything", "xx", true));
    }

    #[test]
    fn test_unknown_locale_never_mirrors() {
        assert!(!should_mirror("chevron-left", "xx", false));
    }

    // ==================== Transform Tests ====================

    #[test]
    fn test_transform_alone() {
        assert_eq!(mirror_transform(true, None), Some("scaleX(-1)".to_string()));
    }

    #[test]
    fn test_transform_appends_to_existing() {
        assert_eq!(
            mirror_transform(true, Some("rotate(45deg)")),
            Some("rotate(45deg) scaleX(-1)".to_string())
        );
    }

    #[test]
    fn test_transform_not_mirrored_keeps_existing() {
        assert_eq!(
            mirror_transform(false, Some("rotate(45deg)")),
            Some("rotate(45deg)".to_string())
        );
        assert_eq!(mirror_transform(false, None), None);
        assert_eq!(mirror_transform(false, Some("  ")), None);
    }

    #[test]
    fn test_mirrored_icon_css() {
        let css = mirrored_icon_css(&["chevron-left"]);
        assert_eq!(
            css,
            "[dir=\"rtl\"] .icon-chevron-left { transform: scaleX(-1); }\n"
        );
    }

    proptest! {
        #[test]
        fn prop_ltr_locales_never_mirror(icon in "[a-zA-Z-]{1,20}") {
            for locale in LocaleRegistry::global().locales() {
                if !locale.is_rtl() {
                    prop_assert!(!should_mirror(&icon, locale.code, false));
                }
            }
        }
    }
}
