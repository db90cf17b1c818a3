//! Localization for `pulseboard-ui`.
//!
//! Fluent bundles live under `i18n/<lang>/pulseboard-ui.ftl` and are embedded
//! with `rust-embed`. `en-US` is the fallback and the reference key set.
//!
//! ```ignore
//! use crate::t;
//! crate::i18n::init(); // idempotent
//! let title = t!("dashboard-title");
//! ```
//!
//! Desktop builds ask the OS for preferred locales, web builds read
//! `navigator.languages`. The active language also decides how KPI numbers
//! are grouped ([`number_grouping`]).
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::{langid, LanguageIdentifier};

use crate::core::format::Grouping;

pub use i18n_embed_fl::fl;

/// Look up a message id literal, with optional named arguments, through [`LOADER`].
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; the fallback file is `i18n/en-US/{DOMAIN}.ftl`.
const DOMAIN: &str = "pulseboard-ui";

const FALLBACK: LanguageIdentifier = langid!("en-US");

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let loader = FluentLanguageLoader::new(DOMAIN, FALLBACK);
    // Plain text output; no bidi isolation marks around arguments.
    loader.set_use_isolating(false);
    loader
});

static INIT: Once = Once::new();

/// Load bundles for the user's preferred languages (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            tracing::warn!("failed selecting languages ({err}); continuing with fallback");
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        tracing::debug!(tag, "ignoring invalid language tag");
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Embedded language identifiers, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

pub fn current_language() -> LanguageIdentifier {
    LOADER.current_language()
}

/// Digit grouping for the active language: lakh/crore for Hindi.
pub fn number_grouping() -> Grouping {
    grouping_for(&current_language())
}

pub fn grouping_for(lang: &LanguageIdentifier) -> Grouping {
    if lang.language.as_str() == "hi" {
        Grouping::Indian
    } else {
        Grouping::Western
    }
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_languages() {
        let langs = available_languages();
        assert!(langs.iter().any(|l| l == "en-US"));
        assert!(langs.iter().any(|l| l == "hi-IN"));
    }

    #[test]
    fn invalid_tag_keeps_current_language() {
        init();
        let before = current_language();
        assert!(set_language("not a tag!").is_ok());
        assert_eq!(current_language(), before);
    }

    #[test]
    fn fallback_messages_resolve() {
        init();
        assert_eq!(crate::t!("nav-dashboard"), "Dashboard");
        assert_eq!(crate::t!("filter-matches", count = 6), "6 states match");
    }

    #[test]
    fn hindi_uses_indian_grouping() {
        assert_eq!(grouping_for(&langid!("hi-IN")), Grouping::Indian);
        assert_eq!(grouping_for(&langid!("en-US")), Grouping::Western);
        assert_eq!(grouping_for(&langid!("en-IN")), Grouping::Western);
    }
}
