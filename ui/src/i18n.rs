//! Localization of the UI chrome.
//!
//! Messages live in `i18n/<locale>/modelyourdata_ui.ftl` and are embedded at
//! compile time. `en-US` is the fallback and the reference key set; every other
//! locale must define the same keys (see `tests/i18n_missing_keys.rs`).
//!
//! Strings shared with the server (validation errors, report labels, toast
//! texts) stay as English constants next to the code that emits them.
//!
//! ```ignore
//! crate::i18n::init(); // idempotent
//! let label = crate::t!("nav-upload");
//! ```
use std::sync::Once;

use dioxus::logger::tracing::{debug, warn};
use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Look up a message through the shared loader, optionally with `name = value` arguments.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// `fl!` derives the domain from the crate name with `-` mapped to `_`; the
/// FTL files carry the same name.
const DOMAIN: &str = "modelyourdata_ui";

pub const FALLBACK_LANGUAGE: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK_LANGUAGE
        .parse()
        .expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match i18n_embed::select(&*LOADER, &Localizations, &requested) {
            Ok(selected) => debug!("i18n selected {selected:?}"),
            Err(err) => warn!("i18n language selection failed ({err}); using {FALLBACK_LANGUAGE}"),
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Locale folders embedded in the binary, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
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
    fn both_locales_are_embedded() {
        assert_eq!(available_languages(), ["en-US", "es-ES"]);
    }

    #[test]
    fn switching_languages_changes_lookups() {
        init();
        set_language("es-ES").unwrap();
        assert_eq!(fl!(&*LOADER, "nav-upload"), "Subir datos");

        // Unparseable tags leave the current selection alone.
        let _ = set_language("???");
        assert_eq!(fl!(&*LOADER, "nav-upload"), "Subir datos");

        set_language("en-US").unwrap();
        assert_eq!(fl!(&*LOADER, "nav-upload"), "Upload Data");
    }
}
