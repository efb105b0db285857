//! Translation guards.
//!
//! * every locale defines every key of the fallback (`en-US`) bundle;
//! * every `t!("...")` literal under `src/` exists in the fallback bundle.
//!
//! Adding a locale: create `i18n/<locale>/modelyourdata_ui.ftl`, copy the
//! en-US keys, translate, and register it in `LOCALES`.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const EN_US: &str = include_str!("../i18n/en-US/modelyourdata_ui.ftl");
const ES_ES: &str = include_str!("../i18n/es-ES/modelyourdata_ui.ftl");

const LOCALES: &[(&str, &str)] = &[("es-ES", ES_ES)];

/// Message ids: lines shaped `id = ...`. Comments, terms, attributes skipped.
fn extract_keys(src: &str) -> Vec<String> {
    src.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(['#', '-', '.']))
        .filter_map(|line| line.split_once('='))
        .map(|(left, _)| left.trim())
        .filter(|key| !key.is_empty() && key.chars().all(valid_key_char))
        .map(str::to_string)
        .collect()
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

fn assert_no_dup_keys(src: &str, locale: &str) {
    let mut seen = HashSet::new();
    let dups: BTreeSet<String> = extract_keys(src)
        .into_iter()
        .filter(|key| !seen.insert(key.clone()))
        .collect();
    assert!(
        dups.is_empty(),
        "Duplicate key definitions in {locale}:\n  {}",
        dups.into_iter().collect::<Vec<_>>().join("\n  ")
    );
}

/// Literal first arguments of `t!(` calls in every `.rs` file under `root`.
fn referenced_keys(root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![root.to_path_buf()];
    let needle = "t!(\"";

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(entries) = fs::read_dir(&path) {
                stack.extend(entries.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        for (idx, _) in content.match_indices(needle) {
            let rest = &content[idx + needle.len()..];
            if let Some(end) = rest.find('"') {
                let key = &rest[..end];
                if !key.is_empty() && key.chars().all(valid_key_char) {
                    found.insert(key.to_string());
                }
            }
        }
    }
    found
}

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback: BTreeSet<String> = extract_keys(EN_US).into_iter().collect();
    assert!(!fallback.is_empty(), "Fallback (en-US) contains no keys.");
    assert_no_dup_keys(EN_US, "en-US");

    let mut failures = Vec::new();
    for (locale, src) in LOCALES {
        assert_no_dup_keys(src, locale);
        let keys: HashSet<String> = extract_keys(src).into_iter().collect();
        let missing: Vec<&str> = fallback
            .iter()
            .filter(|key| !keys.contains(*key))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            failures.push(format!(
                "Locale {locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing.join("\n  ")
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "Translation completeness check failed:\n\n{}",
        failures.join("\n\n")
    );
}

#[test]
fn every_referenced_key_exists_in_fallback() {
    let fallback: HashSet<String> = extract_keys(EN_US).into_iter().collect();
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let referenced = referenced_keys(&src_root);
    assert!(!referenced.is_empty(), "no t!() calls found under {src_root:?}");

    let missing: Vec<&String> = referenced
        .iter()
        .filter(|key| !fallback.contains(*key))
        .collect();
    assert!(
        missing.is_empty(),
        "Referenced translation keys missing in en-US: {missing:?}"
    );
}

#[test]
fn key_parser_skips_comments_and_attributes() {
    let src = "# heading = no\nfirst = One\n    .title = attr\n-term = T\nsecond=Two\n";
    assert_eq!(extract_keys(src), ["first", "second"]);
}

#[test]
fn bundle_files_are_named_after_the_crate_domain() {
    let domain = env!("CARGO_PKG_NAME").replace('-', "_");
    let i18n_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("i18n");
    for locale in std::iter::once("en-US").chain(LOCALES.iter().map(|(name, _)| *name)) {
        let bundle = i18n_root.join(locale).join(format!("{domain}.ftl"));
        assert!(bundle.is_file(), "{} is missing", bundle.display());
    }
}
