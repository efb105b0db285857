#![cfg(test)]
/*!
Theme selector lint for the web build.

The launcher injects `ui/assets/theme/main.css` verbatim, and the components
in `ui` style themselves purely through class names. This test fails when a
selector a component depends on disappears from the theme.

If you rename a class, update the component markup and `REQUIRED_SELECTORS`
together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    ":root",
    "body {",
    ".page {",
    ".visually-hidden",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--ghost",
    // Navbar
    ".navbar {",
    ".navbar__links",
    ".navbar__locale",
    // Upload
    ".dropzone {",
    ".dropzone.dragover",
    ".file-input",
    ".file-preview",
    ".progress-bar",
    ".progress-fill",
    ".error-message",
    // Dashboard
    ".operation-btn.active",
    ".param-panel",
    ".viz-container.fullscreen",
    ".spinner",
    ".stats-grid",
    ".stat-card",
    ".stat-value",
    ".stat-label",
    ".table-wrapper",
    ".eda-report",
    ".eda-section-title",
    ".viz-info",
    ".info-item",
    ".info-label",
    ".info-value",
    // Toasts
    ".toast-container",
    ".toast.success",
    ".toast.error",
    ".toast.warning",
    ".toast.info",
    "@media (max-width: 720px)",
];

#[test]
fn theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in the theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars)"
    );
}

#[test]
fn toast_fade_matches_removal_delay() {
    // ClientConfig::default().toast_fade_ms is 300.
    assert!(THEME_CSS.contains("transition: opacity 300ms"));
}

#[test]
fn theme_is_the_one_the_ui_crate_exports() {
    assert_eq!(THEME_CSS, ui::THEME_CSS);
}
