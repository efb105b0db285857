//! Shared UI crate for ModelYourData: upload flow, analysis dashboard, and the
//! utilities both depend on. Launchers only add routing and global resources.

pub mod analysis;
pub mod core;
pub mod i18n;
pub mod upload;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub mod toast;

    pub use app_navbar::{register_nav, AppNavbar, NavBuilder};
    pub use toast::{use_toast_provider, use_toaster, ToastHost, ToastKind, Toaster};
}

/// Shared stylesheet. Launchers inject it once at the root.
pub const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/theme/main.css"
));
