//! Platform-agnostic helpers shared by the upload and analysis controllers.

pub mod config;
pub mod csrf;
pub mod download;
pub mod format;
pub mod http;
pub mod platform;
pub mod timing;
