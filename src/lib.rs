//! Desktop client for the Counter-Strike round outcome and headshot prediction services.

/// Application data directory helpers.
pub mod app_dirs;
/// Settings loaded from `settings.toml`.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Shared HTTP agent and bounded body reads.
pub mod http_client;
/// Tracing setup with rotating log files.
pub mod logging;
/// Prediction request/response contracts and the HTTP client.
pub mod prediction;
