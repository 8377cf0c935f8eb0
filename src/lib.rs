//! Library exports for the Castlist application.

/// Application directory helpers.
pub mod app_dirs;
/// TOML-backed configuration.
pub mod config;
/// egui application: controller, state, renderer.
pub mod egui_app;
/// Shared HTTP client configuration and helpers.
pub mod http_client;
/// Logging setup.
pub mod logging;
/// Speaker roster and store client.
pub mod speakers;
/// Transcript lines and speaker badges.
pub mod transcript;
