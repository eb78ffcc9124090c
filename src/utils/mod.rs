/// Tracing subscriber initialization.
pub mod logging;
/// `webscout.toml` loading and validation.
pub mod toml_config;
