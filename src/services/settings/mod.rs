// Settings service
// TOML-backed persistence of view settings

mod service;

pub use service::SettingsService;
