// Data models
pub mod log_event;
pub mod log_settings;
