pub mod cache;
pub mod log_redact;
pub mod logging;
