//! CLI command handlers.

mod serve;
mod show_config;

pub use serve::run_serve;
pub use show_config::run_show_config;
