pub mod config;
pub mod console;
pub mod ini;
pub mod provider;
