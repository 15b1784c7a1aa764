pub mod config;
pub mod progress;
pub mod ranking;
pub mod reserve;
