pub mod api;
pub mod config;
pub mod engine;
pub mod export;
pub mod loader;
pub mod tables;
