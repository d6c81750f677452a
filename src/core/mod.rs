//! Core application functionality
//!
//! This module contains the application shell around the projector:
//! - Application initialization
//! - Settings, config file and CLI handling
//! - Runners for the windowed and headless modes

pub mod app;
pub mod cli;
pub mod config_file;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use app::create_app;
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use runner::{run_app, run_headless};
