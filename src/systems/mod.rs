//! Bevy Systems and Plugins
//!
//! This module contains Bevy-specific systems and plugin configurations:
//! - Plugin and logging configuration
//! - Fixed-timestep simulation of the projector
//! - Lifecycle systems (exit, visibility toggle)

pub mod lifecycle;
pub mod plugins;
pub mod simulation;

// Re-export commonly used items
pub use lifecycle::{exit_on_esc, log_projector_seed, toggle_projector_visibility};
pub use plugins::configure_default_plugins;
pub use simulation::{ProjectorSeed, ProjectorState, SimulationPlugin};
