//! Glyph projector
pub mod core;
pub mod logging;
pub mod projector;
pub mod rendering;
pub mod systems;
#[cfg(test)]
mod tests;
