//! A holographic glyph projector effect built with Rust and the Bevy game
//! engine.
//!
//! Self-propagating glyphs, growing glyph matrices and wandering cursors on a
//! wrapping grid, simulated on a fixed timestep.

use glyph_projector::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    match core::run_app(cli_args) {
        Ok(()) => {}
        Err(error) => core::platform::handle_error(error),
    }
}
