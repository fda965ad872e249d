//! Throw Control Module
//!
//! This module handles the single throw of the die: the button that requests
//! it, the deferred throw that fires after the launch shot has begun, and the
//! randomized initial body state.

mod state;
mod systems;
mod ui;

pub use state::*;
pub use systems::*;
pub use ui::*;
