//! Reactive rule-based autopilot for Game Boy *Super Mario Land*.
//!
//! Reads a symbolic 16x20 tile grid each frame and emits one discrete
//! action. No learning, no lookahead over future states, no memory between
//! frames: the controller self-corrects every frame from the current screen.

pub mod action;
pub mod agents;
pub mod benchmark;
pub mod grid;
pub mod runner;
pub mod trace;
pub mod util;

use action::Action;
use agents::rules::{dispatch, FULL_RULES};
use grid::TileGrid;

/// The core decision step: one grid in, one action out. Pure and total —
/// suitable for unit testing with synthetic grids and no emulator present.
pub fn choose_action(grid: &TileGrid) -> Action {
    dispatch(FULL_RULES, grid)
}
