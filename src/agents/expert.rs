//! The full-roster reactive agent.

use super::rules::{dispatch, FULL_RULES};
use super::Agent;
use crate::action::Action;
use crate::grid::TileGrid;

/// Handles every known hazard kind plus terrain following. Stateless; each
/// frame is decided from scratch.
pub struct ExpertAgent;

impl ExpertAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExpertAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for ExpertAgent {
    fn id(&self) -> &'static str {
        "expert"
    }

    fn description(&self) -> &'static str {
        "Full rule set: crawlers, ceiling spider, bee swarm, terrain following."
    }

    fn choose_action(&self, grid: &TileGrid) -> Action {
        dispatch(FULL_RULES, grid)
    }
}
