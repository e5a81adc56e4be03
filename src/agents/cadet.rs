//! The narrow predecessor agent, kept for regression comparison.

use super::rules::{dispatch, CADET_RULES};
use super::Agent;
use crate::action::Action;
use crate::grid::TileGrid;

/// Strict subset of the expert: only ground crawlers and terrain. On grids
/// containing no shelled crawler, spider, or bee, it must agree with the
/// expert frame for frame.
pub struct CadetAgent;

impl CadetAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CadetAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for CadetAgent {
    fn id(&self) -> &'static str {
        "cadet"
    }

    fn description(&self) -> &'static str {
        "Narrow rule set: ground crawlers and terrain following only."
    }

    fn choose_action(&self, grid: &TileGrid) -> Action {
        dispatch(CADET_RULES, grid)
    }
}
