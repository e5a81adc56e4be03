//! Agent trait and roster.
//!
//! An agent is a pure per-frame policy: tile grid in, one action out. Agents
//! hold no state between frames and never touch the emulator directly; the
//! runner owns the capture/execute loop.

mod cadet;
mod expert;
pub mod rules;

pub use cadet::CadetAgent;
pub use expert::ExpertAgent;

use crate::action::Action;
use crate::grid::TileGrid;

pub trait Agent {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Total: always returns a valid action, for any grid.
    fn choose_action(&self, grid: &TileGrid) -> Action;
}

pub fn agent_ids() -> &'static [&'static str] {
    &["expert", "cadet"]
}

pub fn create_agent(id: &str) -> Option<Box<dyn Agent>> {
    match id {
        "expert" => Some(Box::new(ExpertAgent::new())),
        "cadet" => Some(Box::new(CadetAgent::new())),
        _ => None,
    }
}

pub fn describe_agents() -> Vec<(&'static str, &'static str)> {
    agent_ids()
        .iter()
        .filter_map(|id| create_agent(id).map(|agent| (agent.id(), agent.description())))
        .collect()
}
