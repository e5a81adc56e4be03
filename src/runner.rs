use crate::action::Action;
use crate::agents::{create_agent, Agent};
use crate::grid::TileGrid;
use crate::util::decisions_digest;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Boundary to whatever is actually running the game (emulator, recorded
/// trace, test double). `execute` must press and release every button the
/// action implies before returning; the engine treats it as blocking.
pub trait Emulator {
    fn capture_tile_grid(&mut self) -> TileGrid;
    fn execute(&mut self, action: Action) -> Result<()>;
    fn is_game_over(&self) -> bool;
}

#[derive(Clone, Debug, Serialize)]
pub struct RunMetrics {
    pub agent_id: String,
    pub max_frames: u32,
    pub frame_count: u32,
    pub game_over: bool,
    /// Digest over the action-index stream. Identical inputs must produce an
    /// identical digest; benchmark uses this to check determinism.
    pub decisions_digest: u32,
    pub down_frames: u32,
    pub left_frames: u32,
    pub right_frames: u32,
    pub up_frames: u32,
    pub jump_frames: u32,
    pub run_frames: u32,
    pub jump_right_frames: u32,
}

#[derive(Clone, Debug)]
pub struct RunArtifact {
    pub metrics: RunMetrics,
    /// One action index per decided frame, in order.
    pub actions: Vec<u8>,
}

pub fn run_agent_by_id(
    agent_id: &str,
    emulator: &mut dyn Emulator,
    max_frames: u32,
) -> Result<RunArtifact> {
    let agent = create_agent(agent_id).ok_or_else(|| anyhow!("unknown agent '{agent_id}'"))?;
    run_agent(agent.as_ref(), emulator, max_frames)
}

/// The synchronous per-frame loop: capture, decide, execute, repeat until
/// game over or the frame budget runs out. The decision step is pure; all
/// fallible work lives at the emulator boundary.
pub fn run_agent(
    agent: &dyn Agent,
    emulator: &mut dyn Emulator,
    max_frames: u32,
) -> Result<RunArtifact> {
    if max_frames == 0 {
        return Err(anyhow!("max_frames must be > 0"));
    }

    let mut actions: Vec<u8> = Vec::with_capacity(max_frames as usize);
    while (actions.len() as u32) < max_frames && !emulator.is_game_over() {
        let grid = emulator.capture_tile_grid();
        let action = agent.choose_action(&grid);
        actions.push(action.index());
        emulator
            .execute(action)
            .with_context(|| format!("executor failed at frame {}", actions.len() - 1))?;
    }

    let mut counts = [0u32; 7];
    for byte in &actions {
        if let Some(action) = Action::from_index(*byte) {
            counts[action.index() as usize] += 1;
        }
    }

    Ok(RunArtifact {
        metrics: RunMetrics {
            agent_id: agent.id().to_string(),
            max_frames,
            frame_count: actions.len() as u32,
            game_over: emulator.is_game_over(),
            decisions_digest: decisions_digest(&actions),
            down_frames: counts[Action::Down.index() as usize],
            left_frames: counts[Action::Left.index() as usize],
            right_frames: counts[Action::Right.index() as usize],
            up_frames: counts[Action::Up.index() as usize],
            jump_frames: counts[Action::Jump.index() as usize],
            run_frames: counts[Action::Run.index() as usize],
            jump_right_frames: counts[Action::JumpRight.index() as usize],
        },
        actions,
    })
}

pub fn write_action_log(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("failed writing {}", path.display()))
}
