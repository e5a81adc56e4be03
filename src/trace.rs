//! Recorded tile-grid traces.
//!
//! A trace is a JSON capture of the symbolic screen, one 16x20 frame per
//! decision cycle, recorded from a live emulator session. Replaying a trace
//! through [`TraceEmulator`] exercises the whole decision stack headless:
//! no emulator process, no ROM, deterministic output.

use crate::action::Action;
use crate::grid::{TileGrid, GRID_COLS, GRID_ROWS};
use crate::runner::Emulator;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    /// Row-major frames; every frame must be exactly 16 rows of 20 codes.
    pub frames: Vec<Vec<Vec<u8>>>,
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed reading trace {}", path.display()))?;
        let trace: Trace = serde_json::from_str(&data)
            .with_context(|| format!("malformed trace {}", path.display()))?;
        trace
            .validate()
            .with_context(|| format!("invalid trace {}", path.display()))?;
        Ok(trace)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating directory {}", parent.display()))?;
        }
        let encoded = serde_json::to_vec_pretty(self).context("failed to serialize trace")?;
        fs::write(path, encoded).with_context(|| format!("failed writing {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.frames.is_empty() {
            return Err(anyhow!("trace '{}' has no frames", self.name));
        }
        for (idx, frame) in self.frames.iter().enumerate() {
            if TileGrid::from_rows(frame).is_none() {
                return Err(anyhow!(
                    "frame {idx} of trace '{}' is not {GRID_ROWS}x{GRID_COLS}",
                    self.name
                ));
            }
        }
        Ok(())
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Replays a validated trace through the [`Emulator`] boundary. `execute` is
/// a recording no-op: the frames are prerecorded, so actions cannot steer the
/// world, but the full capture/decide/execute loop still runs.
pub struct TraceEmulator {
    trace: Trace,
    cursor: usize,
}

impl TraceEmulator {
    pub fn new(trace: Trace) -> Result<Self> {
        trace.validate()?;
        Ok(Self { trace, cursor: 0 })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::new(Trace::load(path)?)
    }

    pub fn trace_name(&self) -> &str {
        &self.trace.name
    }
}

impl Emulator for TraceEmulator {
    fn capture_tile_grid(&mut self) -> TileGrid {
        let grid = self
            .trace
            .frames
            .get(self.cursor)
            .and_then(|rows| TileGrid::from_rows(rows));
        self.cursor += 1;
        // Frames are validated up front; past the end reads as a blank screen.
        grid.unwrap_or_else(TileGrid::empty)
    }

    fn execute(&mut self, _action: Action) -> Result<()> {
        Ok(())
    }

    fn is_game_over(&self) -> bool {
        self.cursor >= self.trace.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TILE_MARIO;

    fn frame_with_player() -> Vec<Vec<u8>> {
        let mut rows = vec![vec![0u8; GRID_COLS]; GRID_ROWS];
        for r in 4..6 {
            for c in 4..6 {
                rows[r][c] = TILE_MARIO;
            }
        }
        rows
    }

    #[test]
    fn validate_rejects_empty_and_misshapen_traces() {
        let empty = Trace {
            name: "empty".into(),
            frames: vec![],
        };
        assert!(empty.validate().is_err());

        let misshapen = Trace {
            name: "bad".into(),
            frames: vec![vec![vec![0u8; GRID_COLS]; GRID_ROWS - 2]],
        };
        assert!(misshapen.validate().is_err());

        let ok = Trace {
            name: "ok".into(),
            frames: vec![frame_with_player()],
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn replay_ends_when_frames_run_out() {
        let trace = Trace {
            name: "short".into(),
            frames: vec![frame_with_player(); 3],
        };
        let mut emulator = TraceEmulator::new(trace).unwrap();
        let mut captured = 0;
        while !emulator.is_game_over() {
            let _ = emulator.capture_tile_grid();
            emulator.execute(Action::Right).unwrap();
            captured += 1;
        }
        assert_eq!(captured, 3);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let trace = Trace {
            name: "round-trip".into(),
            frames: vec![frame_with_player(); 2],
        };
        trace.save(&path).unwrap();
        let loaded = Trace::load(&path).unwrap();
        assert_eq!(loaded.name, "round-trip");
        assert_eq!(loaded.frame_count(), 2);
    }
}
