use anyhow::Result;
use mario_autopilot::agents::agent_ids;
use mario_autopilot::grid::{
    GRID_COLS, GRID_ROWS, TILE_CHIBIBO, TILE_GROUND, TILE_KUMO, TILE_MARIO,
};
use mario_autopilot::runner::run_agent_by_id;
use mario_autopilot::trace::{Trace, TraceEmulator};

fn frame(hazards: &[(usize, usize, u8)]) -> Vec<Vec<u8>> {
    let mut rows = vec![vec![0u8; GRID_COLS]; GRID_ROWS];
    for col in 0..GRID_COLS {
        rows[GRID_ROWS - 1][col] = TILE_GROUND;
    }
    for r in 4..6 {
        for c in 4..6 {
            rows[r][c] = TILE_MARIO;
        }
    }
    for &(r, c, code) in hazards {
        rows[r][c] = code;
    }
    rows
}

fn smoke_trace() -> Trace {
    let mut frames = vec![frame(&[]); 6];
    frames.push(frame(&[(5, 7, TILE_CHIBIBO)]));
    frames.push(frame(&[(5, 9, TILE_CHIBIBO)]));
    frames.push(frame(&[(2, 8, TILE_KUMO)]));
    frames.push(frame(&[]));
    Trace {
        name: "smoke".to_string(),
        frames,
    }
}

#[test]
fn all_agents_replay_the_smoke_trace() -> Result<()> {
    for agent in agent_ids() {
        let mut emulator = TraceEmulator::new(smoke_trace())?;
        let artifact = run_agent_by_id(agent, &mut emulator, 900)?;
        assert_eq!(artifact.metrics.frame_count, 10, "agent={agent}");
        assert!(artifact.metrics.game_over, "agent={agent}");
        assert_eq!(artifact.metrics.agent_id, *agent, "agent id mismatch");
        assert_eq!(artifact.actions.len(), 10, "agent={agent}");
    }
    Ok(())
}

#[test]
fn replays_are_deterministic_per_agent() -> Result<()> {
    for agent in agent_ids() {
        let mut first = TraceEmulator::new(smoke_trace())?;
        let mut second = TraceEmulator::new(smoke_trace())?;
        let a = run_agent_by_id(agent, &mut first, 900)?;
        let b = run_agent_by_id(agent, &mut second, 900)?;
        assert_eq!(a.actions, b.actions, "agent={agent}");
        assert_eq!(
            a.metrics.decisions_digest, b.metrics.decisions_digest,
            "agent={agent}"
        );
    }
    Ok(())
}

#[test]
fn benchmark_smoke_outputs_expected_artifacts() -> Result<()> {
    use mario_autopilot::benchmark::{run_benchmark, BenchmarkConfig};

    let tmp = tempfile::tempdir()?;
    let trace_dir = tmp.path().join("traces");
    let one = smoke_trace();
    one.save(&trace_dir.join("smoke.json"))?;
    let mut two = smoke_trace();
    two.name = "smoke-short".to_string();
    two.frames.truncate(4);
    two.save(&trace_dir.join("smoke-short.json"))?;

    let out_dir = tmp.path().join("out");
    let report = run_benchmark(BenchmarkConfig {
        agents: vec!["expert".to_string(), "cadet".to_string()],
        traces: vec![
            trace_dir.join("smoke.json"),
            trace_dir.join("smoke-short.json"),
        ],
        max_frames: 900,
        out_dir: out_dir.clone(),
        jobs: Some(2),
    })?;

    assert_eq!(report.run_count, 4);
    assert_eq!(report.agent_summaries.len(), 2);
    assert!(report.agent_summaries.iter().all(|s| s.deterministic));
    assert!(report.runs.iter().all(|r| r.deterministic));
    assert!(out_dir.join("summary.json").exists());
    assert!(out_dir.join("runs.csv").exists());
    assert!(out_dir.join("agents.csv").exists());

    Ok(())
}
