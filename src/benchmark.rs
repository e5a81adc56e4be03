use crate::runner::{run_agent_by_id, RunMetrics};
use crate::trace::{Trace, TraceEmulator};
use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub agents: Vec<String>,
    pub traces: Vec<PathBuf>,
    pub max_frames: u32,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRecord {
    pub agent_id: String,
    pub trace: String,
    pub frame_count: u32,
    pub game_over: bool,
    pub decisions_digest: String,
    /// Same trace replayed twice must reproduce the same digest.
    pub deterministic: bool,
    pub down_frames: u32,
    pub left_frames: u32,
    pub right_frames: u32,
    pub up_frames: u32,
    pub jump_frames: u32,
    pub run_frames: u32,
    pub jump_right_frames: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentAggregate {
    pub agent_id: String,
    pub runs: usize,
    pub total_frames: u64,
    pub avg_frames: f64,
    /// Fraction of frames advancing right (Right or JumpRight).
    pub advance_share: f64,
    /// Fraction of frames airborne (Jump or JumpRight).
    pub jump_share: f64,
    pub deterministic: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub max_frames: u32,
    pub jobs: Option<usize>,
    pub agents: Vec<String>,
    pub traces: Vec<String>,
    pub run_count: usize,
    pub agent_summaries: Vec<AgentAggregate>,
    pub runs: Vec<RunRecord>,
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.agents.is_empty() {
        return Err(anyhow!("benchmark requires at least one agent"));
    }
    if config.traces.is_empty() {
        return Err(anyhow!("benchmark requires at least one trace"));
    }
    if let Some(jobs) = config.jobs {
        if jobs == 0 {
            return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
        }
    }
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let run_jobs: Vec<(String, PathBuf)> = config
        .agents
        .iter()
        .flat_map(|agent| config.traces.iter().map(move |t| (agent.clone(), t.clone())))
        .collect();

    let run_one = |(agent_id, trace_path): &(String, PathBuf)| -> Result<RunRecord> {
        let trace = Trace::load(trace_path)?;
        let replay = || -> Result<(RunMetrics, Vec<u8>)> {
            let mut emulator = TraceEmulator::new(trace.clone())?;
            let artifact =
                run_agent_by_id(agent_id, &mut emulator, config.max_frames).with_context(|| {
                    format!(
                        "benchmark run failed for agent={agent_id} trace={}",
                        trace_path.display()
                    )
                })?;
            Ok((artifact.metrics, artifact.actions))
        };

        let (metrics, actions) = replay()?;
        let (second_metrics, second_actions) = replay()?;
        let deterministic = actions == second_actions
            && metrics.decisions_digest == second_metrics.decisions_digest;

        Ok(RunRecord {
            agent_id: metrics.agent_id.clone(),
            trace: trace.name.clone(),
            frame_count: metrics.frame_count,
            game_over: metrics.game_over,
            decisions_digest: format!("{:#010x}", metrics.decisions_digest),
            deterministic,
            down_frames: metrics.down_frames,
            left_frames: metrics.left_frames,
            right_frames: metrics.right_frames,
            up_frames: metrics.up_frames,
            jump_frames: metrics.jump_frames,
            run_frames: metrics.run_frames,
            jump_right_frames: metrics.jump_right_frames,
        })
    };

    let run_results: Vec<Result<RunRecord>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| run_jobs.par_iter().map(run_one).collect())
    } else {
        run_jobs.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }

    let mut grouped: BTreeMap<String, Vec<&RunRecord>> = BTreeMap::new();
    for run in &runs {
        grouped.entry(run.agent_id.clone()).or_default().push(run);
    }

    let mut summaries = Vec::new();
    for (agent_id, agent_runs) in grouped {
        let runs_count = agent_runs.len();
        let total_frames: u64 = agent_runs.iter().map(|r| r.frame_count as u64).sum();
        let advance_frames: u64 = agent_runs
            .iter()
            .map(|r| (r.right_frames + r.jump_right_frames) as u64)
            .sum();
        let airborne_frames: u64 = agent_runs
            .iter()
            .map(|r| (r.jump_frames + r.jump_right_frames) as u64)
            .sum();
        let deterministic = agent_runs.iter().all(|r| r.deterministic);

        summaries.push(AgentAggregate {
            agent_id,
            runs: runs_count,
            total_frames,
            avg_frames: total_frames as f64 / runs_count as f64,
            advance_share: share(advance_frames, total_frames),
            jump_share: share(airborne_frames, total_frames),
            deterministic,
        });
    }

    write_runs_csv(&config.out_dir.join("runs.csv"), &runs)?;
    write_agents_csv(&config.out_dir.join("agents.csv"), &summaries)?;

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        max_frames: config.max_frames,
        jobs: config.jobs,
        agents: config.agents,
        traces: config
            .traces
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        run_count: runs.len(),
        agent_summaries: summaries,
        runs,
    };

    let report_path = config.out_dir.join("summary.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary json")?,
    )
    .with_context(|| format!("failed writing {}", report_path.display()))?;

    Ok(report)
}

fn share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn write_runs_csv(path: &Path, rows: &[RunRecord]) -> Result<()> {
    let mut csv = String::from(
        "agent_id,trace,frame_count,game_over,decisions_digest,deterministic,down_frames,left_frames,right_frames,up_frames,jump_frames,run_frames,jump_right_frames\n",
    );
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
            row.agent_id,
            row.trace,
            row.frame_count,
            row.game_over,
            row.decisions_digest,
            row.deterministic,
            row.down_frames,
            row.left_frames,
            row.right_frames,
            row.up_frames,
            row.jump_frames,
            row.run_frames,
            row.jump_right_frames
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}

fn write_agents_csv(path: &Path, rows: &[AgentAggregate]) -> Result<()> {
    let mut csv = String::from(
        "agent_id,runs,total_frames,avg_frames,advance_share,jump_share,deterministic\n",
    );
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{:.2},{:.4},{:.4},{}\n",
            row.agent_id,
            row.runs,
            row.total_frames,
            row.avg_frames,
            row.advance_share,
            row.jump_share,
            row.deterministic
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}
