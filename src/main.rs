use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use mario_autopilot::agents::{agent_ids, create_agent, describe_agents};
use mario_autopilot::benchmark::{run_benchmark, BenchmarkConfig};
use mario_autopilot::runner::{run_agent_by_id, write_action_log};
use mario_autopilot::trace::TraceEmulator;
use mario_autopilot::util::{collect_trace_paths, resolve_agents};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mario-autopilot")]
#[command(about = "Rule-based Super Mario Land autopilot: trace replay and benchmarking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available agents
    ListAgents,
    /// Replay one agent over one recorded trace
    Run {
        #[arg(long, default_value = "expert")]
        agent: String,
        #[arg(long)]
        trace: PathBuf,
        #[arg(long, default_value_t = 18_000)]
        max_frames: u32,
        /// Write the raw action-index log here
        #[arg(long)]
        actions_out: Option<PathBuf>,
        /// Write run metrics as JSON here
        #[arg(long)]
        metrics_out: Option<PathBuf>,
    },
    /// Run agents across every trace in a directory
    Benchmark {
        /// Comma-separated agent ids (defaults to the full roster)
        #[arg(long)]
        agents: Option<String>,
        #[arg(long)]
        trace_dir: PathBuf,
        #[arg(long, default_value_t = 18_000)]
        max_frames: u32,
        #[arg(long, default_value = "benchmarks")]
        out_dir: PathBuf,
        #[arg(long)]
        jobs: Option<usize>,
    },
}

fn main() -> Result<()> {
    let Cli { command } = Cli::parse();

    match command {
        Commands::ListAgents => {
            for (id, description) in describe_agents() {
                println!("{id:10} {description}");
            }
        }
        Commands::Run {
            agent,
            trace,
            max_frames,
            actions_out,
            metrics_out,
        } => {
            if create_agent(&agent).is_none() {
                let available = agent_ids().join(", ");
                return Err(anyhow!("unknown agent '{agent}'. available: {available}"));
            }
            let mut emulator = TraceEmulator::from_path(&trace)?;
            let trace_name = emulator.trace_name().to_string();
            let artifact = run_agent_by_id(&agent, &mut emulator, max_frames)?;

            println!("agent={}", artifact.metrics.agent_id);
            println!("trace={trace_name}");
            println!("frames={}", artifact.metrics.frame_count);
            println!("game_over={}", artifact.metrics.game_over);
            println!("digest={:#010x}", artifact.metrics.decisions_digest);
            println!(
                "right={} jump={} jump_right={} left={} down={} up={} run={}",
                artifact.metrics.right_frames,
                artifact.metrics.jump_frames,
                artifact.metrics.jump_right_frames,
                artifact.metrics.left_frames,
                artifact.metrics.down_frames,
                artifact.metrics.up_frames,
                artifact.metrics.run_frames,
            );

            if let Some(path) = actions_out {
                write_action_log(&path, &artifact.actions)?;
                println!("actions_out={}", path.display());
            }
            if let Some(path) = metrics_out {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, serde_json::to_vec_pretty(&artifact.metrics)?)?;
                println!("metrics_out={}", path.display());
            }
        }
        Commands::Benchmark {
            agents,
            trace_dir,
            max_frames,
            out_dir,
            jobs,
        } => {
            let agents = resolve_agents(agents.as_deref())?;
            let traces = collect_trace_paths(&trace_dir)?;
            let report = run_benchmark(BenchmarkConfig {
                agents,
                traces,
                max_frames,
                out_dir: out_dir.clone(),
                jobs,
            })?;

            println!("runs={}", report.run_count);
            for summary in &report.agent_summaries {
                println!(
                    "agent={} runs={} avg_frames={:.1} advance_share={:.3} jump_share={:.3} deterministic={}",
                    summary.agent_id,
                    summary.runs,
                    summary.avg_frames,
                    summary.advance_share,
                    summary.jump_share,
                    summary.deterministic,
                );
            }
            println!("out_dir={}", out_dir.display());
        }
    }

    Ok(())
}
