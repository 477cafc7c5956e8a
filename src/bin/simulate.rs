use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use clap::Parser;
use maze_pursuit::config::EngineConfig;
use maze_pursuit::constants::{GAME_HEIGHT, GAME_WIDTH, SPRITE_SIZE};
use maze_pursuit::engine::GameEngine;
use maze_pursuit::rng::Rng;
use maze_pursuit::types::{FrameEvent, Snapshot};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Frames to simulate per run.
    #[arg(long, default_value_t = 6_000)]
    frames: u64,
    #[arg(long, default_value_t = 1)]
    runs: u32,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
struct RunResultLine {
    run: u32,
    seed: u32,
    frames: u64,
    #[serde(rename = "pelletsEaten")]
    pellets_eaten: u64,
    #[serde(rename = "pelletsRemaining")]
    pellets_remaining: usize,
    #[serde(rename = "modeChanges")]
    mode_changes: BTreeMap<String, u32>,
    #[serde(rename = "tunnelWraps")]
    tunnel_wraps: u32,
    catches: u32,
    #[serde(rename = "firstCatchFrame")]
    first_catch_frame: Option<u64>,
    anomalies: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "generatedAt")]
    generated_at: String,
    #[serde(rename = "runCount")]
    run_count: usize,
    #[serde(rename = "totalCatches")]
    total_catches: u32,
    #[serde(rename = "averagePelletsEaten")]
    average_pellets_eaten: u64,
    #[serde(rename = "anomalyCount")]
    anomaly_count: usize,
    runs: Vec<RunResultLine>,
}

/// Steers the player with seeded random headings, re-rolling every so often or
/// as soon as it runs into a wall.
struct Autopilot {
    rng: Rng,
    next_turn_frame: u64,
}

impl Autopilot {
    fn new(seed: u32) -> Self {
        Self {
            rng: Rng::new(seed),
            next_turn_frame: 0,
        }
    }

    fn drive(&mut self, engine: &mut GameEngine) {
        let frame = engine.frame();
        if frame < self.next_turn_frame && !engine.player().is_frozen() {
            return;
        }
        let heading = self.rng.heading();
        engine.set_player_heading(Some(heading));
        self.next_turn_frame = frame + self.rng.int(24, 96) as u64;
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let base_seed = normalize_seed(cli.seed.unwrap_or_else(|| {
        Utc::now().timestamp_millis().max(0) as u64
    }));

    let mut results = Vec::new();
    for run in 0..cli.runs {
        let seed = base_seed.wrapping_add(run);
        info!(run, seed, frames = cli.frames, "run started");
        let result = run_once(&config, run, seed, cli.frames);
        for anomaly in &result.anomalies {
            warn!(run, seed, anomaly = anomaly.as_str(), "anomaly detected");
        }
        println!(
            "{}",
            serde_json::to_string(&result).context("failed to serialize run result")?
        );
        results.push(result);
    }

    let summary = build_run_summary(results);
    if let Some(path) = cli.summary_out.as_deref() {
        if let Err(err) = write_summary(path, &summary) {
            error!(path = %path.display(), error = %err, "summary write failed");
            std::process::exit(2);
        }
        info!(path = %path.display(), "summary written");
    }
    info!(
        runs = summary.run_count,
        catches = summary.total_catches,
        anomalies = summary.anomaly_count,
        "simulation finished"
    );

    if summary.anomaly_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_once(config: &EngineConfig, run: u32, seed: u32, frames: u64) -> RunResultLine {
    let mut engine = GameEngine::new(config.clone());
    engine.reset_round();
    engine.start_round();
    let mut autopilot = Autopilot::new(seed);

    let mut mode_changes = BTreeMap::new();
    let mut tunnel_wraps = 0;
    let mut catches = 0;
    let mut first_catch_frame = None;
    let mut anomalies = Vec::new();
    let mut anomaly_seen = HashSet::new();

    for _ in 0..frames {
        autopilot.drive(&mut engine);
        let report = match engine.step() {
            Ok(report) => report,
            Err(err) => {
                push_anomaly(
                    &mut anomalies,
                    &mut anomaly_seen,
                    format!("frame {} failed: {err}", engine.frame()),
                );
                break;
            }
        };

        for event in &report.events {
            match event {
                FrameEvent::ModeChanged { mode } => {
                    *mode_changes.entry(mode.as_str().to_string()).or_insert(0) += 1;
                }
                FrameEvent::TunnelWrap { .. } => tunnel_wraps += 1,
                _ => {}
            }
        }
        for message in collect_snapshot_anomalies(&engine.snapshot()) {
            push_anomaly(&mut anomalies, &mut anomaly_seen, message);
        }

        if report.collision {
            catches += 1;
            first_catch_frame.get_or_insert(report.frame);
            engine.halt();
            engine.reset_round();
            engine.start_round();
        }
        if engine.maze().pellets_remaining() == 0 {
            engine.restore_pellets();
        }
    }

    RunResultLine {
        run,
        seed,
        frames: engine.frame(),
        pellets_eaten: engine.pellets_eaten(),
        pellets_remaining: engine.maze().pellets_remaining(),
        mode_changes,
        tunnel_wraps,
        catches,
        first_catch_frame,
        anomalies,
    }
}

fn collect_snapshot_anomalies(snapshot: &Snapshot) -> Vec<String> {
    let mut anomalies = Vec::new();
    for agent in std::iter::once(&snapshot.player).chain(snapshot.ghosts.iter()) {
        if agent.x < -SPRITE_SIZE
            || agent.x > GAME_WIDTH
            || agent.y < -SPRITE_SIZE
            || agent.y > GAME_HEIGHT
        {
            anomalies.push(format!(
                "{} left the play field at {},{}",
                agent.name, agent.x, agent.y
            ));
        }
        if agent.name != "player" && agent.frozen {
            anomalies.push(format!("{} stopped moving", agent.name));
        }
    }
    anomalies
}

fn push_anomaly(anomalies: &mut Vec<String>, seen: &mut HashSet<String>, message: String) {
    if seen.insert(message.clone()) {
        anomalies.push(message);
    }
}

fn normalize_seed(seed: u64) -> u32 {
    seed as u32
}

fn build_run_summary(runs: Vec<RunResultLine>) -> RunSummary {
    let run_count = runs.len();
    let total_catches = runs.iter().map(|run| run.catches).sum();
    let total_pellets: u64 = runs.iter().map(|run| run.pellets_eaten).sum();
    let average_pellets_eaten = if run_count == 0 {
        0
    } else {
        total_pellets / run_count as u64
    };
    RunSummary {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        run_count,
        total_catches,
        average_pellets_eaten,
        anomaly_count: runs.iter().map(|run| run.anomalies.len()).sum(),
        runs,
    }
}

fn write_summary(path: &Path, summary: &RunSummary) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(summary).context("failed to serialize summary")?;
    std::fs::write(path, text)
        .with_context(|| format!("failed to write summary {}", path.display()))
}
