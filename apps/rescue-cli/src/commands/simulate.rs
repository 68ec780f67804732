// simulate.rs — Run the scan/response loop and report the outcome.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use rescue_goal::{
    EventDispatcher, HistoryEntry, LogSink, NotificationSink, RescueError, RescueEvent,
};
use rescue_sim::{
    DisasterEnvironment, EventSource, ScriptedSource, Simulation, SimulationConfig,
    SimulationSummary,
};

#[derive(Args)]
pub struct SimulateArgs {
    /// Simulation config file (defaults used if it does not exist).
    #[arg(long, default_value = "simulation.toml")]
    config: PathBuf,
    /// Number of scan cycles (overrides the config file).
    #[arg(long)]
    cycles: Option<u32>,
    /// RNG seed for a reproducible run (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,
    /// Replay events from a JSON script instead of the random environment.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Also append every observer event to this JSONL file.
    #[arg(long)]
    events_log: Option<PathBuf>,
    /// Delay between FSM steps in milliseconds (overrides the config file).
    #[arg(long)]
    step_delay_ms: Option<u64>,
    /// Print the summary and history as JSON instead of narrating.
    #[arg(long)]
    json: bool,
}

/// Prints agent narration to stdout as it happens.
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn send(&self, event: &RescueEvent) -> Result<(), RescueError> {
        if let RescueEvent::Log {
            agent_id,
            timestamp,
            ..
        } = event
        {
            if let Some(line) = event.log_line() {
                println!("[{}] [{}] {}", timestamp.format("%H:%M:%S"), agent_id, line);
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct Report<'a> {
    summary: &'a SimulationSummary,
    history: &'a [HistoryEntry],
}

pub fn execute(args: &SimulateArgs) -> anyhow::Result<()> {
    let mut config = SimulationConfig::load_or_default(&args.config)?;
    if let Some(cycles) = args.cycles {
        config.cycles = cycles;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(delay) = args.step_delay_ms {
        config.pacing.step_delay_ms = delay;
    }
    config.validate()?;

    let mut dispatcher = EventDispatcher::new();
    if !args.json {
        dispatcher.add_sink(Box::new(ConsoleSink));
    }
    if let Some(path) = &args.events_log {
        dispatcher.add_sink(Box::new(LogSink::new(path)));
    }

    let source: Box<dyn EventSource> = match &args.script {
        Some(path) => {
            tracing::info!(script = %path.display(), "replaying scripted events");
            Box::new(ScriptedSource::load(path)?)
        }
        None => Box::new(DisasterEnvironment::seeded(&config.environment, config.seed)),
    };

    if !args.json {
        println!("{}", "=".repeat(70));
        println!("  DISASTER RESPONSE - FSM-BASED RESCUE AGENT");
        println!("  Agent: {} | Cycles: {}", config.agent_id, config.cycles);
        println!("{}", "=".repeat(70));
    }

    let mut simulation = Simulation::new(&config, source, dispatcher);
    let summary = simulation.run()?;
    let history = simulation.agent().history();

    if args.json {
        let report = Report {
            summary: &summary,
            history,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("{}", "=".repeat(70));
    println!("  SIMULATION SUMMARY");
    println!("{}", "=".repeat(70));
    println!("  Total scans:        {}", summary.total_scans);
    println!("  Disasters detected: {}", summary.disasters_detected);
    println!("  Missions completed: {}", summary.missions_completed);
    println!("  State transitions:  {}", summary.transition_count);
    println!();
    println!("  STATE TRANSITION HISTORY:");
    for entry in history {
        println!(
            "    [{}] {:<15} | {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.state,
            entry.reason
        );
    }
    println!("{}", "=".repeat(70));

    Ok(())
}
