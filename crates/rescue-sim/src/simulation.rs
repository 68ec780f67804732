// simulation.rs — Simulation: the scan/step driver loop.
//
// One cycle = one scan tick. The scan result is delivered to the agent,
// then the agent is stepped until it is Idle again (bounded, so a
// misbehaving machine cannot hang the run). Pacing delays live here and
// nowhere else.

use std::thread;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use rescue_goal::{AgentState, EventDispatcher, RescueAgent, RescueEvent};

use crate::config::{PacingConfig, SimulationConfig};
use crate::error::SimError;
use crate::sensor::Sensor;
use crate::source::EventSource;

/// End-of-run counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub total_scans: u64,
    pub disasters_detected: u64,
    pub missions_completed: u64,
    /// Length of the agent's transition history, initialization entry included.
    pub transition_count: usize,
}

/// Drives one sensor and one rescue agent for a fixed number of cycles.
pub struct Simulation<S> {
    sensor: Sensor<S>,
    agent: RescueAgent,
    cycles: u32,
    max_steps_per_cycle: u32,
    pacing: PacingConfig,
}

impl<S: EventSource> Simulation<S> {
    pub fn new(config: &SimulationConfig, source: S, dispatcher: EventDispatcher) -> Self {
        Self {
            sensor: Sensor::new(source),
            agent: RescueAgent::new(config.agent_id.clone(), dispatcher),
            cycles: config.cycles,
            max_steps_per_cycle: config.max_steps_per_cycle,
            pacing: config.pacing.clone(),
        }
    }

    /// Run every cycle, then publish and return the summary.
    pub fn run(&mut self) -> Result<SimulationSummary, SimError> {
        for cycle in 1..=self.cycles {
            self.run_cycle(cycle)?;
            pause(self.pacing.cycle_delay());
        }

        let summary = self.summary();
        self.agent.dispatcher().dispatch(&RescueEvent::Summary {
            total_scans: summary.total_scans,
            disasters_detected: summary.disasters_detected,
            missions_completed: summary.missions_completed,
            transition_count: summary.transition_count,
            timestamp: Utc::now(),
        });
        tracing::info!(
            total_scans = summary.total_scans,
            missions_completed = summary.missions_completed,
            "simulation finished"
        );
        Ok(summary)
    }

    /// Scan once and step the agent until it is Idle again.
    pub fn run_cycle(&mut self, cycle: u32) -> Result<(), SimError> {
        tracing::info!(cycle, cycles = self.cycles, "simulation cycle");

        let event = self.sensor.scan();
        self.agent.receive_alert(event)?;

        let mut steps = 0;
        while self.agent.state() != AgentState::Idle {
            if steps >= self.max_steps_per_cycle {
                tracing::warn!(
                    cycle,
                    steps,
                    state = %self.agent.state(),
                    "step bound reached before agent returned to idle"
                );
                break;
            }
            self.agent.run_fsm_cycle()?;
            steps += 1;
            pause(self.pacing.step_delay());
        }
        Ok(())
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            total_scans: self.sensor.scan_count(),
            disasters_detected: self.sensor.disasters_detected(),
            missions_completed: self.agent.completed_missions(),
            transition_count: self.agent.history().len(),
        }
    }

    pub fn agent(&self) -> &RescueAgent {
        &self.agent
    }

    pub fn sensor(&self) -> &Sensor<S> {
        &self.sensor
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
