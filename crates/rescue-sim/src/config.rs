//! Simulation configuration structures

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentConfig;
use crate::error::SimError;

/// Top-level simulation configuration (simulation.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Identity used in every log line the agent emits
    #[serde(default = "default_agent_id")]
    pub agent_id: String,

    /// Number of scan ticks to run
    #[serde(default = "default_cycles")]
    pub cycles: u32,

    /// RNG seed for the environment; absent means OS entropy
    #[serde(default)]
    pub seed: Option<u64>,

    /// Upper bound on FSM steps after a single scan
    #[serde(default = "default_max_steps_per_cycle")]
    pub max_steps_per_cycle: u32,

    /// Human-readable pacing delays
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Monitored zones and their risks
    #[serde(default)]
    pub environment: EnvironmentConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agent_id: default_agent_id(),
            cycles: default_cycles(),
            seed: None,
            max_steps_per_cycle: default_max_steps_per_cycle(),
            pacing: PacingConfig::default(),
            environment: EnvironmentConfig::default(),
        }
    }
}

// Serde default functions
fn default_agent_id() -> String {
    "RescueAgent-01".to_string()
}

fn default_cycles() -> u32 {
    8
}

fn default_max_steps_per_cycle() -> u32 {
    16
}

/// Pacing delays. Purely cosmetic; zero means run flat out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Delay between FSM steps, in milliseconds
    #[serde(default)]
    pub step_delay_ms: u64,

    /// Delay between scan ticks, in milliseconds
    #[serde(default)]
    pub cycle_delay_ms: u64,
}

impl PacingConfig {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn cycle_delay(&self) -> Duration {
        Duration::from_millis(self.cycle_delay_ms)
    }
}

impl SimulationConfig {
    /// Load and validate config from a TOML file
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let content = std::fs::read_to_string(path).map_err(|source| SimError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| SimError::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load config if the file exists, otherwise fall back to defaults.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, SimError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject values the driver cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        if self.cycles == 0 {
            return Err(SimError::InvalidConfig(
                "cycles must be at least 1".to_string(),
            ));
        }
        if self.max_steps_per_cycle == 0 {
            return Err(SimError::InvalidConfig(
                "max_steps_per_cycle must be at least 1".to_string(),
            ));
        }
        if self.environment.zones.is_empty() {
            return Err(SimError::InvalidConfig(
                "environment must define at least one zone".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for zone in &self.environment.zones {
            if !(0.0..=1.0).contains(&zone.base_risk) {
                return Err(SimError::InvalidConfig(format!(
                    "zone {} has base_risk {} outside [0, 1]",
                    zone.id, zone.base_risk
                )));
            }
            if !seen.insert(zone.id.as_str()) {
                return Err(SimError::InvalidConfig(format!(
                    "zone {} is defined more than once",
                    zone.id
                )));
            }
        }
        Ok(())
    }
}
