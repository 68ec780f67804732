//! # rescue-sim
//!
//! Everything around the rescue state machine needed to run it: where
//! disaster events come from, how often they are polled, and how a whole
//! run is driven and summarized.
//!
//! - [`EventSource`] — pull interface producing zero or one event per tick
//! - [`DisasterEnvironment`] — seeded random environment over configured zones
//! - [`ScriptedSource`] — replays a fixed sequence of events (JSON)
//! - [`Sensor`] — counts scans and detections around any source
//! - [`SimulationConfig`] — TOML configuration with serde defaults
//! - [`Simulation`] — the scan/step driver loop and its [`SimulationSummary`]

pub mod config;
pub mod environment;
pub mod error;
pub mod sensor;
pub mod simulation;
pub mod source;

pub use config::{PacingConfig, SimulationConfig};
pub use environment::{DisasterEnvironment, EnvironmentConfig, ZoneConfig};
pub use error::SimError;
pub use sensor::Sensor;
pub use simulation::{Simulation, SimulationSummary};
pub use source::{EventSource, ScriptedSource};
