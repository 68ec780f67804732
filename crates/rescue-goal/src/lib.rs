//! # rescue-goal
//!
//! Goal queue and lifecycle state machine for a disaster-response agent.
//!
//! A [`RescueAgent`] turns [`DisasterEvent`]s into prioritized
//! [`RescueGoal`]s and works through them one at a time, moving through a
//! fixed, validated set of states. All narration leaves the agent as
//! [`RescueEvent`]s, so the state machine itself does no I/O.
//!
//! ## Key components
//!
//! - [`RescueAgent`] — the lifecycle state machine (Idle → AlertReceived →
//!   Assessing → Responding → Completing → Idle)
//! - [`GoalQueue`] — highest-priority-first queue, FIFO among equals
//! - [`response_actions`] — severity-escalated action plans per disaster kind
//! - [`EventDispatcher`] — dispatches events to notification sinks
//! - [`NotificationSink`] — trait for receiving events (JSONL log, memory, etc.)

pub mod actions;
pub mod agent;
pub mod disaster;
pub mod error;
pub mod events;
pub mod goal;
pub mod queue;

pub use actions::response_actions;
pub use agent::{AgentState, HistoryEntry, LogEntry, RescueAgent, StepOutcome};
pub use disaster::{DisasterEvent, DisasterKind, SensorReadings, Severity};
pub use error::RescueError;
pub use events::{EventDispatcher, LogSink, MemorySink, NotificationSink, RescueEvent};
pub use goal::{GoalKind, GoalStatus, RescueGoal};
pub use queue::GoalQueue;
