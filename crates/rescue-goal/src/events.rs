// events.rs — Observer events and notification dispatch.
//
// The rescue agent never writes to the console itself. Everything it has to
// say (log lines, state transitions, mission outcomes) becomes a RescueEvent
// handed to an EventDispatcher, which fans it out to notification sinks.
// Sinks observe only: nothing they do feeds back into the state machine.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RescueError;
use crate::goal::GoalKind;

/// Events emitted by a rescue agent (and the driver's final summary).
///
/// The `#[serde(tag = "event_type")]` attribute makes each variant serialize
/// as `{"event_type": "log", ...}`, one self-describing JSON object per line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RescueEvent {
    /// A narration line, rendered as `[<state>] <message>`.
    Log {
        agent_id: String,
        state: String,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// The agent committed a state transition.
    Transition {
        agent_id: String,
        from_state: String,
        to_state: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// A goal finished its RESPONDING phase.
    MissionCompleted {
        agent_id: String,
        goal_id: Uuid,
        goal_kind: GoalKind,
        zone: String,
        priority: u8,
        timestamp: DateTime<Utc>,
    },

    /// End-of-run counters.
    Summary {
        total_scans: u64,
        disasters_detected: u64,
        missions_completed: u64,
        transition_count: usize,
        timestamp: DateTime<Utc>,
    },
}

impl RescueEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            RescueEvent::Log { .. } => "log",
            RescueEvent::Transition { .. } => "transition",
            RescueEvent::MissionCompleted { .. } => "mission_completed",
            RescueEvent::Summary { .. } => "summary",
        }
    }

    /// The `[<state>] <message>` rendering of a log event, if this is one.
    pub fn log_line(&self) -> Option<String> {
        match self {
            RescueEvent::Log { state, message, .. } => Some(format!("[{}] {}", state, message)),
            _ => None,
        }
    }
}

/// Trait for receiving rescue events.
///
/// Implementations decide what to do with each event: append it to a file,
/// keep it in memory, print it to a terminal.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged but don't stop the agent.
    fn send(&self, event: &RescueEvent) -> Result<(), RescueError>;
}

/// Logs events as JSONL to a file.
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &RescueEvent) -> Result<(), RescueError> {
        // Ensure parent directory exists.
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| RescueError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| RescueError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| RescueError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Keeps every event in memory.
///
/// Cloning a `MemorySink` yields another handle onto the same buffer, so a
/// caller can hand one clone to the dispatcher and read through the other.
#[derive(Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<RescueEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn events(&self) -> Vec<RescueEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Just the rendered log lines, in order.
    pub fn log_lines(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(RescueEvent::log_line)
            .collect()
    }
}

impl NotificationSink for MemorySink {
    fn send(&self, event: &RescueEvent) -> Result<(), RescueError> {
        let mut events = self
            .events
            .lock()
            .map_err(|e| RescueError::NotificationError(format!("memory sink poisoned: {}", e)))?;
        events.push(event.clone());
        Ok(())
    }
}

/// Dispatches events to multiple sinks.
///
/// Errors from individual sinks are logged (via tracing) but don't
/// prevent other sinks from receiving the event.
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    /// Create a new dispatcher with no sinks.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a notification sink.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Builder-style variant of [`add_sink`](Self::add_sink).
    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Dispatch an event to all sinks.
    pub fn dispatch(&self, event: &RescueEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!("notification sink error: {}", e);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn log_event(message: &str) -> RescueEvent {
        RescueEvent::Log {
            agent_id: "RescueAgent-01".to_string(),
            state: "IDLE".to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }

    struct FailingSink;

    impl NotificationSink for FailingSink {
        fn send(&self, _event: &RescueEvent) -> Result<(), RescueError> {
            Err(RescueError::NotificationError("always fails".to_string()))
        }
    }

    #[test]
    fn log_event_renders_state_prefix() {
        let event = log_event("Transition: IDLE -> ALERT_RECEIVED | test");
        assert_eq!(
            event.log_line().unwrap(),
            "[IDLE] Transition: IDLE -> ALERT_RECEIVED | test"
        );
        assert_eq!(event.event_type(), "log");
    }

    #[test]
    fn log_sink_appends_jsonl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");
        let sink = LogSink::new(&path);

        sink.send(&log_event("first")).unwrap();
        sink.send(&log_event("second")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"event_type\":\"log\""));
        let restored: RescueEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(restored.log_line().unwrap(), "[IDLE] second");
    }

    #[test]
    fn dispatcher_survives_failing_sink() {
        let memory = MemorySink::new();
        let dispatcher = EventDispatcher::new()
            .with_sink(FailingSink)
            .with_sink(memory.clone());

        dispatcher.dispatch(&log_event("still delivered"));

        assert_eq!(memory.log_lines(), vec!["[IDLE] still delivered"]);
    }

    #[test]
    fn summary_serializes_with_tag() {
        let event = RescueEvent::Summary {
            total_scans: 8,
            disasters_detected: 3,
            missions_completed: 3,
            transition_count: 16,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event_type\":\"summary\""));
        assert!(event.log_line().is_none());
    }
}
