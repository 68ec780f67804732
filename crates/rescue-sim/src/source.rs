// source.rs — EventSource: where disaster events come from.
//
// Sources are polled synchronously, once per scan tick, and may report
// nothing. The driver never pushes back into a source.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use rescue_goal::DisasterEvent;

use crate::error::SimError;

/// Pull-model producer of disaster events.
pub trait EventSource {
    /// Produce the event for this tick, or `None` for a quiet tick.
    fn next_event(&mut self) -> Option<DisasterEvent>;
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn next_event(&mut self) -> Option<DisasterEvent> {
        (**self).next_event()
    }
}

/// Replays a fixed sequence of ticks, then goes quiet.
///
/// Scripts are JSON arrays where each element is either a disaster event
/// or `null` for a tick with nothing to report.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    ticks: VecDeque<Option<DisasterEvent>>,
}

impl ScriptedSource {
    pub fn new(ticks: impl IntoIterator<Item = Option<DisasterEvent>>) -> Self {
        Self {
            ticks: ticks.into_iter().collect(),
        }
    }

    /// Load a script from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let content = fs::read_to_string(path).map_err(|source| SimError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let ticks: Vec<Option<DisasterEvent>> =
            serde_json::from_str(&content).map_err(|source| SimError::ScriptParse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::new(ticks))
    }

    /// Ticks not yet replayed.
    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }
}

impl EventSource for ScriptedSource {
    fn next_event(&mut self) -> Option<DisasterEvent> {
        self.ticks.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rescue_goal::{DisasterKind, Severity};
    use tempfile::tempdir;

    #[test]
    fn scripted_source_replays_then_goes_quiet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("script.json");
        fs::write(
            &path,
            r#"[
                null,
                {
                    "zone": "Zone-B",
                    "zone_name": "Commercial Hub",
                    "kind": "earthquake",
                    "severity": "CRITICAL",
                    "readings": { "temperature": 27.0, "water_level": 1.1, "seismic_activity": 6.4 }
                }
            ]"#,
        )
        .unwrap();

        let mut source = ScriptedSource::load(&path).unwrap();
        assert_eq!(source.remaining(), 2);
        assert!(source.next_event().is_none());

        let event = source.next_event().unwrap();
        assert_eq!(event.kind, DisasterKind::Earthquake);
        assert_eq!(event.severity, Severity::Critical);

        assert_eq!(source.remaining(), 0);
        assert!(source.next_event().is_none());
    }

    #[test]
    fn malformed_script_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"[{"zone": "Zone-A"}]"#).unwrap();

        let result = ScriptedSource::load(&path);
        assert!(matches!(result, Err(SimError::ScriptParse { .. })));
    }

    #[test]
    fn missing_script_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = ScriptedSource::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(SimError::IoError { .. })));
    }

    #[test]
    fn boxed_source_delegates() {
        let mut boxed: Box<dyn EventSource> = Box::new(ScriptedSource::new([None]));
        assert!(boxed.next_event().is_none());
    }
}
