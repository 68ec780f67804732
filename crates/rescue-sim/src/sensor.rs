// sensor.rs — Sensor: scan bookkeeping around an event source.

use rescue_goal::{DisasterEvent, DisasterKind};

use crate::source::EventSource;

/// Polls an [`EventSource`] once per scan and keeps count.
pub struct Sensor<S> {
    source: S,
    scan_count: u64,
    disasters_detected: u64,
}

impl<S: EventSource> Sensor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            scan_count: 0,
            disasters_detected: 0,
        }
    }

    /// Run one scan tick.
    pub fn scan(&mut self) -> Option<DisasterEvent> {
        self.scan_count += 1;
        let event = self.source.next_event();

        match &event {
            Some(e) => {
                if e.kind != DisasterKind::None {
                    self.disasters_detected += 1;
                }
                tracing::info!(
                    scan = self.scan_count,
                    zone = %e.zone,
                    zone_name = %e.zone_name,
                    kind = %e.kind,
                    severity = %e.severity,
                    "disaster detected"
                );
            }
            None => tracing::info!(scan = self.scan_count, "no disaster detected"),
        }
        event
    }

    pub fn scan_count(&self) -> u64 {
        self.scan_count
    }

    pub fn disasters_detected(&self) -> u64 {
        self.disasters_detected
    }

    #[cfg(test)]
    fn source(&self) -> &S {
        &self.source
    }
}
