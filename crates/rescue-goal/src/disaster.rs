// disaster.rs — Disaster events reported by the sensing layer.
//
// A DisasterEvent is an immutable snapshot of one detection: where it
// happened, what kind of disaster it is, how severe, and what the sensors
// read at the time. Events are consumed exactly once, when the rescue
// agent turns them into goals.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of disaster detected in a zone.
///
/// This is a closed enum on purpose: every lookup table keyed by disaster
/// kind uses an exhaustive `match`, so adding a variant fails to compile
/// until each table has decided what to do with it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DisasterKind {
    None,
    Flood,
    Earthquake,
    Fire,
    Landslide,
}

impl DisasterKind {
    /// The kinds an environment can actually produce.
    pub const ACTIVE: [DisasterKind; 4] = [
        DisasterKind::Flood,
        DisasterKind::Earthquake,
        DisasterKind::Fire,
        DisasterKind::Landslide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterKind::None => "None",
            DisasterKind::Flood => "Flood",
            DisasterKind::Earthquake => "Earthquake",
            DisasterKind::Fire => "Fire",
            DisasterKind::Landslide => "Landslide",
        }
    }
}

impl fmt::Display for DisasterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How severe a disaster is.
///
/// Variants are declared in ascending order so the derived `Ord` matches
/// the ordinal values: `None < Low < Moderate < High < Critical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    None = 0,
    Low = 1,
    Moderate = 2,
    High = 3,
    Critical = 4,
}

impl Severity {
    /// Severities an environment can report for a real disaster.
    pub const REPORTABLE: [Severity; 4] = [
        Severity::Low,
        Severity::Moderate,
        Severity::High,
        Severity::Critical,
    ];

    /// The integer rank of this severity, used directly as goal priority.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Severity::None => "NONE",
            Severity::Low => "LOW",
            Severity::Moderate => "MODERATE",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Continuous sensor readings captured alongside a detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorReadings {
    /// Degrees Celsius.
    pub temperature: f64,

    /// Metres.
    pub water_level: f64,

    /// Seismic magnitude.
    pub seismic_activity: f64,
}

/// One disaster detection in one zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisasterEvent {
    /// Zone identifier (e.g., "Zone-A").
    pub zone: String,

    /// Human-readable zone name (e.g., "Residential District").
    pub zone_name: String,

    pub kind: DisasterKind,

    pub severity: Severity,

    pub readings: SensorReadings,

    /// When the sensor produced this event. Scripted events may omit it.
    #[serde(default = "Utc::now")]
    pub detected_at: DateTime<Utc>,
}

impl DisasterEvent {
    /// Create an event stamped with the current time.
    pub fn new(
        zone: impl Into<String>,
        zone_name: impl Into<String>,
        kind: DisasterKind,
        severity: Severity,
        readings: SensorReadings,
    ) -> Self {
        Self {
            zone: zone.into(),
            zone_name: zone_name.into(),
            kind,
            severity,
            readings,
            detected_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordinals_match_declaration_order() {
        assert_eq!(Severity::None.ordinal(), 0);
        assert_eq!(Severity::Low.ordinal(), 1);
        assert_eq!(Severity::Moderate.ordinal(), 2);
        assert_eq!(Severity::High.ordinal(), 3);
        assert_eq!(Severity::Critical.ordinal(), 4);
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::Low > Severity::None);
    }

    #[test]
    fn scripted_event_without_timestamp_deserializes() {
        let json = r#"{
            "zone": "Zone-D",
            "zone_name": "Coastal Region",
            "kind": "flood",
            "severity": "HIGH",
            "readings": { "temperature": 24.5, "water_level": 7.25, "seismic_activity": 0.2 }
        }"#;
        let event: DisasterEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, DisasterKind::Flood);
        assert_eq!(event.severity, Severity::High);
        assert_eq!(event.zone_name, "Coastal Region");
    }

    #[test]
    fn display_names() {
        assert_eq!(DisasterKind::Earthquake.to_string(), "Earthquake");
        assert_eq!(Severity::Moderate.to_string(), "MODERATE");
    }
}
