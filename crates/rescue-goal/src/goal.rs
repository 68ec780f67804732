// goal.rs — RescueGoal: one unit of rescue work derived from a disaster.
//
// Lifecycle: created on alert intake as Pending, made Active when the
// scheduler selects it, and Completed when the agent finishes responding.
// A completed goal is never reused.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::disaster::{DisasterEvent, DisasterKind};

/// What the agent sets out to do about a disaster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalKind {
    EvacuateAndRescue,
    SearchAndRescue,
    FireSuppressionAndRescue,
    DebrisClearanceAndRescue,
    GeneralRescue,
}

impl GoalKind {
    /// Map a disaster kind to the goal that answers it.
    ///
    /// Total over `DisasterKind`; anything without a dedicated response
    /// falls back to a general rescue.
    pub fn for_disaster(kind: DisasterKind) -> Self {
        match kind {
            DisasterKind::Flood => GoalKind::EvacuateAndRescue,
            DisasterKind::Earthquake => GoalKind::SearchAndRescue,
            DisasterKind::Fire => GoalKind::FireSuppressionAndRescue,
            DisasterKind::Landslide => GoalKind::DebrisClearanceAndRescue,
            DisasterKind::None => GoalKind::GeneralRescue,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalKind::EvacuateAndRescue => "EVACUATE_AND_RESCUE",
            GoalKind::SearchAndRescue => "SEARCH_AND_RESCUE",
            GoalKind::FireSuppressionAndRescue => "FIRE_SUPPRESSION_AND_RESCUE",
            GoalKind::DebrisClearanceAndRescue => "DEBRIS_CLEARANCE_AND_RESCUE",
            GoalKind::GeneralRescue => "GENERAL_RESCUE",
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Where a goal is in its lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Pending,
    Active,
    Completed,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalStatus::Pending => write!(f, "pending"),
            GoalStatus::Active => write!(f, "active"),
            GoalStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A rescue goal owned by exactly one agent.
///
/// Status changes are crate-private: only the goal queue (activation) and
/// the agent (completion) move a goal forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescueGoal {
    /// Unique identifier for this goal.
    pub goal_id: Uuid,

    pub kind: GoalKind,

    /// Scheduling priority, equal to the severity ordinal of the event.
    pub priority: u8,

    /// Zone identifier the goal targets.
    pub target_zone: String,

    status: GoalStatus,

    /// The event this goal was derived from.
    pub event: DisasterEvent,

    pub created_at: DateTime<Utc>,
}

impl RescueGoal {
    /// Derive a Pending goal from a disaster event.
    pub fn from_event(event: DisasterEvent) -> Self {
        Self {
            goal_id: Uuid::new_v4(),
            kind: GoalKind::for_disaster(event.kind),
            priority: event.severity.ordinal(),
            target_zone: event.zone.clone(),
            status: GoalStatus::Pending,
            event,
            created_at: Utc::now(),
        }
    }

    pub fn status(&self) -> GoalStatus {
        self.status
    }

    pub(crate) fn activate(&mut self) {
        debug_assert_eq!(self.status, GoalStatus::Pending);
        self.status = GoalStatus::Active;
    }

    pub(crate) fn complete(&mut self) {
        debug_assert_eq!(self.status, GoalStatus::Active);
        self.status = GoalStatus::Completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disaster::{SensorReadings, Severity};

    fn event(kind: DisasterKind, severity: Severity) -> DisasterEvent {
        DisasterEvent::new(
            "Zone-C",
            "Industrial Area",
            kind,
            severity,
            SensorReadings {
                temperature: 30.0,
                water_level: 1.0,
                seismic_activity: 0.1,
            },
        )
    }

    #[test]
    fn goal_kind_mapping_is_total() {
        assert_eq!(
            GoalKind::for_disaster(DisasterKind::Flood),
            GoalKind::EvacuateAndRescue
        );
        assert_eq!(
            GoalKind::for_disaster(DisasterKind::Earthquake),
            GoalKind::SearchAndRescue
        );
        assert_eq!(
            GoalKind::for_disaster(DisasterKind::Fire),
            GoalKind::FireSuppressionAndRescue
        );
        assert_eq!(
            GoalKind::for_disaster(DisasterKind::Landslide),
            GoalKind::DebrisClearanceAndRescue
        );
        assert_eq!(
            GoalKind::for_disaster(DisasterKind::None),
            GoalKind::GeneralRescue
        );
    }

    #[test]
    fn goal_from_event_takes_severity_as_priority() {
        let goal = RescueGoal::from_event(event(DisasterKind::Fire, Severity::High));
        assert_eq!(goal.priority, 3);
        assert_eq!(goal.kind, GoalKind::FireSuppressionAndRescue);
        assert_eq!(goal.target_zone, "Zone-C");
        assert_eq!(goal.status(), GoalStatus::Pending);
    }

    #[test]
    fn goal_kind_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&GoalKind::DebrisClearanceAndRescue).unwrap();
        assert_eq!(json, "\"DEBRIS_CLEARANCE_AND_RESCUE\"");
        assert_eq!(
            GoalKind::DebrisClearanceAndRescue.to_string(),
            "DEBRIS_CLEARANCE_AND_RESCUE"
        );
    }
}
