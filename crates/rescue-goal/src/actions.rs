// actions.rs — Response action tables.
//
// Each disaster kind has a fixed base plan. Severity escalates the plan by
// appending, never by replacing: High and above call in backup and medical
// teams, Critical additionally declares a zone-wide evacuation.

use crate::disaster::{DisasterKind, Severity};

/// Appended when severity is High or worse.
pub const BACKUP_ACTIONS: [&str; 2] = [
    "Requesting additional backup units",
    "Alerting medical emergency teams",
];

/// Appended when severity is Critical.
pub const EVACUATION_ACTION: &str = "Declaring zone-wide emergency evacuation";

fn base_actions(kind: DisasterKind) -> &'static [&'static str] {
    match kind {
        DisasterKind::Flood => &[
            "Deploying water rescue boats",
            "Activating flood barriers",
            "Evacuating residents to higher ground",
        ],
        DisasterKind::Earthquake => &[
            "Deploying seismic rescue units",
            "Scanning collapsed structures",
            "Setting up triage stations",
        ],
        DisasterKind::Fire => &[
            "Dispatching fire suppression units",
            "Establishing firebreaks",
            "Evacuating affected buildings",
        ],
        DisasterKind::Landslide => &[
            "Deploying heavy debris removal equipment",
            "Scanning for buried survivors",
            "Securing unstable terrain",
        ],
        DisasterKind::None => &["Initiating general rescue protocol"],
    }
}

/// The ordered action sequence for a disaster of the given kind and severity.
///
/// Always returns at least one action.
pub fn response_actions(kind: DisasterKind, severity: Severity) -> Vec<&'static str> {
    let mut actions = base_actions(kind).to_vec();
    if severity >= Severity::High {
        actions.extend(BACKUP_ACTIONS);
    }
    if severity == Severity::Critical {
        actions.push(EVACUATION_ACTION);
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_fire_escalates_to_six_actions() {
        let actions = response_actions(DisasterKind::Fire, Severity::Critical);
        assert_eq!(
            actions,
            vec![
                "Dispatching fire suppression units",
                "Establishing firebreaks",
                "Evacuating affected buildings",
                "Requesting additional backup units",
                "Alerting medical emergency teams",
                "Declaring zone-wide emergency evacuation",
            ]
        );
    }

    #[test]
    fn high_severity_adds_backup_without_evacuation() {
        let actions = response_actions(DisasterKind::Flood, Severity::High);
        assert_eq!(actions.len(), 5);
        assert_eq!(&actions[3..], &BACKUP_ACTIONS);
        assert!(!actions.contains(&EVACUATION_ACTION));
    }

    #[test]
    fn moderate_severity_uses_base_plan_only() {
        for kind in DisasterKind::ACTIVE {
            assert_eq!(response_actions(kind, Severity::Moderate).len(), 3);
            assert_eq!(response_actions(kind, Severity::Low).len(), 3);
        }
    }

    #[test]
    fn unmapped_kind_falls_back_to_generic_protocol() {
        assert_eq!(
            response_actions(DisasterKind::None, Severity::Low),
            vec!["Initiating general rescue protocol"]
        );
        assert_eq!(response_actions(DisasterKind::None, Severity::Critical).len(), 4);
    }
}
