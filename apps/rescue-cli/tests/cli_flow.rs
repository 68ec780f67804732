// cli_flow.rs — Runs the `rescue` binary end to end.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn rescue() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rescue"))
}

#[test]
fn simulate_script_reports_json_summary() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("script.json");
    fs::write(
        &script,
        r#"[
            { "zone": "Zone-C", "zone_name": "Industrial Area", "kind": "fire", "severity": "CRITICAL",
              "readings": { "temperature": 52.1, "water_level": 0.9, "seismic_activity": 0.1 } },
            null,
            { "zone": "Zone-D", "zone_name": "Coastal Region", "kind": "flood", "severity": "LOW",
              "readings": { "temperature": 24.0, "water_level": 6.3, "seismic_activity": 0.2 } }
        ]"#,
    )
    .unwrap();
    let events_log = dir.path().join("events.jsonl");

    let output = rescue()
        .args(["simulate", "--cycles", "3", "--json", "--config"])
        .arg(dir.path().join("absent.toml"))
        .arg("--script")
        .arg(&script)
        .arg("--events-log")
        .arg(&events_log)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["total_scans"], 3);
    assert_eq!(report["summary"]["disasters_detected"], 2);
    assert_eq!(report["summary"]["missions_completed"], 2);
    assert_eq!(report["summary"]["transition_count"], 11);
    assert_eq!(report["history"][0]["reason"], "Agent initialized");
    assert_eq!(report["history"][10]["state"], "IDLE");

    let logged = fs::read_to_string(&events_log).unwrap();
    assert!(logged.contains("\"event_type\":\"mission_completed\""));
    assert!(logged.lines().last().unwrap().contains("\"event_type\":\"summary\""));
}

#[test]
fn simulate_narrates_to_stdout() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("script.json");
    fs::write(
        &script,
        r#"[{ "zone": "Zone-B", "zone_name": "Commercial Hub", "kind": "earthquake", "severity": "HIGH",
              "readings": { "temperature": 27.5, "water_level": 1.2, "seismic_activity": 5.8 } }]"#,
    )
    .unwrap();

    let output = rescue()
        .args(["simulate", "--cycles", "1", "--config"])
        .arg(dir.path().join("absent.toml"))
        .arg("--script")
        .arg(&script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[IDLE] New goal created: SEARCH_AND_RESCUE in Zone-B (Severity: HIGH)"));
    assert!(stdout.contains("[RESPONDING]   ACTION: Scanning collapsed structures"));
    assert!(stdout.contains("[IDLE] Transition: COMPLETING -> IDLE | Ready for next assignment"));
    assert!(stdout.contains("Missions completed: 1"));
}

#[test]
fn zero_cycles_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = rescue()
        .args(["simulate", "--cycles", "0", "--config"])
        .arg(dir.path().join("absent.toml"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cycles must be at least 1"));
}

#[test]
fn transitions_prints_table() {
    let output = rescue().arg("transitions").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ALERT_RECEIVED   ASSESSING, IDLE"));
    assert!(stdout.contains("RESPONDING       COMPLETING"));
}
