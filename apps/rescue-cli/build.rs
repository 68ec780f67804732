// build.rs — Embed git and build metadata into the rescue binary.
//
// Sets these env vars at compile time:
//   RESCUE_GIT_HASH     — short git commit hash (e.g., "abc1234"), or "unknown"
//   RESCUE_BUILD_DATE   — build date in YYYY-MM-DD format, or "unknown"

use std::process::Command;

fn main() {
    let git_hash = command_output("git", &["rev-parse", "--short", "HEAD"]);

    // Check for uncommitted changes.
    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| !o.stdout.is_empty())
        .unwrap_or(false);

    let hash_suffix = if dirty {
        format!("{}-dirty", git_hash)
    } else {
        git_hash
    };

    println!("cargo:rustc-env=RESCUE_GIT_HASH={}", hash_suffix);
    println!(
        "cargo:rustc-env=RESCUE_BUILD_DATE={}",
        command_output("date", &["+%Y-%m-%d"])
    );

    // Re-run if git HEAD changes (new commits).
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/");
}

/// Trimmed stdout of a successful command, or "unknown".
fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
