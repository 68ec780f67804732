// transitions.rs — Print the agent's static transition table.

use rescue_goal::AgentState;

pub fn execute() -> anyhow::Result<()> {
    println!("{:<16} ALLOWED TARGETS", "STATE");
    println!("{}", "-".repeat(48));

    for state in AgentState::ALL {
        let targets: Vec<&str> = state
            .allowed_targets()
            .iter()
            .map(AgentState::as_str)
            .collect();
        println!("{:<16} {}", state, targets.join(", "));
    }

    Ok(())
}
