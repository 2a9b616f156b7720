//! Namespace derivation for memory stores.
//!
//! Every agent/objective pair gets its own namespace, so runs with
//! different objectives never read each other's thoughts.

/// Derive the namespace for an agent working toward an objective.
///
/// The namespace is the agent id followed by the objective with every
/// non-ASCII character removed. The result is stable for a given pair.
pub fn derive_namespace(agent_id: &str, objective: &str) -> String {
    let ascii_objective: String = objective.chars().filter(|c| c.is_ascii()).collect();
    format!("{agent_id}{ascii_objective}")
}
