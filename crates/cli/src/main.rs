//! taskforge CLI — run an autonomous task loop against an objective.
//!
//! ```text
//! taskforge "Host a retro game night" true
//! ```
//!
//! The first argument is the objective. The optional second argument turns
//! on verbose logging when it equals "true" in any casing; anything else
//! leaves logging at the default level. `RUST_LOG` overrides both.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use taskforge_agent::Agent;
use taskforge_config::{AppConfig, REQUIRED_ENV_VARS};
use taskforge_memory::{PineconeStore, derive_namespace};
use taskforge_providers::{OpenAiCompatProvider, RetryProvider};

#[derive(Parser)]
#[command(
    name = "taskforge",
    about = "Autonomous task loop with semantic memory",
    version,
    author
)]
struct Cli {
    /// The objective the agent should pursue
    objective: String,

    /// Verbose logging when this equals "true" (any casing)
    log: Option<String>,
}

impl Cli {
    fn verbose(&self) -> bool {
        self.log
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG wins over the flag when both are set
    let filter = if cli.verbose() { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        eprintln!();
        eprintln!("  ERROR: {e}");
        eprintln!();
        eprintln!("  taskforge needs all of these environment variables set:");
        for name in REQUIRED_ENV_VARS {
            eprintln!("    {name}");
        }
        eprintln!();
        e
    })?;

    info!(
        model = %config.model,
        embedding_model = %config.embedding_model,
        index = %config.index_name,
        agent_id = %config.agent_id,
        "Configuration loaded"
    );

    // One raw client for the embedding path (memory failures stay loud),
    // retry-wrapped for the completion path.
    let openai = Arc::new(
        OpenAiCompatProvider::openai(&config.openai_api_key)
            .with_organization(&config.openai_org_key),
    );
    let completions = Arc::new(RetryProvider::new(openai.clone()));

    let namespace = derive_namespace(&config.agent_id, &cli.objective);
    let memory = Arc::new(PineconeStore::for_index(
        &config.index_name,
        &config.pinecone_environment,
        &config.pinecone_api_key,
        namespace,
        openai.clone(),
        &config.embedding_model,
    ));

    let mut agent = Agent::new(&cli.objective, completions, memory, &config.model);
    agent.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn objective_is_required() {
        assert!(Cli::try_parse_from(["taskforge"]).is_err());
    }

    #[test]
    fn log_flag_is_truthy_only_for_true() {
        let cli = Cli::try_parse_from(["taskforge", "objective", "true"]).unwrap();
        assert!(cli.verbose());

        let cli = Cli::try_parse_from(["taskforge", "objective", "TRUE"]).unwrap();
        assert!(cli.verbose());

        let cli = Cli::try_parse_from(["taskforge", "objective", "yes"]).unwrap();
        assert!(!cli.verbose());

        let cli = Cli::try_parse_from(["taskforge", "objective"]).unwrap();
        assert!(!cli.verbose());
    }
}
