//! Configuration loading and validation for taskforge.
//!
//! All configuration comes from environment variables. The four service
//! credentials are required and checked up front; everything else has a
//! default that can be overridden. The config is built once at startup and
//! passed by reference into client constructors — there is no global state.

/// Environment variables that must be present (and non-empty) for the
/// agent to start.
pub const REQUIRED_ENV_VARS: [&str; 4] = [
    "OPENAI_API_KEY",
    "OPENAI_ORG_KEY",
    "PINECONE_API_KEY",
    "PINECONE_ENVIRONMENT",
];

fn default_model() -> String {
    "gpt-3.5-turbo-16k".into()
}
fn default_embedding_model() -> String {
    "text-embedding-ada-002".into()
}
fn default_index_name() -> String {
    "task-results".into()
}
fn default_agent_id() -> String {
    "taskforge".into()
}

/// Everything the agent needs to know at startup.
#[derive(Clone)]
pub struct AppConfig {
    /// Model service API key
    pub openai_api_key: String,

    /// Model service organization id
    pub openai_org_key: String,

    /// Vector store API key
    pub pinecone_api_key: String,

    /// Vector store environment (e.g. "us-east1-gcp")
    pub pinecone_environment: String,

    /// Completion model
    pub model: String,

    /// Embedding model
    pub embedding_model: String,

    /// Vector store index name
    pub index_name: String,

    /// Agent identifier, the namespace prefix for memory records
    pub agent_id: String,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary lookup.
    ///
    /// Tests use this to inject an environment without touching process
    /// state. An empty value counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingEnv { name })
        };
        let optional = |name: &str, default: fn() -> String| {
            lookup(name).filter(|v| !v.is_empty()).unwrap_or_else(default)
        };

        Ok(Self {
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_org_key: required("OPENAI_ORG_KEY")?,
            pinecone_api_key: required("PINECONE_API_KEY")?,
            pinecone_environment: required("PINECONE_ENVIRONMENT")?,
            model: optional("TASKFORGE_MODEL", default_model),
            embedding_model: optional("TASKFORGE_EMBEDDING_MODEL", default_embedding_model),
            index_name: optional("TASKFORGE_INDEX", default_index_name),
            agent_id: optional("TASKFORGE_AGENT_ID", default_agent_id),
        })
    }
}

/// Redact a secret string for Debug output.
fn redact(_: &str) -> &'static str {
    "[REDACTED]"
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("openai_org_key", &redact(&self.openai_org_key))
            .field("pinecone_api_key", &redact(&self.pinecone_api_key))
            .field("pinecone_environment", &self.pinecone_environment)
            .field("model", &self.model)
            .field("embedding_model", &self.embedding_model)
            .field("index_name", &self.index_name)
            .field("agent_id", &self.agent_id)
            .finish()
    }
}

/// What can go wrong while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<String, String> {
        [
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_ORG_KEY", "org-test"),
            ("PINECONE_API_KEY", "pc-test"),
            ("PINECONE_ENVIRONMENT", "us-east1-gcp"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn from_map(env: &HashMap<String, String>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn complete_environment_loads_with_defaults() {
        let config = from_map(&full_env()).unwrap();
        assert_eq!(config.openai_api_key, "sk-test");
        assert_eq!(config.pinecone_environment, "us-east1-gcp");
        assert_eq!(config.model, "gpt-3.5-turbo-16k");
        assert_eq!(config.embedding_model, "text-embedding-ada-002");
        assert_eq!(config.index_name, "task-results");
        assert_eq!(config.agent_id, "taskforge");
    }

    #[test]
    fn each_required_var_is_fatal_when_missing() {
        for var in REQUIRED_ENV_VARS {
            let mut env = full_env();
            env.remove(var);
            let err = from_map(&env).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Missing required environment variable: {var}")
            );
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut env = full_env();
        env.insert("OPENAI_API_KEY".into(), String::new());
        assert!(from_map(&env).is_err());
    }

    #[test]
    fn optional_overrides_apply() {
        let mut env = full_env();
        env.insert("TASKFORGE_MODEL".into(), "gpt-4-1106-preview".into());
        env.insert("TASKFORGE_AGENT_ID".into(), "gentle_bot".into());
        let config = from_map(&env).unwrap();
        assert_eq!(config.model, "gpt-4-1106-preview");
        assert_eq!(config.agent_id, "gentle_bot");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = from_map(&full_env()).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-test"));
        assert!(!debug.contains("pc-test"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("us-east1-gcp"));
    }
}
