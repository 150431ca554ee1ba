//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::JibeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable carrying the wallet-connect project id.
pub const PROJECT_ID_ENV_VAR: &str = "JIBE_PROJECT_ID";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, then apply environment overrides.
pub fn load_config(path: &Path) -> Result<JibeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: JibeConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Load from `path` when given, otherwise start from defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<JibeConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = JibeConfig::default();
            apply_env_overrides(&mut config, |key| std::env::var(key).ok());
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

/// Overlay values read from the process environment.
///
/// `lookup` is injected so tests don't have to mutate the real environment.
pub fn apply_env_overrides<F>(config: &mut JibeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(project_id) = lookup(PROJECT_ID_ENV_VAR) {
        let project_id = project_id.trim();
        if !project_id.is_empty() {
            config.wallet.project_id = project_id.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.toml", name, uuid::Uuid::new_v4()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_file() {
        let path = write_temp(
            "jibe-load",
            r#"
            [wallet]
            app_name = "jibe-test"
            chains = [1, 11155111]

            [retries]
            max_attempts = 5
            "#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.wallet.app_name, "jibe-test");
        assert_eq!(config.wallet.chains, vec![1, 11155111]);
        assert_eq!(config.retries.max_attempts, 5);

        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let path = write_temp(
            "jibe-invalid",
            r#"
            [auth]
            version = "7"
            "#,
        );

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("auth.version"));

        fs::remove_file(path).unwrap_or_default();
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_env_override_sets_project_id() {
        let mut config = JibeConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == PROJECT_ID_ENV_VAR).then(|| " abc123 ".to_string())
        });
        assert_eq!(config.wallet.project_id, "abc123");
    }

    #[test]
    fn test_blank_env_value_is_ignored() {
        let mut config = JibeConfig::default();
        config.wallet.project_id = "from-file".to_string();
        apply_env_overrides(&mut config, |_| Some("   ".to_string()));
        assert_eq!(config.wallet.project_id, "from-file");
    }
}
