//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level streamwise configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamwiseConfig {
    /// Question bank TOML to use instead of the built-in bank.
    #[serde(default)]
    pub question_bank: Option<PathBuf>,
    /// Stream model TOML to use instead of the built-in model.
    #[serde(default)]
    pub stream_model: Option<PathBuf>,
    /// Output directory for saved reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Default stdout format (text or json).
    #[serde(default = "default_format")]
    pub format: String,
    /// Percentage-point change `compare` treats as significant.
    #[serde(default = "default_change_threshold")]
    pub change_threshold: f64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./streamwise-results")
}
fn default_format() -> String {
    "text".to_string()
}
fn default_change_threshold() -> f64 {
    5.0
}

impl Default for StreamwiseConfig {
    fn default() -> Self {
        Self {
            question_bank: None,
            stream_model: None,
            output_dir: default_output_dir(),
            format: default_format(),
            change_threshold: default_change_threshold(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `streamwise.toml` in the current directory
/// 2. `~/.config/streamwise/config.toml`
///
/// Environment variable overrides: `STREAMWISE_BANK`, `STREAMWISE_STREAMS`.
pub fn load_config_from(path: Option<&Path>) -> Result<StreamwiseConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("streamwise.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StreamwiseConfig::default(),
    };

    if let Ok(bank) = std::env::var("STREAMWISE_BANK") {
        config.question_bank = Some(PathBuf::from(bank));
    }
    if let Ok(streams) = std::env::var("STREAMWISE_STREAMS") {
        config.stream_model = Some(PathBuf::from(streams));
    }

    config.question_bank = config.question_bank.as_deref().map(resolve_path);
    config.stream_model = config.stream_model.as_deref().map(resolve_path);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

fn parse_config(content: &str) -> Result<StreamwiseConfig> {
    let config: StreamwiseConfig = toml::from_str(content)?;
    anyhow::ensure!(
        config.change_threshold >= 0.0,
        "change_threshold must not be negative"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("streamwise"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_STREAMWISE_TEST_VAR", "banks");
        assert_eq!(resolve_env_vars("${_STREAMWISE_TEST_VAR}"), "banks");
        assert_eq!(
            resolve_env_vars("./${_STREAMWISE_TEST_VAR}/main.toml"),
            "./banks/main.toml"
        );
        std::env::remove_var("_STREAMWISE_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_substituted_values() {
        std::env::set_var("_STREAMWISE_SELF_REF", "${_STREAMWISE_SELF_REF}");
        assert_eq!(
            resolve_env_vars("a/${_STREAMWISE_SELF_REF}/b"),
            "a/${_STREAMWISE_SELF_REF}/b"
        );
        std::env::remove_var("_STREAMWISE_SELF_REF");
    }

    #[test]
    fn resolve_env_vars_unterminated_is_left_alone() {
        assert_eq!(resolve_env_vars("${OPEN"), "${OPEN");
    }

    #[test]
    fn default_config() {
        let config = StreamwiseConfig::default();
        assert!(config.question_bank.is_none());
        assert_eq!(config.format, "text");
        assert_eq!(config.change_threshold, 5.0);
        assert_eq!(config.output_dir, PathBuf::from("./streamwise-results"));
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(
            r#"
question_bank = "banks/district.toml"
change_threshold = 10
"#,
        )
        .unwrap();
        assert_eq!(config.question_bank, Some(PathBuf::from("banks/district.toml")));
        assert_eq!(config.change_threshold, 10.0);
        assert_eq!(config.format, "text");
    }

    #[test]
    fn parse_rejects_negative_threshold() {
        assert!(parse_config("change_threshold = -1.0").is_err());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/no/such/streamwise.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "format = \"json\"\noutput_dir = \"out\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.format, "json");
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }
}
