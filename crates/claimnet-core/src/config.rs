//! Layered TOML configuration.
//!
//! Lookup order (first hit wins):
//!
//! 1. an explicit path passed by the caller (`--config`),
//! 2. `claimnet.toml` in the project directory,
//! 3. `<config_dir>/claimnet/config.toml` for the current user,
//! 4. built-in defaults.
//!
//! ```toml
//! [metrics]
//! damping = 0.85
//! tolerance = 1e-6
//! max_iterations = 100
//!
//! [output]
//! format = "json"
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "claimnet.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// PageRank iteration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl MetricsConfig {
    /// Reject parameter values that would make PageRank meaningless.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            bail!("metrics.damping must be in (0, 1), got {}", self.damping);
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            bail!("metrics.tolerance must be positive, got {}", self.tolerance);
        }
        if self.max_iterations == 0 {
            bail!("metrics.max_iterations must be at least 1");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `pretty`, `text` or `json`.
    #[serde(default)]
    pub format: Option<String>,
}

/// Parse and validate a config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or holds
/// out-of-range metric parameters.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    config
        .metrics
        .validate()
        .with_context(|| format!("Invalid value in {}", path.display()))?;

    Ok(config)
}

/// Path of the per-user config file, if the platform has a config dir.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("claimnet/config.toml"))
}

/// Resolve the effective configuration.
///
/// # Errors
///
/// Returns an error if an explicit path is missing, or if the selected file
/// fails to parse or validate.
pub fn resolve_config(explicit: Option<&Path>, project_root: &Path) -> Result<Config> {
    resolve_config_from(explicit, project_root, user_config_path().as_deref())
}

fn resolve_config_from(
    explicit: Option<&Path>,
    project_root: &Path,
    user_path: Option<&Path>,
) -> Result<Config> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "using explicit config");
        return load_config_file(path);
    }

    let project_path = project_root.join(PROJECT_CONFIG_FILE);
    if project_path.exists() {
        debug!(path = %project_path.display(), "using project config");
        return load_config_file(&project_path);
    }

    if let Some(path) = user_path.filter(|p| p.exists()) {
        debug!(path = %path.display(), "using user config");
        return load_config_file(path);
    }

    Ok(Config::default())
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iterations() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_standard_pagerank() {
        let cfg = MetricsConfig::default();
        assert!((cfg.damping - 0.85).abs() < f64::EPSILON);
        assert!((cfg.tolerance - 1e-6).abs() < f64::EPSILON);
        assert_eq!(cfg.max_iterations, 100);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg: Config = toml::from_str("[metrics]\ndamping = 0.9\n").expect("valid toml");
        assert!((cfg.metrics.damping - 0.9).abs() < f64::EPSILON);
        assert_eq!(cfg.metrics.max_iterations, 100);
        assert!(cfg.output.format.is_none());
    }

    #[test]
    fn out_of_range_damping_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[metrics]\ndamping = 1.5\n").expect("write");

        let err = load_config_file(&path).expect_err("damping 1.5 is invalid");
        assert!(format!("{err:#}").contains("damping"));
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let cfg = MetricsConfig {
            max_iterations: 0,
            ..MetricsConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn project_file_wins_over_user_file() {
        let project = TempDir::new().expect("tempdir");
        let user = TempDir::new().expect("tempdir");
        std::fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "[output]\nformat = \"json\"\n",
        )
        .expect("write project config");
        let user_path = user.path().join("config.toml");
        std::fs::write(&user_path, "[output]\nformat = \"text\"\n").expect("write user config");

        let cfg = resolve_config_from(None, project.path(), Some(&user_path)).expect("resolves");
        assert_eq!(cfg.output.format.as_deref(), Some("json"));
    }

    #[test]
    fn user_file_used_when_no_project_file() {
        let project = TempDir::new().expect("tempdir");
        let user = TempDir::new().expect("tempdir");
        let user_path = user.path().join("config.toml");
        std::fs::write(&user_path, "[metrics]\nmax_iterations = 20\n").expect("write");

        let cfg = resolve_config_from(None, project.path(), Some(&user_path)).expect("resolves");
        assert_eq!(cfg.metrics.max_iterations, 20);
    }

    #[test]
    fn nothing_on_disk_yields_defaults() {
        let project = TempDir::new().expect("tempdir");
        let cfg = resolve_config_from(None, project.path(), None).expect("resolves");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let project = TempDir::new().expect("tempdir");
        let missing = project.path().join("nope.toml");
        assert!(resolve_config_from(Some(&missing), project.path(), None).is_err());
    }
}
