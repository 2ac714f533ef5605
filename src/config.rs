// src/config.rs
// =============================================================================
// Loads the settings for one run.
//
// Settings come from three layers, highest priority first:
// 1. Command-line flags
// 2. A github-tree-reader.toml file (--config, or found by walking up from
//    the current directory)
// 3. Built-in defaults
//
// Example file:
//
//   owner = "svilkata"
//   repo = "quarkus-demos"
//   branch = "main"
//   mode = "tree"          # tree | readme | all
//   api_base = "https://api.github.com"
//   timeout_secs = 30
//   output_dir = "."
//
// Rust concepts:
// - serde Deserialize: The TOML file maps straight onto FileConfig
// - Option::or: Picking the first layer that has a value
// - deny_unknown_fields: A typo in the file is an error, not silently ignored
// =============================================================================

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::cli::Cli;
use crate::github::RepoRef;

pub const CONFIG_FILE_NAME: &str = "github-tree-reader.toml";

const DEFAULT_OWNER: &str = "svilkata";
const DEFAULT_REPO: &str = "quarkus-demos";
const DEFAULT_BRANCH: &str = "main";
const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which flow to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Branch -> tree URL -> recursive listing
    #[default]
    Tree,
    /// Root listing + README download
    Readme,
    /// Both of the above
    All,
}

/// Contents of the TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub mode: Option<Mode>,
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub user_agent: Option<String>,
}

impl FileConfig {
    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub repo: RepoRef,
    pub mode: Mode,
    pub api_base: String,
    pub timeout: Duration,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub json: bool,
}

impl Config {
    /// Merge CLI flags over the config file (if any) over the defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load_from_path(path)?,
            None => match std::env::current_dir().ok().and_then(|cwd| find_config_file(&cwd)) {
                Some(path) => {
                    tracing::debug!("Loading config from: {}", path.display());
                    FileConfig::load_from_path(&path)?
                }
                None => FileConfig::default(),
            },
        };

        Self::merge(cli, file)
    }

    fn merge(cli: &Cli, file: FileConfig) -> Result<Self> {
        let owner = pick(&cli.owner, file.owner, DEFAULT_OWNER);
        let repo = pick(&cli.repo, file.repo, DEFAULT_REPO);
        let branch = pick(&cli.branch, file.branch, DEFAULT_BRANCH);
        let api_base = pick(&cli.api_base, file.api_base, DEFAULT_API_BASE);

        for (name, value) in [("owner", &owner), ("repo", &repo), ("branch", &branch)] {
            if value.trim().is_empty() {
                bail!("{} must not be empty", name);
            }
        }

        Url::parse(&api_base).with_context(|| format!("invalid api_base '{}'", api_base))?;

        let timeout_secs = cli.timeout.or(file.timeout_secs).unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            bail!("timeout must be at least 1 second");
        }

        Ok(Self {
            repo: RepoRef::new(owner, repo, branch),
            mode: cli
                .command
                .map(|command| command.mode())
                .or(file.mode)
                .unwrap_or_default(),
            api_base,
            timeout: Duration::from_secs(timeout_secs),
            output_dir: cli
                .output_dir
                .clone()
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            user_agent: file.user_agent.unwrap_or_else(default_user_agent),
            json: cli.json,
        })
    }
}

fn pick(flag: &Option<String>, file: Option<String>, default: &str) -> String {
    flag.clone()
        .or(file)
        .unwrap_or_else(|| default.to_string())
}

fn default_user_agent() -> String {
    format!("github-tree-reader/{}", env!("CARGO_PKG_VERSION"))
}

/// Find the config file by walking up the directory tree from `start`.
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None, // Reached filesystem root
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["github-tree-reader"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::merge(&cli(&[]), FileConfig::default()).unwrap();
        assert_eq!(config.repo, RepoRef::new("svilkata", "quarkus-demos", "main"));
        assert_eq!(config.mode, Mode::Tree);
        assert_eq!(config.api_base, "https://api.github.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.user_agent.starts_with("github-tree-reader/"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file: FileConfig = toml::from_str(
            r#"
owner = "rust-lang"
repo = "log"
branch = "master"
mode = "readme"
timeout_secs = 5
"#,
        )
        .unwrap();

        let config = Config::merge(&cli(&[]), file).unwrap();

        assert_eq!(config.repo, RepoRef::new("rust-lang", "log", "master"));
        assert_eq!(config.mode, Mode::Readme);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_flags_override_file() {
        let file = FileConfig {
            owner: Some("from-file".to_string()),
            mode: Some(Mode::Readme),
            ..FileConfig::default()
        };

        let config = Config::merge(&cli(&["--owner", "from-flag", "all"]), file).unwrap();

        assert_eq!(config.repo.owner, "from-flag");
        assert_eq!(config.mode, Commands::All.mode());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result: std::result::Result<FileConfig, _> = toml::from_str("token = \"abc\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result: std::result::Result<FileConfig, _> = toml::from_str("mode = \"clone\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_branch_is_rejected() {
        let err = Config::merge(&cli(&["--branch", ""]), FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("branch"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(Config::merge(&cli(&["--timeout", "0"]), FileConfig::default()).is_err());
    }

    #[test]
    fn test_invalid_api_base_is_rejected() {
        assert!(Config::merge(&cli(&["--api-base", "nope"]), FileConfig::default()).is_err());
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(CONFIG_FILE_NAME), "repo = \"x\"").unwrap();

        assert_eq!(
            find_config_file(&nested),
            Some(root.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn test_load_from_path_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "owner = ").unwrap();

        let err = FileConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
    }
}
