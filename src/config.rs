//! Layered run configuration.
//!
//! Settings are merged with figment, later layers winning:
//!
//! 1. built-in defaults
//! 2. a TOML file: `--config <FILE>`, or `config.toml` in the platform config
//!    directory when present
//! 3. `DUPES_*` environment variables (`DUPES_DIR`, `DUPES_MAX_SIZE`, ...)
//! 4. command-line flags
//!
//! ```toml
//! dir = "/home/me/Pictures"
//! ignore_dotfiles = true
//! max_size = 2000000000
//! trash = true
//! continue_on_error = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::actions::DeleteConfig;
use crate::cli::Cli;
use crate::scanner::{EligibilityFilter, DEFAULT_MAX_SIZE};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "DUPES_";

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory to scan.
    pub dir: Option<PathBuf>,
    /// Skip files whose base name starts with '.'.
    pub ignore_dotfiles: bool,
    /// List groups only.
    pub find_only: bool,
    /// Exclusive size ceiling in bytes.
    pub max_size: u64,
    /// Move removed copies to the trash.
    pub trash: bool,
    /// Attempt every deletion in a group even after one fails.
    pub continue_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: None,
            ignore_dotfiles: false,
            find_only: false,
            max_size: DEFAULT_MAX_SIZE,
            trash: false,
            continue_on_error: true,
        }
    }
}

impl Config {
    /// Load defaults, file and environment layers.
    ///
    /// # Errors
    ///
    /// Fails if an explicitly given file does not exist, or if any layer
    /// holds a value of the wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) if !path.is_file() => {
                bail!("config file not found: {}", path.display())
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.is_file()),
        };

        match &file {
            Some(path) => log::debug!("Loading config from {}", path.display()),
            None => log::debug!("No config file, using defaults and environment"),
        }

        Self::figment(file.as_deref())
            .extract()
            .context("invalid configuration")
    }

    /// The figment stack without the CLI layer.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Platform config file location, e.g. `~/.config/dupes/config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupes", "dupes").map(|d| d.config_dir().join("config.toml"))
    }

    /// Apply command-line flags on top.
    ///
    /// Boolean flags can only switch a behaviour on; leaving one off keeps
    /// whatever the lower layers chose.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.dir {
            self.dir = Some(dir.clone());
        }
        if let Some(max_size) = cli.max_size {
            self.max_size = max_size;
        }
        self.ignore_dotfiles |= cli.ignore_dotfiles;
        self.find_only |= cli.find_only;
        self.trash |= cli.trash;
        if cli.stop_on_error {
            self.continue_on_error = false;
        }
    }

    /// The root directory, required by this point.
    ///
    /// # Errors
    ///
    /// Fails when no layer provided a directory.
    pub fn root(&self) -> Result<&Path> {
        self.dir
            .as_deref()
            .context("no directory given: pass --dir, set DUPES_DIR or add `dir` to the config file")
    }

    /// Eligibility filter for these settings.
    #[must_use]
    pub fn filter(&self) -> EligibilityFilter {
        EligibilityFilter::new(self.ignore_dotfiles).with_max_size(self.max_size)
    }

    /// Deletion settings for these settings.
    #[must_use]
    pub fn delete_config(&self) -> DeleteConfig {
        DeleteConfig {
            trash: self.trash,
            continue_on_error: self.continue_on_error,
        }
    }
}
