//! bulkcal configuration at ~/.config/bulkcal/config.toml

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::warn;

use crate::error::{BulkCalError, BulkCalResult};

/// Fixed name of the template created when no input file is given
pub const TEMPLATE_FILENAME: &str = "events.xlsx";

/// Default output name, placed in the work directory
pub const OUTPUT_FILENAME: &str = "output.ics";

fn default_reveal() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BulkCalConfig {
    /// Where the template and the default output live.
    /// Defaults to the directory of the running executable.
    pub work_dir: Option<PathBuf>,

    /// Application used to open the template (e.g. "Microsoft Excel").
    /// The system default for .xlsx files when unset.
    pub editor: Option<String>,

    /// Reveal the output file in the file manager when done
    #[serde(default = "default_reveal")]
    pub reveal: bool,
}

impl Default for BulkCalConfig {
    fn default() -> Self {
        BulkCalConfig {
            work_dir: None,
            editor: None,
            reveal: default_reveal(),
        }
    }
}

impl BulkCalConfig {
    pub fn config_path() -> BulkCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BulkCalError::Config("Could not determine config directory".into()))?
            .join("bulkcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config. A missing file, or no config directory at all,
    /// gives the defaults. Nothing is written.
    pub fn load() -> BulkCalResult<Self> {
        match Self::config_path() {
            Ok(config_path) => Self::load_from(&config_path),
            Err(e) => {
                warn!("{e}, using default config");
                Self::from_sources(None)
            }
        }
    }

    /// Load config from `path` (optional) with `BULKCAL_*` environment overrides.
    pub fn load_from(path: &Path) -> BulkCalResult<Self> {
        Self::from_sources(Some(path))
    }

    fn from_sources(path: Option<&Path>) -> BulkCalResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix("BULKCAL"))
            .build()
            .map_err(|e| BulkCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| BulkCalError::Config(e.to_string()))
    }

    /// Resolve the work directory, expanding `~`.
    pub fn work_dir(&self) -> BulkCalResult<PathBuf> {
        match &self.work_dir {
            Some(dir) => {
                let expanded = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
                Ok(PathBuf::from(expanded))
            }
            None => {
                let exe = std::env::current_exe()?;
                exe.parent().map(Path::to_path_buf).ok_or_else(|| {
                    BulkCalError::Config(format!("{} has no parent directory", exe.display()))
                })
            }
        }
    }

    pub fn template_path(&self) -> BulkCalResult<PathBuf> {
        Ok(self.work_dir()?.join(TEMPLATE_FILENAME))
    }

    pub fn default_output_path(&self) -> BulkCalResult<PathBuf> {
        Ok(self.work_dir()?.join(OUTPUT_FILENAME))
    }
}
