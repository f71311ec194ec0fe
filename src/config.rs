//! YAML run configuration.
//!
//! ```yaml
//! mode: ranges
//! head_category: seed
//! terminal_category: location
//! json: true
//! json_dir: reports
//! trace: false
//! ```
//!
//! Every key is optional. Command-line flags win over the file.

use crate::error::{AlmanacError, Result};
use crate::{Mode, SolveOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "almanac.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub mode: Option<Mode>,
    pub head_category: Option<String>,
    pub terminal_category: Option<String>,
    pub json: Option<bool>,
    pub json_dir: Option<PathBuf>,
    pub trace: Option<bool>,
}

impl RunConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // an empty file deserializes to `null`, which is not a mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            AlmanacError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&text).map_err(|e| match e {
            AlmanacError::Config(msg) => {
                AlmanacError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Load `almanac.yaml` from `dir` if it exists.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        tracing::debug!(path = %path.display(), "using config file");
        Self::load(&path).map(Some)
    }

    /// Copy every key that is set into `opts`.
    pub fn apply_to(&self, opts: &mut SolveOptions) {
        if let Some(mode) = self.mode {
            opts.mode = mode;
        }
        if let Some(head) = &self.head_category {
            opts.build.head_category = Some(head.clone());
        }
        if let Some(terminal) = &self.terminal_category {
            opts.build.terminal_category = Some(terminal.clone());
        }
        if let Some(json) = self.json {
            opts.write_json = json;
        }
        if let Some(dir) = &self.json_dir {
            opts.json_dir = Some(dir.clone());
        }
        if let Some(trace) = self.trace {
            opts.trace = trace;
        }
    }
}
