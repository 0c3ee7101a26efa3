//! Project configuration (`neha.toml`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "neha.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory scanned for sources, relative to the project root.
    pub root_dir: PathBuf,
    /// Build output directory. Emptied at the start of every build.
    pub out_dir: PathBuf,
    /// Write `<file>.map` next to each transformed file.
    pub source_maps: bool,
    pub inline_source_map: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./src"),
            out_dir: PathBuf::from("./dist"),
            source_maps: true,
            inline_source_map: false,
        }
    }
}

impl ProjectConfig {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load `neha.toml` from `root`. A missing file yields the defaults; an
    /// unreadable or invalid one is reported and also yields the defaults.
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
                return Self::default();
            }
        };

        match Self::parse(&text) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                Self::default()
            }
        }
    }
}
