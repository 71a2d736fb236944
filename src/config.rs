use crate::error::{Error, Result};
use directories::ProjectDirs;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    /// Editor used when neither $VISUAL nor $EDITOR resolves.
    #[serde(default = "default_editor")]
    pub editor: String,
    #[serde(default = "default_true")]
    pub refresh_database: bool,
    #[serde(default = "default_refresh_command")]
    pub refresh_command: String,
}

fn default_editor() -> String { "/usr/bin/editor".to_string() }
fn default_true() -> bool { true }
fn default_refresh_command() -> String { "update-desktop-database".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            editor: default_editor(),
            refresh_database: default_true(),
            refresh_command: default_refresh_command(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PathsConfig {
    /// Searched after the XDG directories.
    #[serde(default)]
    pub extra: Vec<PathBuf>,
}

pub fn config_path() -> PathBuf {
    let proj_dirs = ProjectDirs::from("org", "desktopmenuitem", "desktopmenuitem");
    if let Some(dirs) = &proj_dirs {
        dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    debug!("Loaded config from {:?}", path);
    Ok(config)
}
