use directories::BaseDirs;
use log::debug;
use std::env;
use std::path::{Path, PathBuf};

const SYSTEM_DIRS: [&str; 2] = ["/usr/local/share/applications/", "/usr/share/applications/"];

/// Ordered directories searched for `.desktop` files. The first one is
/// where new entries and relocated copies are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths {
    dirs: Vec<PathBuf>,
}

impl SearchPaths {
    pub fn from_env(extra: &[PathBuf]) -> Self {
        let home = env::var("HOME").ok().filter(|h| !h.is_empty()).unwrap_or_else(|| {
            BaseDirs::new()
                .map(|b| b.home_dir().to_string_lossy().to_string())
                .unwrap_or_default()
        });
        let data_dirs = env::var("XDG_DATA_DIRS").ok();
        let data_home = env::var("XDG_DATA_HOME").ok();

        Self::build(&home, data_dirs.as_deref(), data_home.as_deref(), extra)
    }

    pub fn build(home: &str, data_dirs: Option<&str>, data_home: Option<&str>, extra: &[PathBuf]) -> Self {
        let mut seen: Vec<String> = Vec::new();
        let mut push = |candidate: String| {
            if !seen.contains(&candidate) {
                seen.push(candidate);
            }
        };

        push(format!("{}/.local/share/applications/", home));
        for dir in SYSTEM_DIRS {
            push(dir.to_string());
        }
        for var in [data_dirs, data_home].into_iter().flatten() {
            for part in var.split(':').filter(|s| !s.is_empty()) {
                push(format!("{}/applications/", part));
            }
        }
        for dir in extra {
            push(dir.to_string_lossy().to_string());
        }

        let dirs: Vec<PathBuf> = seen.into_iter().map(PathBuf::from).collect();
        debug!("Search paths: {:?}", dirs);
        Self { dirs }
    }

    pub fn primary(&self) -> &Path {
        &self.dirs[0]
    }

    pub fn is_primary(&self, dir: &Path) -> bool {
        dir == self.primary()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }
}
