use std::path::{Path, PathBuf};

pub const APPLICATION: &str = "Application";

/// The `[Desktop Entry]` group of a launcher file. Keys this tool does not
/// model are carried in `extra` and written back after the known ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub entry_type: String,
    pub name: String,
    pub exec: String,
    pub icon: String,
    pub terminal: bool,
    pub no_display: bool,
    pub keywords: String,
    pub mime_type: String,
    pub categories: String,
    pub extra: Vec<(String, String)>,
    /// Other groups such as `[Desktop Action ...]`, kept as raw lines.
    pub other_groups: Vec<(String, Vec<String>)>,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            entry_type: APPLICATION.to_string(),
            name: String::new(),
            exec: String::new(),
            icon: String::new(),
            terminal: false,
            no_display: false,
            keywords: String::new(),
            mime_type: String::new(),
            categories: String::new(),
            extra: Vec::new(),
            other_groups: Vec::new(),
        }
    }
}

impl Entry {
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn set_extra(&mut self, key: &str, value: String) {
        match self.extra.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.extra.push((key.to_string(), value)),
        }
    }

    pub fn remove_extra(&mut self, key: &str) -> bool {
        let before = self.extra.len();
        self.extra.retain(|(k, _)| k != key);
        self.extra.len() != before
    }
}

/// Where an entry came from and where it will be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLocation {
    pub target_path: PathBuf,
    pub is_newly_created: bool,
    /// Set when the entry was read from a file other than `target_path`.
    pub source_path: Option<PathBuf>,
}

impl EntryLocation {
    pub fn containing_directory(&self) -> &Path {
        self.target_path.parent().unwrap_or(Path::new("/"))
    }

    pub fn is_relocated(&self) -> bool {
        self.source_path.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct LoadedEntry {
    pub entry: Entry,
    pub location: EntryLocation,
}
