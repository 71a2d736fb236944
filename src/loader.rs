use crate::desktop::parse_desktop_file;
use crate::error::{Error, Result};
use crate::matcher::FuzzyMatcher;
use crate::model::{Entry, EntryLocation, LoadedEntry};
use crate::naming::DESKTOP_SUFFIX;
use crate::paths::SearchPaths;
use log::{debug, info};
use nix::unistd::{getegid, geteuid};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn is_privileged() -> bool {
    geteuid().is_root() || getegid().as_raw() == 0
}

/// Finds `file_name` in the search paths, or starts a new entry in the
/// primary directory. Entries found elsewhere are redirected to the primary
/// directory unless `overwrite_in_place` is set.
pub fn load_entry(paths: &SearchPaths, file_name: &str, overwrite_in_place: bool) -> Result<LoadedEntry> {
    for dir in paths.iter() {
        let candidate = dir.join(file_name);
        let Some(content) = read_if_present(&candidate)? else {
            continue;
        };

        info!("Found {} in {:?}", file_name, dir);
        let entry = parse_desktop_file(&content);
        let location = if paths.is_primary(dir) || overwrite_in_place {
            EntryLocation { target_path: candidate, is_newly_created: false, source_path: None }
        } else {
            debug!("{:?} is outside the primary directory, saving a copy", candidate);
            EntryLocation {
                target_path: paths.primary().join(file_name),
                is_newly_created: false,
                source_path: Some(candidate),
            }
        };
        return Ok(LoadedEntry { entry, location });
    }

    info!("{} not found, creating a new entry", file_name);
    Ok(LoadedEntry {
        entry: Entry::default(),
        location: EntryLocation {
            target_path: paths.primary().join(file_name),
            is_newly_created: true,
            source_path: None,
        },
    })
}

fn read_if_present(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Names (without `.desktop`) of the entries directly inside `dir`.
pub fn list_directory(dir: &Path, mut matcher: Option<&mut FuzzyMatcher>) -> Vec<String> {
    let names: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir())
        .filter_map(|e| {
            e.file_name()
                .to_str()
                .and_then(|n| n.strip_suffix(DESKTOP_SUFFIX))
                .map(str::to_string)
        })
        .filter(|name| matcher.as_mut().is_none_or(|m| m.matches(name)))
        .collect();

    debug!("{:?}: {} entries listed", dir, names.len());
    names
}

pub fn list_all(paths: &SearchPaths, filter: Option<&str>) -> Vec<(PathBuf, Vec<String>)> {
    let mut matcher = filter.filter(|f| !f.is_empty()).map(FuzzyMatcher::new);
    paths
        .iter()
        .map(|dir| (dir.to_path_buf(), list_directory(dir, matcher.as_mut())))
        .filter(|(_, names)| !names.is_empty())
        .collect()
}
