use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

pub const DESKTOP_SUFFIX: &str = ".desktop";

static APPIMAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\.appimage").expect("static regex"));

/// Strips packaging and version noise from an executable name, so that
/// `krita-5.2.2-x86_64.appimage` becomes `krita` and `tool_v3` becomes `tool`.
pub fn clean_name(raw: &str) -> String {
    let mut name = APPIMAGE.replace_all(raw, "").into_owned();
    let mut start = 0;

    while let Some(offset) = find_separator(&name, start) {
        let bytes = name.as_bytes();
        let mut next = offset + 1;
        if matches!(bytes.get(next), Some(b'v' | b'V')) {
            next += 1;
        }
        if bytes.get(next).is_some_and(u8::is_ascii_digit) {
            name.truncate(offset);
            break;
        }
        start = offset + 1;
    }

    name
}

fn find_separator(name: &str, start: usize) -> Option<usize> {
    name[start..].find(['-', '_', '.']).map(|i| start + i)
}

/// Upper-cases the first letter of every whitespace separated word.
pub fn proper_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;

    for c in s.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }

    out
}

pub fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
}

pub fn display_name(raw: &str) -> String {
    let base = basename(raw);
    proper_case(&clean_name(base.strip_suffix(DESKTOP_SUFFIX).unwrap_or(base)))
}

/// Picks the `.desktop` filename to look up: a positional `.desktop` name wins,
/// then `--desktop`, then the cleaned executable name.
pub fn desktop_file_name(target: Option<&str>, desktop: Option<&str>) -> Option<String> {
    if let Some(target) = target.filter(|t| t.ends_with(DESKTOP_SUFFIX)) {
        return Some(basename(target).to_string());
    }
    if let Some(desktop) = desktop.map(basename).filter(|d| !d.is_empty()) {
        return Some(if desktop.ends_with(DESKTOP_SUFFIX) {
            desktop.to_string()
        } else {
            format!("{}{}", desktop, DESKTOP_SUFFIX)
        });
    }
    target.map(|t| format!("{}{}", clean_name(basename(t)), DESKTOP_SUFFIX))
}

/// Lexically resolves `.` and `..`, joining relative paths onto `cwd`.
pub fn normalize_path(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() { path.to_path_buf() } else { cwd.join(path) };
    let mut out = PathBuf::new();

    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }

    out
}

pub fn absolute(path: &str) -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| Error::io(".", e))?;
    Ok(normalize_path(Path::new(path), &cwd))
}
