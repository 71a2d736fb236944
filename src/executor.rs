use crate::config::GeneralConfig;
use crate::desktop::write_desktop_file;
use crate::error::{Error, Result};
use crate::model::LoadedEntry;
use log::{debug, info, warn};
use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Writes the entry to its target path. The containing directory must
/// already exist.
pub fn save_entry(loaded: &LoadedEntry) -> Result<()> {
    let path = &loaded.location.target_path;
    fs::write(path, write_desktop_file(&loaded.entry)).map_err(|e| Error::io(path, e))?;
    info!("Wrote {:?}", path);
    Ok(())
}

/// Resolves a program name against `$PATH`; names containing a `/` are
/// checked as given.
pub fn find_program(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    if program.contains('/') {
        let path = PathBuf::from(program);
        return is_executable(&path).then_some(path);
    }

    let path_var = env::var("PATH").ok()?;
    path_var
        .split(':')
        .filter(|dir| !dir.is_empty())
        .map(|dir| Path::new(dir).join(program))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Best effort: a missing or failing refresh tool is only logged.
pub fn refresh_database(config: &GeneralConfig, dir: &Path) {
    if !config.refresh_database {
        return;
    }
    let Some(program) = find_program(&config.refresh_command) else {
        debug!("{} not found, skipping menu refresh", config.refresh_command);
        return;
    };

    match Command::new(&program).arg(dir).status() {
        Ok(status) => debug!("{:?} {:?} exited with {}", program, dir, status),
        Err(e) => debug!("Failed to run {:?}: {}", program, e),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Picks the first of `$VISUAL`, `$EDITOR` and the configured fallback
/// that resolves to an existing program. Values may carry arguments,
/// e.g. `code --wait`.
pub fn resolve_editor(visual: Option<&str>, editor: Option<&str>, fallback: &str) -> Result<EditorCommand> {
    let candidates: Vec<&str> = [visual, editor, Some(fallback)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != "$VISUAL")
        .collect();

    for candidate in &candidates {
        let mut parts = candidate.split_whitespace();
        let Some(program) = parts.next() else { continue };
        if let Some(program) = find_program(program) {
            return Ok(EditorCommand { program, args: parts.map(str::to_string).collect() });
        }
        debug!("Editor candidate {:?} not found", candidate);
    }

    Err(Error::NoEditor(if candidates.is_empty() {
        "Unable to determine editor to use.".to_string()
    } else {
        candidates.join(", ")
    }))
}

pub fn editor_from_env(config: &GeneralConfig) -> Result<EditorCommand> {
    let visual = env::var("VISUAL").ok();
    let editor = env::var("EDITOR").ok();
    resolve_editor(visual.as_deref(), editor.as_deref(), &config.editor)
}

/// Runs the editor on `file` and waits for it to exit.
pub fn open_in_editor(editor: &EditorCommand, file: &Path) -> Result<()> {
    let status = Command::new(&editor.program)
        .args(&editor.args)
        .arg(file)
        .status()
        .map_err(|e| Error::io(&editor.program, e))?;

    if !status.success() {
        warn!("Editor {:?} exited with {}", editor.program, status);
    }
    Ok(())
}
