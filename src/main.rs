mod config;
mod desktop;
mod edit;
mod error;
mod executor;
mod loader;
mod matcher;
mod model;
mod naming;
mod options;
mod paths;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use log::debug;
use std::process::ExitCode;

use crate::config::load_config;
use crate::desktop::write_desktop_file;
use crate::edit::{EditRequest, apply_edits};
use crate::loader::{is_privileged, list_all, load_entry};
use crate::options::Options;
use crate::paths::SearchPaths;

fn main() -> ExitCode {
    env_logger::init();
    let opts = Options::parse();

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("{:#}", e).red());
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &Options) -> Result<()> {
    let config = load_config()?;
    let paths = SearchPaths::from_env(&config.paths.extra);

    if let Some(filter) = &opts.list {
        for (dir, names) in list_all(&paths, filter.as_deref()) {
            println!("{}", dir.display().to_string().blue());
            for name in names {
                println!("   {}", name.green());
            }
            println!();
        }
        return Ok(());
    }

    if !opts.has_target() {
        Options::command().print_help()?;
        return Ok(());
    }

    // Bad --json or a bad cwd must fail before anything is loaded or written.
    let request = EditRequest::from_options(opts)?;

    let Some(file_name) = naming::desktop_file_name(opts.target.as_deref(), opts.desktop.as_deref()) else {
        Options::command().print_help()?;
        return Ok(());
    };

    let overwrite_in_place = opts.overwrite && is_privileged();
    if opts.overwrite && !overwrite_in_place {
        debug!("--overwrite ignored without elevated privileges");
        println!("{}", "--overwrite needs root; the entry will be saved as a copy".yellow());
    }

    let mut loaded = load_entry(&paths, &file_name, overwrite_in_place)?;
    let location = &loaded.location;
    if location.is_newly_created {
        println!("Creating: {}", location.target_path.display().to_string().blue());
    } else {
        let source = location.source_path.as_ref().unwrap_or(&location.target_path);
        println!("Loading: {}", source.display().to_string().blue());
    }

    if opts.edit && !location.is_newly_created && !location.is_relocated() {
        let editor = executor::editor_from_env(&config.general)?;
        executor::open_in_editor(&editor, &location.target_path)?;
        return Ok(());
    }

    if opts.view {
        print!("{}", write_desktop_file(&loaded.entry));
        return Ok(());
    }

    let changed = apply_edits(&mut loaded.entry, &request)?;
    if !changed && !opts.edit {
        println!("No Changes");
        return Ok(());
    }

    // Resolve the editor up front so a missing one fails before the write.
    let editor = if opts.edit { Some(executor::editor_from_env(&config.general)?) } else { None };

    executor::save_entry(&loaded)?;
    executor::refresh_database(&config.general, loaded.location.containing_directory());

    let target = loaded.location.target_path.display().to_string();
    if loaded.location.is_relocated() {
        println!("Saved as copy: {}", target.green());
    } else if editor.is_none() {
        println!("Saved: {}", target.green());
    }
    if let Some(editor) = editor {
        executor::open_in_editor(&editor, &loaded.location.target_path)?;
    }

    Ok(())
}
