use crate::desktop::format_bool;
use crate::error::{Error, Result};
use crate::model::Entry;
use crate::naming;
use crate::options::Options;
use log::debug;
use regex::Regex;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::LazyLock;

static KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+(\[[A-Za-z0-9_@.-]+\])?$").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    Set(String),
    Remove,
}

/// Field edits requested on the command line, with the values derived
/// from the positional argument used when a field is still empty.
#[derive(Debug, Clone, Default)]
pub struct EditRequest {
    pub exec: Option<PathBuf>,
    pub fallback_exec: Option<PathBuf>,
    pub name: Option<String>,
    pub fallback_name: Option<String>,
    pub icon: Option<String>,
    pub keywords: Option<String>,
    pub mime: Option<String>,
    pub hide: bool,
    pub terminal: bool,
    pub overrides: Vec<(String, Override)>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

impl EditRequest {
    pub fn from_options(opts: &Options) -> Result<Self> {
        let target = opts.target.as_deref().filter(|t| !t.is_empty());

        let fallback_name = match (target, opts.desktop.as_deref()) {
            (Some(target), _) => Some(naming::display_name(target)),
            (None, Some(desktop)) if !desktop.is_empty() => {
                let base = naming::basename(desktop);
                Some(base.strip_suffix(naming::DESKTOP_SUFFIX).unwrap_or(base).to_string())
            }
            _ => None,
        };

        let exec = non_empty(&opts.exec).map(|e| naming::absolute(&e)).transpose()?;
        let fallback_exec = target
            .filter(|t| !t.ends_with(naming::DESKTOP_SUFFIX))
            .map(naming::absolute)
            .transpose()?;

        let overrides = match opts.json.as_deref() {
            Some(json) => parse_overrides(json)?,
            None => Vec::new(),
        };

        Ok(Self {
            exec,
            fallback_exec,
            name: non_empty(&opts.name),
            fallback_name,
            icon: non_empty(&opts.icon),
            keywords: non_empty(&opts.keywords),
            mime: non_empty(&opts.mime),
            hide: opts.hide,
            terminal: opts.terminal,
            overrides,
        })
    }
}

pub fn parse_overrides(json: &str) -> Result<Vec<(String, Override)>> {
    let value: Value = serde_json::from_str(json).map_err(|e| Error::InvalidJson(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(Error::InvalidJson("expected an object like {\"key\":\"value\"}".to_string()));
    };

    let mut overrides = Vec::with_capacity(map.len());
    for (key, value) in map {
        if !KEY.is_match(&key) {
            return Err(Error::InvalidJson(format!("{:?} is not a valid key", key)));
        }
        let value = match value {
            Value::Null => Override::Remove,
            other => Override::Set(json_to_value(&key, &other)?),
        };
        check_override(&key, &value)?;
        overrides.push((key, value));
    }
    Ok(overrides)
}

fn json_to_value(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(format_bool(*b).to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(items) => {
            let mut list = String::new();
            for item in items {
                match item {
                    Value::Array(_) | Value::Object(_) | Value::Null => {
                        return Err(Error::InvalidJson(format!("{}: lists may only hold plain values", key)));
                    }
                    scalar => {
                        list.push_str(&json_to_value(key, scalar)?);
                        list.push(';');
                    }
                }
            }
            Ok(list)
        }
        Value::Object(_) | Value::Null => {
            Err(Error::InvalidJson(format!("{}: nested objects are not supported", key)))
        }
    }
}

fn check_override(key: &str, value: &Override) -> Result<()> {
    match (key, value) {
        ("Terminal" | "NoDisplay", Override::Set(v)) if v != "true" && v != "false" => {
            Err(Error::InvalidJson(format!("{} must be true or false", key)))
        }
        (_, Override::Remove) if is_known_key(key) => {
            Err(Error::InvalidJson(format!("{} cannot be removed", key)))
        }
        _ => Ok(()),
    }
}

fn is_known_key(key: &str) -> bool {
    matches!(
        key,
        "Type" | "Name" | "Exec" | "Icon" | "Keywords" | "MimeType" | "Categories" | "Terminal" | "NoDisplay"
    )
}

fn string_field<'a>(entry: &'a mut Entry, key: &str) -> Option<&'a mut String> {
    match key {
        "Type" => Some(&mut entry.entry_type),
        "Name" => Some(&mut entry.name),
        "Exec" => Some(&mut entry.exec),
        "Icon" => Some(&mut entry.icon),
        "Keywords" => Some(&mut entry.keywords),
        "MimeType" => Some(&mut entry.mime_type),
        "Categories" => Some(&mut entry.categories),
        _ => None,
    }
}

fn bool_field<'a>(entry: &'a mut Entry, key: &str) -> Option<&'a mut bool> {
    match key {
        "Terminal" => Some(&mut entry.terminal),
        "NoDisplay" => Some(&mut entry.no_display),
        _ => None,
    }
}

fn set_if_different(field: &mut String, value: &str) -> bool {
    if field.as_str() == value {
        return false;
    }
    *field = value.to_string();
    true
}

/// Applies `req` to `entry` and reports whether anything changed.
///
/// Fails with [`Error::MissingExecutable`] when a new `Exec` points at a
/// path that does not exist.
pub fn apply_edits(entry: &mut Entry, req: &EditRequest) -> Result<bool> {
    let mut changed = 0;

    let new_exec = match (&req.exec, &req.fallback_exec) {
        (Some(exec), _) if entry.exec != exec.to_string_lossy() => Some(exec),
        (_, Some(fallback)) if entry.exec.is_empty() => Some(fallback),
        _ => None,
    };
    if let Some(exec) = new_exec {
        if !exec.exists() {
            return Err(Error::MissingExecutable(exec.clone()));
        }
        entry.exec = exec.to_string_lossy().to_string();
        changed += 1;
    }

    if let Some(icon) = &req.icon {
        changed += set_if_different(&mut entry.icon, icon) as u32;
    }

    if req.hide && !entry.no_display {
        entry.no_display = true;
        changed += 1;
    }

    match (&req.name, &req.fallback_name) {
        (Some(name), _) => changed += set_if_different(&mut entry.name, name) as u32,
        (None, Some(fallback)) if entry.name.is_empty() => {
            changed += set_if_different(&mut entry.name, fallback) as u32
        }
        _ => {}
    }

    if req.terminal && !entry.terminal {
        entry.terminal = true;
        changed += 1;
    }

    if let Some(keywords) = &req.keywords {
        changed += set_if_different(&mut entry.keywords, keywords) as u32;
    }

    if let Some(mime) = &req.mime {
        changed += set_if_different(&mut entry.mime_type, mime) as u32;
    }

    for (key, value) in &req.overrides {
        if apply_override(entry, key, value) {
            debug!("JSON override changed {}", key);
            changed += 1;
        }
    }

    debug!("{} field(s) changed", changed);
    Ok(changed > 0)
}

fn apply_override(entry: &mut Entry, key: &str, value: &Override) -> bool {
    match value {
        Override::Remove => entry.remove_extra(key),
        Override::Set(value) => {
            if let Some(field) = string_field(entry, key) {
                set_if_different(field, value)
            } else if let Some(field) = bool_field(entry, key) {
                let value = value == "true";
                let changed = *field != value;
                *field = value;
                changed
            } else if entry.extra(key) == Some(value.as_str()) {
                false
            } else {
                entry.set_extra(key, value.clone());
                true
            }
        }
    }
}
