use crate::model::Entry;
use std::fmt::Write as FmtWrite;

pub const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";

pub fn parse_bool(value: &str) -> bool {
    value.trim() == "true"
}

pub fn format_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Escapes a value for a single `Key=Value` line. Leading and trailing
/// spaces become `\s` so the line trim on read keeps them.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let lead = value.len() - value.trim_start_matches(' ').len();
    let trail = value.len() - value.trim_end_matches(' ').len();

    for (i, c) in value.char_indices() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            ' ' if i < lead || i >= value.len() - trail => out.push_str("\\s"),
            c => out.push(c),
        }
    }

    out
}

/// Reverses [`escape_value`]. Unknown escapes are kept as written, since
/// `Exec` lines carry their own quoting.
pub fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

pub fn parse_desktop_file(content: &str) -> Entry {
    let mut entry = Entry::default();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') { continue; }

        if line.starts_with('[') && line.ends_with(']') {
            let group = &line[1..line.len() - 1];
            if group != DESKTOP_ENTRY_GROUP {
                entry.other_groups.push((group.to_string(), Vec::new()));
            }
            current = Some(group.to_string());
            continue;
        }

        match current.as_deref() {
            Some(DESKTOP_ENTRY_GROUP) => {
                if let Some((key, value)) = line.split_once('=') {
                    apply_key(&mut entry, key.trim(), &unescape_value(value.trim()));
                }
            }
            Some(_) => {
                if let Some((_, lines)) = entry.other_groups.last_mut() {
                    lines.push(line.to_string());
                }
            }
            None => {}
        }
    }

    entry
}

fn apply_key(entry: &mut Entry, key: &str, value: &str) {
    match key {
        "Type" => entry.entry_type = value.to_string(),
        "Name" => entry.name = value.to_string(),
        "Exec" => entry.exec = value.to_string(),
        "Icon" => entry.icon = value.to_string(),
        "Terminal" => entry.terminal = parse_bool(value),
        "NoDisplay" => entry.no_display = parse_bool(value),
        "Keywords" => entry.keywords = value.to_string(),
        "MimeType" => entry.mime_type = value.to_string(),
        "Categories" => entry.categories = value.to_string(),
        _ => entry.set_extra(key, value.to_string()),
    }
}

pub fn write_desktop_file(entry: &Entry) -> String {
    let mut content = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(content, "[{}]", DESKTOP_ENTRY_GROUP);
    let _ = writeln!(content, "Type={}", escape_value(&entry.entry_type));
    let _ = writeln!(content, "Name={}", escape_value(&entry.name));
    let _ = writeln!(content, "Exec={}", escape_value(&entry.exec));
    if !entry.icon.is_empty() {
        let _ = writeln!(content, "Icon={}", escape_value(&entry.icon));
    }
    let _ = writeln!(content, "Terminal={}", format_bool(entry.terminal));
    if entry.no_display {
        let _ = writeln!(content, "NoDisplay=true");
    }
    for (key, value) in [
        ("Keywords", &entry.keywords),
        ("MimeType", &entry.mime_type),
        ("Categories", &entry.categories),
    ] {
        if !value.is_empty() {
            let _ = writeln!(content, "{}={}", key, escape_value(value));
        }
    }
    for (key, value) in &entry.extra {
        let _ = writeln!(content, "{}={}", key, escape_value(value));
    }

    for (group, lines) in &entry.other_groups {
        let _ = writeln!(content, "\n[{}]", group);
        for line in lines {
            let _ = writeln!(content, "{}", line);
        }
    }

    content
}
