use std::fmt::Write as _;

use anyhow::{anyhow, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};

/// Expand the strftime patterns in `template` for `time`.
///
/// Unknown specifiers are an error instead of a formatting panic.
pub fn format_filename<Tz>(template: &str, time: &DateTime<Tz>) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(template).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(anyhow!("Invalid name format: {}", template));
    }

    let mut name = String::new();
    write!(name, "{}", time.format_with_items(items.into_iter()))
        .map_err(|_| anyhow!("Failed to format name: {}", template))?;
    Ok(name)
}

/// Append `.ext` unless the last path segment of `name` already has an extension
pub fn ensure_extension(name: &str, ext: Option<&str>) -> String {
    let ext = match ext.map(|e| e.trim_start_matches('.')) {
        Some(ext) if !ext.is_empty() => ext,
        _ => return name.to_string(),
    };

    let file_name = name.rsplit('/').next().unwrap_or(name);
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() => name.to_string(),
        // "shot." only lacks the extension itself
        Some(idx) if idx > 0 => format!("{}{}", name, ext),
        _ => format!("{}.{}", name, ext),
    }
}
