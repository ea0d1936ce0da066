use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use super::filter;

pub const EXPORT_TITLE: &str = "# AI & Data Analytics Newsletter";
pub const EXPORT_EXTENSION: &str = "md";

/// Renders the Markdown document for `content`. The chain-of-thought filter
/// runs again here so nothing the draft might still carry reaches the file.
pub fn render_document<Tz>(content: &str, generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}\n\n**Generated on {}**\n\n{}",
        EXPORT_TITLE,
        generated_at.format("%B %d, %Y"),
        filter::strip(content)
    )
}

pub fn export_file_name<Tz>(generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "newsletter_{}.{}",
        generated_at.format("%Y%m%d_%H%M%S"),
        EXPORT_EXTENSION
    )
}

/// Writes the rendered document into `dir` and returns the file's path.
pub fn write_document<Tz>(dir: &Path, content: &str, generated_at: &DateTime<Tz>) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fs::create_dir_all(dir)
        .context(format!("Failed to create export directory: {}", dir.display()))?;

    let path = dir.join(export_file_name(generated_at));
    fs::write(&path, render_document(content, generated_at))
        .context(format!("Failed to write export: {}", path.display()))?;

    Ok(path)
}
