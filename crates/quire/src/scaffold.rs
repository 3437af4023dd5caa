use crate::error::{IoContext, QuireError, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

// Underscores become `-` too: the last `_` of a filename separates the
// timestamp from the URL path.
pub fn url_safe_title(raw_title: &str) -> String {
    let dashed: String = raw_title
        .to_lowercase()
        .chars()
        .map(|character| {
            if character.is_whitespace() || character == '_' {
                '-'
            } else {
                character
            }
        })
        .collect();
    urlencoding::encode(&dashed).into_owned()
}

pub fn post_filename(url_title: &str, now: DateTime<Utc>) -> String {
    format!("{}_{url_title}.md", now.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
}

pub fn post_body(raw_title: &str, url_title: &str, now: DateTime<Utc>) -> String {
    format!(
        "# [{raw_title}](/{url_title})\n<div class=\"post-date\">{}</div>\n",
        now.format("%A, %B %-d, %Y")
    )
}

pub fn new_post(source_dir: &Path, raw_title: &str, now: DateTime<Utc>) -> Result<PathBuf> {
    let raw_title = raw_title.trim();
    if raw_title.is_empty() {
        return Err(QuireError::EmptyTitle);
    }

    let url_title = url_safe_title(raw_title);
    let path = source_dir.join(post_filename(&url_title, now));

    if path.exists() {
        return Err(QuireError::PostExists { path });
    }

    fs::create_dir_all(source_dir).io_context("creating directory", source_dir)?;
    fs::write(&path, post_body(raw_title, &url_title, now)).io_context("writing post", &path)?;

    Ok(path)
}
