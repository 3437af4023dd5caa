use crate::error::{QuireError, Result};
use regex::Regex;

pub const DEFAULT_TITLE: &str = "Blog";

pub fn url_path_from_filename(filename: &str) -> Result<String> {
    let last_segment = filename.rsplit('_').next().unwrap_or(filename);
    let url_path = last_segment.strip_suffix(".md").unwrap_or(last_segment);

    if url_path.is_empty() || last_segment.len() == filename.len() {
        return Err(QuireError::InvalidFilename {
            filename: filename.to_string(),
        });
    }

    Ok(url_path.to_string())
}

pub fn extract_title(html: &str, url_path: &str) -> String {
    let pattern = format!(r#"(?s)<a href="/{}">(.*?)</a>"#, regex::escape(url_path));

    Regex::new(&pattern)
        .ok()
        .and_then(|regex| {
            regex
                .captures(html)
                .and_then(|captures| captures.get(1))
                .map(|inner| inner.as_str().to_string())
        })
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}
