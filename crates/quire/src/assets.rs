use std::fs;
use std::path::{Path, PathBuf};

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use walkdir::WalkDir;

use crate::config::SiteLayout;
use crate::error::{IoContext, QuireError, Result};

pub fn read_stylesheet(path: &Path) -> Result<String> {
    let source = fs::read_to_string(path).io_context("reading stylesheet", path)?;
    minify_css(&source).map_err(|message| QuireError::Css {
        path: path.to_path_buf(),
        message,
    })
}

pub fn minify_css(source: &str) -> std::result::Result<String, String> {
    let mut stylesheet =
        StyleSheet::parse(source, ParserOptions::default()).map_err(|error| error.to_string())?;
    stylesheet
        .minify(MinifyOptions::default())
        .map_err(|error| error.to_string())?;
    let printed = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|error| error.to_string())?;
    Ok(printed.code)
}

pub fn copy_static_assets(layout: &SiteLayout) -> Result<usize> {
    let root = layout.root();
    let public = layout.public_dir();
    let mut copied = 0;

    copied += copy_dir_contents(&root.join("fonts"), &public.join("fonts"))?;
    copied += copy_file_if_present(&root.join("favicon.ico"), &public.join("favicon.ico"))?;

    for image in top_level_files_with_extension(root, "webp")? {
        if let Some(name) = image.file_name() {
            copied += copy_file_if_present(&image, &public.join(name))?;
        }
    }

    copied += copy_dir_contents(&root.join("images"), &public)?;

    Ok(copied)
}

fn copy_file_if_present(source: &Path, dest: &Path) -> Result<usize> {
    if !source.is_file() {
        tracing::debug!(path = %source.display(), "asset not present, skipping");
        return Ok(0);
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).io_context("creating directory", parent)?;
    }
    fs::copy(source, dest).io_context("copying asset", source)?;
    Ok(1)
}

fn copy_dir_contents(source_dir: &Path, dest_dir: &Path) -> Result<usize> {
    if !source_dir.is_dir() {
        tracing::debug!(path = %source_dir.display(), "asset directory not present, skipping");
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(source_dir).min_depth(1) {
        let entry = entry.map_err(|error| QuireError::WalkDir {
            path: source_dir.to_path_buf(),
            message: error.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .unwrap_or(entry.path());
        copied += copy_file_if_present(entry.path(), &dest_dir.join(relative))?;
    }

    Ok(copied)
}

fn top_level_files_with_extension(directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|error| QuireError::WalkDir {
            path: directory.to_path_buf(),
            message: error.to_string(),
        })?;
        if entry.file_type().is_file()
            && let Some(file_extension) = entry.path().extension()
            && file_extension == extension
        {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_minify_css_strips_comments_and_whitespace() {
        let source = "/* header */\nbody {\n  color: red;\n  margin: 0px;\n}\n";
        let minified = minify_css(source).unwrap();
        assert!(!minified.contains("header"));
        assert!(!minified.contains('\n'));
        assert!(minified.starts_with("body{"));
        assert!(minified.contains("color:red"));
    }

    #[test]
    fn test_read_stylesheet_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let error = read_stylesheet(&dir.path().join("style.css")).unwrap_err();
        assert!(matches!(error, QuireError::Io { .. }));
    }

    #[test]
    fn test_copy_static_assets() {
        let dir = TempDir::new().unwrap();
        let layout = SiteLayout::new(dir.path());
        let root = layout.root();

        fs::create_dir_all(root.join("fonts")).unwrap();
        fs::write(root.join("fonts/serif.woff2"), "font").unwrap();
        fs::write(root.join("favicon.ico"), "icon").unwrap();
        fs::write(root.join("hero.webp"), "webp").unwrap();
        fs::write(root.join("notes.txt"), "ignored").unwrap();
        fs::create_dir_all(root.join("images/diagrams")).unwrap();
        fs::write(root.join("images/diagrams/flow.png"), "png").unwrap();

        let copied = copy_static_assets(&layout).unwrap();
        assert_eq!(copied, 4);

        let public = layout.public_dir();
        assert!(public.join("fonts/serif.woff2").is_file());
        assert!(public.join("favicon.ico").is_file());
        assert!(public.join("hero.webp").is_file());
        assert!(public.join("diagrams/flow.png").is_file());
        assert!(!public.join("notes.txt").exists());
    }

    #[test]
    fn test_missing_assets_are_skipped() {
        let dir = TempDir::new().unwrap();
        let layout = SiteLayout::new(dir.path());
        assert_eq!(copy_static_assets(&layout).unwrap(), 0);
    }
}
