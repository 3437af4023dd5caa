use crate::assemble::{Template, index_page, not_found_page, post_page};
use crate::assets::{copy_static_assets, read_stylesheet};
use crate::config::{BuildConfig, SiteLayout};
use crate::error::{IoContext, QuireError, Result};
use crate::pagination::plan;
use crate::render::ContentRenderer;
use crate::title::{extract_title, url_path_from_filename};
use crate::types::{BuildSummary, Post, SourceFile};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct SiteBuilder {
    config: BuildConfig,
    renderer: ContentRenderer,
}

impl SiteBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            renderer: ContentRenderer::new(),
        }
    }

    pub fn layout(&self) -> &SiteLayout {
        &self.config.layout
    }

    pub fn build(&self) -> Result<BuildSummary> {
        let layout = self.layout();

        tracing::info!(root = %layout.root().display(), "reading templates, stylesheet and post sources");
        let template = Template::new(read_text(&layout.template(), "reading template")?);
        let not_found_template =
            Template::new(read_text(&layout.not_found_template(), "reading 404 template")?);
        let css = read_stylesheet(&layout.stylesheet())?;
        let sources = load_sources(&layout.source_dir())?;
        create_output_dirs(layout)?;

        tracing::info!("copying static assets");
        let assets = copy_static_assets(layout)?;

        tracing::info!(count = sources.len(), "rendering posts");
        let posts = prepare_posts(sources, &self.renderer)?;
        warn_duplicate_paths(&posts);

        tracing::info!(page_size = %self.config.page_size, "writing pages");
        let index_pages = self.write_pages(&template, &not_found_template, &css, &posts)?;

        Ok(BuildSummary {
            posts: posts.len(),
            index_pages,
            assets,
        })
    }

    fn write_pages(
        &self,
        template: &Template,
        not_found_template: &Template,
        css: &str,
        posts: &[Post],
    ) -> Result<usize> {
        let layout = self.layout();

        write_output(
            &layout.not_found_output(),
            &not_found_page(not_found_template, css),
        )?;

        for post in posts {
            write_output(&layout.post_output(&post.url_path), &post_page(template, post, css))?;
        }

        let page_plan = plan(posts.len(), self.config.page_size);
        if page_plan.pages.is_empty() {
            tracing::warn!("no posts found, skipping index pages");
        }

        for page in &page_plan.pages {
            let html = index_page(template, page, posts, css);
            write_output(&layout.index_page_output(page.number), &html)?;
            if page.is_root {
                write_output(&layout.root_index_output(), &html)?;
            }
        }

        Ok(page_plan.pages.len())
    }
}

// Filenames sort chronologically, so reversing gives newest first.
pub fn load_sources(source_dir: &Path) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|error| QuireError::WalkDir {
            path: source_dir.to_path_buf(),
            message: error.to_string(),
        })?;

        let path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }

        if path
            .extension()
            .map(|extension| extension != "md")
            .unwrap_or(true)
        {
            continue;
        }

        let bytes = fs::read(path).io_context("reading post", path)?;
        let markdown = String::from_utf8(bytes).map_err(|_| QuireError::InvalidEncoding {
            path: path.to_path_buf(),
        })?;

        sources.push(SourceFile {
            filename: entry.file_name().to_string_lossy().to_string(),
            path: path.to_path_buf(),
            markdown,
        });
    }

    sources.reverse();
    Ok(sources)
}

pub fn prepare_posts(sources: Vec<SourceFile>, renderer: &ContentRenderer) -> Result<Vec<Post>> {
    sources
        .into_par_iter()
        .map(|source| -> Result<Post> {
            let url_path = url_path_from_filename(&source.filename)?;
            let rendered_html = renderer.render(&source.markdown);
            let title = extract_title(&rendered_html, &url_path);
            tracing::debug!(%url_path, %title, "rendered post");

            Ok(Post {
                url_path,
                title,
                raw_markdown: source.markdown,
                rendered_html,
                source: source.path,
            })
        })
        .collect()
}

pub fn duplicate_paths(posts: &[Post]) -> Vec<(&Post, &Post)> {
    let mut seen: HashMap<&str, &Post> = HashMap::new();
    let mut duplicates = Vec::new();

    for post in posts {
        if let Some(existing) = seen.insert(&post.url_path, post) {
            duplicates.push((existing, post));
        }
    }

    duplicates
}

fn warn_duplicate_paths(posts: &[Post]) {
    for (earlier, later) in duplicate_paths(posts) {
        tracing::warn!(
            url_path = %later.url_path,
            kept = %later.source.display(),
            overwritten = %earlier.source.display(),
            "duplicate post path, output will be overwritten"
        );
    }
}

fn read_text(path: &Path, action: &str) -> Result<String> {
    fs::read_to_string(path).io_context(action, path)
}

fn create_output_dirs(layout: &SiteLayout) -> Result<()> {
    let dirs: [PathBuf; 2] = [layout.page_dir(), layout.public_dir().join("images")];
    for dir in &dirs {
        fs::create_dir_all(dir).io_context("creating directory", dir)?;
    }
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).io_context("writing", path)
}
