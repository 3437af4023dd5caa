use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub filename: String,
    pub path: PathBuf,
    pub markdown: String,
}

#[derive(Debug, Clone)]
pub struct Post {
    pub url_path: String,
    pub title: String,
    pub raw_markdown: String,
    pub rendered_html: String,
    pub source: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildSummary {
    pub posts: usize,
    pub index_pages: usize,
    pub assets: usize,
}
