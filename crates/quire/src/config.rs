use crate::error::{QuireError, Result};
use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const PAGE_SIZE_ENV: &str = "POSTS_PER_PAGE";

const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(5).unwrap();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(size: usize) -> Result<Self> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or_else(|| QuireError::InvalidPageSize {
                value: size.to_string(),
            })
    }

    pub fn from_setting(value: Option<&str>) -> Result<Self> {
        value.map_or_else(|| Ok(Self::default()), str::parse)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl FromStr for PageSize {
    type Err = QuireError;

    fn from_str(value: &str) -> Result<Self> {
        value
            .trim()
            .parse::<NonZeroUsize>()
            .map(Self)
            .map_err(|_| QuireError::InvalidPageSize {
                value: value.to_string(),
            })
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct SiteLayout {
    root: PathBuf,
}

impl SiteLayout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    pub fn template(&self) -> PathBuf {
        self.root.join("template.html")
    }

    pub fn not_found_template(&self) -> PathBuf {
        self.root.join("404.html")
    }

    pub fn stylesheet(&self) -> PathBuf {
        self.root.join("style.css")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join("built")
    }

    pub fn page_dir(&self) -> PathBuf {
        self.output_dir().join("page")
    }

    pub fn public_dir(&self) -> PathBuf {
        self.output_dir().join("public")
    }

    pub fn post_output(&self, url_path: &str) -> PathBuf {
        self.output_dir().join(format!("{url_path}.html"))
    }

    pub fn index_page_output(&self, number: usize) -> PathBuf {
        self.page_dir().join(format!("{number}.html"))
    }

    pub fn root_index_output(&self) -> PathBuf {
        self.output_dir().join("index.html")
    }

    pub fn not_found_output(&self) -> PathBuf {
        self.output_dir().join("404.html")
    }
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self::new("blog")
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    pub layout: SiteLayout,
    pub page_size: PageSize,
}

impl BuildConfig {
    pub fn new(layout: SiteLayout, page_size: PageSize) -> Self {
        Self { layout, page_size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_size_is_five() {
        assert_eq!(PageSize::default().get(), 5);
    }

    #[test]
    fn test_page_size_parses_positive_integers() {
        assert_eq!("12".parse::<PageSize>().unwrap().get(), 12);
        assert_eq!(" 3 ".parse::<PageSize>().unwrap().get(), 3);
    }

    #[test]
    fn test_page_size_rejects_zero_and_garbage() {
        assert!(matches!(
            "0".parse::<PageSize>(),
            Err(QuireError::InvalidPageSize { .. })
        ));
        assert!("-5".parse::<PageSize>().is_err());
        assert!("five".parse::<PageSize>().is_err());
        assert!("".parse::<PageSize>().is_err());
        assert!(PageSize::new(0).is_err());
    }

    #[test]
    fn test_page_size_from_setting() {
        assert_eq!(PageSize::from_setting(None).unwrap(), PageSize::default());
        assert_eq!(PageSize::from_setting(Some("8")).unwrap().get(), 8);
        assert!(matches!(
            PageSize::from_setting(Some("0")),
            Err(QuireError::InvalidPageSize { .. })
        ));
    }

    #[test]
    fn test_layout_paths() {
        let layout = SiteLayout::new("site");
        assert_eq!(layout.source_dir(), Path::new("site/src"));
        assert_eq!(layout.post_output("hello"), Path::new("site/built/hello.html"));
        assert_eq!(layout.index_page_output(3), Path::new("site/built/page/3.html"));
        assert_eq!(layout.root_index_output(), Path::new("site/built/index.html"));
        assert_eq!(layout.not_found_output(), Path::new("site/built/404.html"));
        assert_eq!(layout.public_dir(), Path::new("site/built/public"));
    }
}
