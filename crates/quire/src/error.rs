use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuireError {
    #[error("Failed while {action} {path}: {source}")]
    Io {
        action: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid page size '{value}': expected a positive integer")]
    InvalidPageSize { value: String },

    #[error("Failed while getting post paths from filenames: invalid filename '{filename}'")]
    InvalidFilename { filename: String },

    #[error("Failed to parse Markdown: {path} is not valid UTF-8")]
    InvalidEncoding { path: PathBuf },

    #[error("Failed while minifying stylesheet {path}: {message}")]
    Css { path: PathBuf, message: String },

    #[error("Directory walk error in {path}: {message}")]
    WalkDir { path: PathBuf, message: String },

    #[error("Post title must not be empty")]
    EmptyTitle,

    #[error("Post already exists: {path}")]
    PostExists { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, QuireError>;

pub trait IoContext<T> {
    fn io_context(self, action: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context(self, action: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| QuireError::Io {
            action: action.to_string(),
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}
