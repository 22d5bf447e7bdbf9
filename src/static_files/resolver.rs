//! Maps request paths onto files beneath the site root.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::common::ApiError;

pub const INDEX_DOCUMENT: &str = "index.html";

#[derive(Debug, Error)]
pub enum StaticError {
    #[error("path escapes the site root or is malformed")]
    InvalidPath,
    #[error("file not found")]
    NotFound,
    #[error("file could not be read: {0}")]
    Read(#[source] std::io::Error),
}

impl From<StaticError> for ApiError {
    fn from(err: StaticError) -> Self {
        match err {
            StaticError::InvalidPath => ApiError::InvalidPath,
            StaticError::NotFound => ApiError::NotFound,
            StaticError::Read(e) => ApiError::ReadError(e),
        }
    }
}

/// A served file and its guessed content type.
#[derive(Debug)]
pub struct StaticFile {
    pub path: PathBuf,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct StaticRoot {
    root: PathBuf,
}

impl StaticRoot {
    /// Canonicalizes `root`; fails if it does not exist.
    pub fn open(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = std::fs::canonicalize(root.as_ref())?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Percent-decodes and lexically normalizes `request_path`. `/` maps to
    /// the index document; any `..` that would climb above the root, and any
    /// absolute or prefixed component, is rejected.
    pub fn resolve(&self, request_path: &str) -> Result<PathBuf, StaticError> {
        let decoded =
            urlencoding::decode(request_path).map_err(|_| StaticError::InvalidPath)?;
        if decoded.contains('\0') {
            return Err(StaticError::InvalidPath);
        }

        let clean = if decoded == "/" || decoded.is_empty() {
            format!("/{}", INDEX_DOCUMENT)
        } else {
            decoded.into_owned()
        };

        let mut segments: Vec<&std::ffi::OsStr> = Vec::new();
        for component in Path::new(&clean).components() {
            match component {
                Component::RootDir | Component::CurDir => {}
                Component::Normal(segment) => segments.push(segment),
                Component::ParentDir => {
                    if segments.pop().is_none() {
                        return Err(StaticError::InvalidPath);
                    }
                }
                Component::Prefix(_) => return Err(StaticError::InvalidPath),
            }
        }

        let full = segments
            .iter()
            .fold(self.root.clone(), |acc, segment| acc.join(segment));

        if !full.starts_with(&self.root) {
            return Err(StaticError::InvalidPath);
        }
        Ok(full)
    }

    /// Resolves and reads a file. Directories count as missing.
    pub async fn load(&self, request_path: &str) -> Result<StaticFile, StaticError> {
        let path = self.resolve(request_path)?;

        let metadata = tokio::fs::metadata(&path).await.map_err(classify_io_error)?;
        if metadata.is_dir() {
            return Err(StaticError::NotFound);
        }

        let bytes = tokio::fs::read(&path).await.map_err(classify_io_error)?;
        let content_type = super::mime::content_type_for(&path);

        Ok(StaticFile {
            path,
            content_type,
            bytes,
        })
    }
}

fn classify_io_error(e: std::io::Error) -> StaticError {
    if e.kind() == std::io::ErrorKind::NotFound {
        StaticError::NotFound
    } else {
        StaticError::Read(e)
    }
}
