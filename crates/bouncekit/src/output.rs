//! Output directory writer
//!
//! Each file is written to a temporary sibling, synced, and renamed into
//! place, so a page is either fully written or absent.

use crate::error::BuildError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name for per-route pages
pub const INDEX_FILE: &str = "index.html";

/// File name of the domain declaration
pub const CNAME_FILE: &str = "CNAME";

/// File name of the catch-all page
pub const NOT_FOUND_FILE: &str = "404.html";

/// Root directory the site is generated into
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the page for `logical_path` lives, e.g. `/a/b` -> `<root>/a/b/index.html`
    pub fn page_path(&self, logical_path: &str) -> PathBuf {
        let relative = logical_path.trim_start_matches('/');
        if relative.is_empty() {
            self.root.join(INDEX_FILE)
        } else {
            self.root.join(relative).join(INDEX_FILE)
        }
    }

    /// Write a route page and return its path
    pub fn write_page(&self, logical_path: &str, html: &str) -> Result<PathBuf, BuildError> {
        let path = self.page_path(logical_path);
        write_atomic(&path, html.as_bytes())?;
        Ok(path)
    }

    /// Write the `CNAME` file if `cname` is non-blank
    pub fn write_cname(&self, cname: &str) -> Result<Option<PathBuf>, BuildError> {
        let cname = cname.trim();
        if cname.is_empty() {
            return Ok(None);
        }
        let path = self.root.join(CNAME_FILE);
        write_atomic(&path, format!("{}\n", cname).as_bytes())?;
        Ok(Some(path))
    }

    /// Write the catch-all `404.html`
    pub fn write_not_found(&self, html: &str) -> Result<PathBuf, BuildError> {
        let path = self.root.join(NOT_FOUND_FILE);
        write_atomic(&path, html.as_bytes())?;
        Ok(path)
    }
}

/// Write `contents` to `path` via a synced temporary file in the same directory
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), BuildError> {
    let write_err = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
    temp.write_all(contents).map_err(write_err)?;
    temp.flush().map_err(write_err)?;
    temp.as_file_mut().sync_all().map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
