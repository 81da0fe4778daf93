//! Scratch directory trees for refidx-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory tree holding `.refidx.toml` files.
pub struct ConfigTree {
    /// Owned temporary directory, removed on drop.
    tmp: TempDir,
}

impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            tmp: tempfile::tempdir().unwrap(),
        }
    }

    /// Returns the top of the tree.
    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    /// Creates `rel` (and its parents) and returns its path.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let dir = self.tmp.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Writes `toml` as the `.refidx.toml` of directory `rel` and returns the file path.
    ///
    /// `"."` names the top of the tree.
    pub fn config(&self, rel: &str, toml: &str) -> PathBuf {
        let file = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&file, toml).unwrap();
        file
    }
}
