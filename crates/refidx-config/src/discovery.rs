//! Configuration file discovery.
//!
//! Discovers `.refidx.toml` files by walking up the directory tree from a starting point,
//! then appending the global `~/.refidx.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".refidx.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global (`~/.refidx.toml`)
/// last. Discovery stops at the first file that sets `root = true`; the global file is
/// only appended when no such file was found.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    let mut found_root = false;

    let mut current = Some(cwd);
    while let Some(dir) = current {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.is_file() {
            let is_root = is_root_config(&config_path);
            configs.push(config_path);
            if is_root {
                found_root = true;
                break;
            }
        }
        current = dir.parent();
    }

    if !found_root
        && let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.refidx.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::ConfigTree;

    /// Drops the global config, which depends on the machine running the tests.
    fn local(configs: &[PathBuf]) -> Vec<&PathBuf> {
        configs.iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn no_configs() {
        let tree = ConfigTree::new();
        let sub = tree.dir("a/b/c");
        assert!(local(&discover_config_files(&sub)).is_empty());
    }

    #[test]
    fn closest_config_comes_first() {
        let tree = ConfigTree::new();
        let top = tree.config(".", "");
        let mid = tree.config("a/b", "");
        let leaf = tree.config("a/b/c/d", "");
        let cwd = tree.dir("a/b/c/d/e");

        let configs = discover_config_files(&cwd);
        assert_eq!(local(&configs), vec![&leaf, &mid, &top]);
    }

    #[test]
    fn config_in_cwd_is_found() {
        let tree = ConfigTree::new();
        let config = tree.config(".", "");
        assert_eq!(local(&discover_config_files(tree.path())), vec![&config]);
    }

    #[test]
    fn directory_named_like_config_is_skipped() {
        let tree = ConfigTree::new();
        fs::create_dir_all(tree.path().join(CONFIG_FILENAME)).unwrap();
        let sub = tree.dir("sub");
        assert!(local(&discover_config_files(&sub)).is_empty());
    }

    #[test]
    fn root_config_stops_discovery() {
        let tree = ConfigTree::new();
        tree.config(".", "");
        let root = tree.config("project", "root = true\n");
        let child = tree.config("project/sub", "");
        let cwd = tree.dir("project/sub/deep");

        // Neither the parent nor the global config is included.
        assert_eq!(discover_config_files(&cwd), vec![child, root]);
    }

    #[test]
    fn root_false_does_not_stop_discovery() {
        let tree = ConfigTree::new();
        let top = tree.config(".", "");
        let mid = tree.config("project", "root = false\n");
        let cwd = tree.dir("project/src");

        let configs = discover_config_files(&cwd);
        assert_eq!(local(&configs), vec![&mid, &top]);
    }

    #[test]
    fn global_path_uses_config_filename() {
        let global = global_config_path().unwrap();
        assert!(global.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&global));
        assert!(!is_global_config(Path::new("/elsewhere/.refidx.toml")));
    }
}
