//! Module discovery.
//!
//! A module is any immediate subdirectory of the module root that holds the
//! entry file. Hidden directories are skipped.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::Result;

/// A discovered module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    /// Directory name under the module root.
    pub name: String,
    /// Module directory.
    pub dir: PathBuf,
    /// Entry file inside `dir`.
    pub entry: PathBuf,
}

/// List the modules under `root`, sorted by name.
///
/// A missing root yields an empty list. Children that cannot be read, such as
/// dangling symlinks, are logged and skipped.
pub fn discover_modules(root: &Path, entry_name: &str) -> Result<Vec<ModuleEntry>> {
    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "module directory does not exist");
        return Ok(Vec::new());
    }

    let mut modules = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for dent in walker {
        let dent = match dent {
            Ok(dent) => dent,
            Err(err) => {
                let path = err.path().map(|p| p.display().to_string()).unwrap_or_default();
                tracing::warn!(%path, error = %err, "skipping unreadable module directory");
                continue;
            }
        };
        if !dent.file_type().is_dir() {
            continue;
        }

        let Some(name) = dent.file_name().to_str() else {
            tracing::warn!(path = %dent.path().display(), "skipping non UTF-8 module name");
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let entry = dent.path().join(entry_name);
        if !entry.is_file() {
            tracing::trace!(module = name, "no entry file, skipping");
            continue;
        }

        modules.push(ModuleEntry {
            name: name.to_string(),
            dir: dent.path().to_path_buf(),
            entry,
        });
    }

    tracing::debug!(count = modules.len(), root = %root.display(), "discovered modules");
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export {};\n").unwrap();
    }

    #[test]
    fn finds_modules_with_entry_sorted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("modules");
        touch(&root.join("zeta/lib.js"));
        touch(&root.join("alpha/lib.js"));
        touch(&root.join("beta/other.js"));

        let modules = discover_modules(&root, "lib.js").unwrap();
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["alpha", "zeta"]);
        assert_eq!(modules[0].entry, root.join("alpha/lib.js"));
        assert_eq!(modules[0].dir, root.join("alpha"));
    }

    #[test]
    fn ignores_nested_and_top_level_entries() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("modules");
        touch(&root.join("lib.js"));
        touch(&root.join("a/nested/lib.js"));

        assert!(discover_modules(&root, "lib.js").unwrap().is_empty());
    }

    #[test]
    fn skips_hidden_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("modules");
        touch(&root.join(".cache/lib.js"));
        touch(&root.join("a/lib.js"));

        let modules = discover_modules(&root, "lib.js").unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "a");
    }

    #[test]
    fn entry_name_is_configurable() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("a/index.mjs"));
        touch(&root.join("b/lib.js"));

        let modules = discover_modules(root, "index.mjs").unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "a");
    }

    #[test]
    fn missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let modules = discover_modules(&temp.path().join("nope"), "lib.js").unwrap();
        assert!(modules.is_empty());
    }

    #[test]
    fn entry_directory_is_not_a_module() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a/lib.js")).unwrap();
        assert!(discover_modules(temp.path(), "lib.js").unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlinks_are_skipped() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("modules");
        touch(&root.join("a/lib.js"));
        touch(&root.join("b/lib.js"));
        std::os::unix::fs::symlink(temp.path().join("nowhere"), root.join("dangling")).unwrap();

        let modules = discover_modules(&root, "lib.js").unwrap();
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_module_directories_are_followed() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("modules");
        touch(&temp.path().join("shared/c/lib.js"));
        fs::create_dir_all(&root).unwrap();
        std::os::unix::fs::symlink(temp.path().join("shared/c"), root.join("c")).unwrap();

        let modules = discover_modules(&root, "lib.js").unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "c");
    }
}
