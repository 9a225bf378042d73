//! Shared fixtures for modkit-bundler integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use modkit_bundler::{ModkitConfig, ModuleBuilder};
use tempfile::TempDir;

/// A throwaway project directory.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(&path, content).expect("write file");
        self
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative))
            .unwrap_or_else(|e| panic!("read {relative}: {e}"))
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn builder(&self) -> ModuleBuilder {
        self.builder_with(ModkitConfig::default())
    }

    pub fn builder_with(&self, config: ModkitConfig) -> ModuleBuilder {
        ModuleBuilder::new(config, self.root())
    }
}

/// Two modules: `a` with an internal helper, `b` importing `a`.
pub fn two_module_project() -> Project {
    let project = Project::new();
    project
        .write(
            "modules/a/lib.js",
            r#"import { helper } from './helper.js';

export function greet(name) {
    return helper(name);
}
"#,
        )
        .write(
            "modules/a/helper.js",
            r#"export function helper(name) {
    return 'helper-marker ' + name;
}
"#,
        )
        .write(
            "modules/b/lib.js",
            r#"import { greet } from '../a/lib.js';

export function run() {
    return greet('b-marker');
}
"#,
        );
    project
}

/// Source map `sources` of a written bundle.
pub fn map_sources(map: &str) -> Vec<String> {
    let value: serde_json::Value = serde_json::from_str(map).expect("valid map json");
    value["sources"]
        .as_array()
        .expect("sources array")
        .iter()
        .map(|s| s.as_str().expect("string source").to_string())
        .collect()
}
