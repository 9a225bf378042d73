//! Bundle output: artifact extraction, source map relocation and writing.

pub mod artifact;
pub mod sourcemap;
pub mod writer;

use std::path::{Component, Path, PathBuf};

pub use artifact::BundleArtifact;
pub use writer::{WrittenArtifact, map_path_for, validate_output_path, write_artifact};

use crate::Result;

/// Output location of a module bundle.
///
/// Mirrors the input layout: `<build_root>/<module_dir>/<name>/<entry>`.
/// An absolute `module_dir` is mirrored without its root.
pub fn mirror_path(build_root: &Path, module_dir: &Path, name: &str, entry: &str) -> Result<PathBuf> {
    let relative: PathBuf = module_dir
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();

    validate_output_path(build_root, &relative.join(name).join(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn mirrors_module_dir_below_build_root() {
        let path = mirror_path(Path::new("/p/build"), Path::new("modules"), "a", "lib.js").unwrap();
        assert_eq!(path, Path::new("/p/build/modules/a/lib.js"));
    }

    #[test]
    fn nested_and_dotted_module_dirs() {
        let path = mirror_path(Path::new("/p/build"), Path::new("./src/modules/"), "a", "lib.js").unwrap();
        assert_eq!(path, Path::new("/p/build/src/modules/a/lib.js"));
    }

    #[test]
    fn absolute_module_dir_loses_its_root() {
        let path = mirror_path(Path::new("/p/build"), Path::new("/srv/mods"), "a", "lib.js").unwrap();
        assert_eq!(path, Path::new("/p/build/srv/mods/a/lib.js"));
    }

    #[test]
    fn escaping_module_dir_is_rejected() {
        let err = mirror_path(Path::new("/p/build"), Path::new("../../mods"), "a", "lib.js").unwrap_err();
        assert!(matches!(err, Error::InvalidOutputPath(_)));
    }
}
