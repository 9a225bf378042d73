//! Module-boundary classification of import references.
//!
//! Decides whether an import seen while bundling one module is inlined into
//! that module's bundle or left as a live import. The decision is pure path
//! arithmetic: the import is joined onto the importer's directory and the
//! first segment below the module root is compared. Nothing is checked on
//! disk, so a missing file inside the same module is still `Internal` and
//! fails later as a bundler resolution error.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Verdict for one `(specifier, importer)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportClass {
    /// An `http://` or `https://` URL. Never inlined.
    Network,
    /// Resolves into a different module, or out of the module root.
    CrossModule,
    /// Resolves inside the importer's own module.
    Internal,
}

impl ImportClass {
    /// External references stay as import statements in the emitted bundle.
    pub fn is_external(self) -> bool {
        !matches!(self, ImportClass::Internal)
    }
}

/// Where a path sits relative to the module root.
#[derive(Debug, PartialEq, Eq)]
enum Placement<'a> {
    Module(&'a OsStr),
    Root,
    Outside,
}

/// Classifier bound to one module root.
#[derive(Debug, Clone)]
pub struct ModuleBoundary {
    root: PathBuf,
    cwd: PathBuf,
}

impl ModuleBoundary {
    /// `root` may be relative; it is resolved against `cwd`.
    pub fn new(root: impl AsRef<Path>, cwd: impl AsRef<Path>) -> Self {
        let cwd = cwd.as_ref().to_path_buf().clean();
        let root = absolutize(root.as_ref(), &cwd);
        Self { root, cwd }
    }

    /// Absolute, normalized module root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Classify `specifier` imported from `importer`.
    pub fn classify(&self, specifier: &str, importer: impl AsRef<Path>) -> ImportClass {
        if is_network_specifier(specifier) {
            return ImportClass::Network;
        }

        let importer = absolutize(importer.as_ref(), &self.cwd);
        let target = self.resolve_target(specifier, &importer);

        if self.placement(&target) == self.placement(&importer) {
            ImportClass::Internal
        } else {
            ImportClass::CrossModule
        }
    }

    /// Shorthand for `classify(..).is_external()`.
    pub fn is_external(&self, specifier: &str, importer: impl AsRef<Path>) -> bool {
        self.classify(specifier, importer).is_external()
    }

    /// Candidate path `specifier` would resolve to from `importer`.
    pub fn resolve_target(&self, specifier: &str, importer: impl AsRef<Path>) -> PathBuf {
        join_specifier(&absolutize(importer.as_ref(), &self.cwd), specifier)
    }

    /// Name of the module containing `path`, if it is inside one.
    pub fn module_name(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = absolutize(path.as_ref(), &self.cwd);
        match self.placement(&path) {
            Placement::Module(name) => Some(name.to_string_lossy().into_owned()),
            Placement::Root | Placement::Outside => None,
        }
    }

    fn placement<'a>(&self, path: &'a Path) -> Placement<'a> {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return Placement::Outside;
        };

        match relative.components().next() {
            Some(Component::Normal(name)) => Placement::Module(name),
            None => Placement::Root,
            // Cleaned paths carry no `.`/`..` below the prefix.
            Some(_) => Placement::Outside,
        }
    }
}

/// `true` for specifiers matching `^https?://`.
pub fn is_network_specifier(specifier: &str) -> bool {
    specifier.starts_with("http://") || specifier.starts_with("https://")
}

fn join_specifier(importer: &Path, specifier: &str) -> PathBuf {
    let dir = importer.parent().unwrap_or(importer);
    dir.join(specifier).clean()
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        cwd.join(path).clean()
    }
}
