//! Source map relocation.
//!
//! Rolldown writes `sources` relative to the directory it believes the chunk
//! lives in. Bundles are renamed and moved when written, so every source is
//! re-anchored on the real output directory and the map's `file` is updated.

use std::path::{Component, Path};

use path_clean::PathClean;
use serde_json::Value;

const MAPPING_URL_PREFIX: &str = "//# sourceMappingURL=";

/// Rewrite `map` for a bundle written to `output_dir` as `file`.
///
/// Entries in `sources` are resolved against `generated_dir` (plus any
/// `sourceRoot`) and made relative to `output_dir`. Virtual sources such as
/// `rolldown:runtime` are kept verbatim.
pub fn relocate_map(
    map: &str,
    generated_dir: &Path,
    output_dir: &Path,
    file: &str,
) -> serde_json::Result<String> {
    let mut value: Value = serde_json::from_str(map)?;

    if let Some(object) = value.as_object_mut() {
        let source_root = match object.remove("sourceRoot") {
            Some(Value::String(root)) if !root.is_empty() => generated_dir.join(root),
            _ => generated_dir.to_path_buf(),
        };

        if let Some(Value::Array(sources)) = object.get_mut("sources") {
            for source in sources.iter_mut() {
                if let Value::String(path) = source {
                    if !is_virtual_source(path) {
                        *path = relative_source(path, &source_root, output_dir);
                    }
                }
            }
        }

        object.insert("file".to_string(), Value::String(file.to_string()));
    }

    serde_json::to_string(&value)
}

/// Replace any trailing `sourceMappingURL` comment in `code`.
///
/// With `map_name` set the comment is re-added pointing at it; otherwise the
/// code is left without one.
pub fn with_mapping_url(code: &str, map_name: Option<&str>) -> String {
    let trimmed = code.trim_end();
    let body = match trimmed.rfind('\n') {
        Some(idx) if trimmed[idx + 1..].starts_with(MAPPING_URL_PREFIX) => &trimmed[..idx],
        None if trimmed.starts_with(MAPPING_URL_PREFIX) => "",
        _ => trimmed,
    };

    match map_name {
        Some(name) => format!("{body}\n{MAPPING_URL_PREFIX}{name}\n"),
        None => format!("{body}\n"),
    }
}

fn is_virtual_source(source: &str) -> bool {
    if source.starts_with('\0') {
        return true;
    }
    // `scheme:rest` with no path separator before the colon.
    match source.find(':') {
        Some(idx) => !source[..idx].contains('/') && !Path::new(source).is_absolute(),
        None => false,
    }
}

fn relative_source(source: &str, source_root: &Path, output_dir: &Path) -> String {
    let absolute = source_root.join(source).clean();
    match pathdiff::diff_paths(&absolute, output_dir) {
        Some(relative) => to_slash(&relative),
        None => absolute.to_string_lossy().into_owned(),
    }
}

fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
