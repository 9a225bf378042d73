use std::path::Path;

use rolldown::BundleOutput;
use rolldown_common::Output;

use super::sourcemap::{relocate_map, with_mapping_url};
use crate::{Error, Result};

/// Code and source map of one module bundle, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleArtifact {
    pub code: String,
    pub map: Option<String>,
    /// Filename Rolldown chose for the chunk, relative to its `dir` option.
    pub chunk_filename: String,
}

impl BundleArtifact {
    /// Pick the entry chunk and its map out of a Rolldown result.
    pub fn from_output(module: &str, output: &BundleOutput) -> Result<Self> {
        let mut entry = None;
        let mut extra_chunks = 0usize;

        for item in &output.assets {
            if let Output::Chunk(chunk) = item {
                if chunk.is_entry && entry.is_none() {
                    entry = Some(chunk);
                } else {
                    extra_chunks += 1;
                }
            }
        }

        let chunk = entry.ok_or_else(|| Error::MissingOutput {
            module: module.to_string(),
        })?;

        if extra_chunks > 0 {
            tracing::warn!(module, extra_chunks, "ignoring chunks other than the entry");
        }

        let map_filename = chunk
            .sourcemap_filename
            .clone()
            .unwrap_or_else(|| format!("{}.map", chunk.filename));

        let map = output.assets.iter().find_map(|item| match item {
            Output::Asset(asset) if asset.filename.as_str() == map_filename => {
                Some(String::from_utf8_lossy(asset.source.as_bytes()).into_owned())
            }
            _ => None,
        });

        Ok(Self {
            code: chunk.code.clone(),
            map,
            chunk_filename: chunk.filename.to_string(),
        })
    }

    /// Retarget the artifact at `output_file`.
    ///
    /// `generated_dir` is the `dir` option Rolldown bundled with.
    pub fn relocate(self, module: &str, generated_dir: &Path, output_file: &Path) -> Result<Self> {
        let output_dir = output_file.parent().unwrap_or(Path::new(""));
        let file_name = output_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.chunk_filename.clone());
        let map_name = format!("{file_name}.map");

        let chunk_dir = match Path::new(&self.chunk_filename).parent() {
            Some(parent) => generated_dir.join(parent),
            None => generated_dir.to_path_buf(),
        };

        let map = match &self.map {
            Some(map) => Some(
                relocate_map(map, &chunk_dir, output_dir, &file_name).map_err(|source| {
                    Error::SourceMap {
                        module: module.to_string(),
                        source,
                    }
                })?,
            ),
            None => None,
        };

        let code = with_mapping_url(&self.code, map.as_ref().map(|_| map_name.as_str()));

        Ok(Self {
            code,
            map,
            chunk_filename: self.chunk_filename,
        })
    }

    /// Size of the emitted code in bytes.
    pub fn size(&self) -> u64 {
        self.code.len() as u64
    }
}
