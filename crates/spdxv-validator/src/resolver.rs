//! # Manifest Resolution
//!
//! Maps a cross-document element id to exactly one manifest file on the
//! search path. For `libfoo-1.2:SPDXRef-Package` and a directory `d`, the
//! candidates are, in order:
//!
//! ```text
//! d/libfoo-1.2.json   d/libfoo-1.2-spdx.json   d/libfoo-1.2.spdx.json
//! d/libfoo/libfoo-1.2.json   d/libfoo/libfoo-1.2-spdx.json   d/libfoo/libfoo-1.2.spdx.json
//! ```
//!
//! Matches are collected across every directory. More than one match is an
//! error, never a preference.

use std::path::{Path, PathBuf};

use spdxv_core::ElementId;

use crate::error::ValidationError;

/// File name suffixes tried for each `<package>-<version>` stem.
pub const MANIFEST_SUFFIXES: [&str; 3] = [".json", "-spdx.json", ".spdx.json"];

/// Locates referenced manifests on an ordered list of directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestResolver {
    search_dirs: Vec<PathBuf>,
}

impl ManifestResolver {
    /// Build a resolver. Directories naming the same place on disk
    /// (`deps` and `./deps`, or a symlink and its target) are kept once,
    /// first spelling wins; an empty list means the current directory.
    pub fn new(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut seen: Vec<PathBuf> = Vec::new();
        let mut search_dirs: Vec<PathBuf> = Vec::new();
        for dir in dirs {
            let key = dir.canonicalize().unwrap_or_else(|_| dir.clone());
            if !seen.contains(&key) {
                seen.push(key);
                search_dirs.push(dir);
            }
        }
        if search_dirs.is_empty() {
            search_dirs.push(PathBuf::from("."));
        }
        Self { search_dirs }
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Every path that could hold the manifest for `element`, in search
    /// order, whether or not it exists.
    pub fn candidates(&self, element: &ElementId) -> Vec<PathBuf> {
        let stem = element.document();
        let package = element.package_version().name;
        self.search_dirs
            .iter()
            .flat_map(|dir| {
                let nested = dir.join(&package);
                [dir.clone(), nested]
            })
            .flat_map(|base| {
                MANIFEST_SUFFIXES
                    .iter()
                    .map(move |suffix| base.join(format!("{stem}{suffix}")))
            })
            .collect()
    }

    /// Candidates that exist as regular files.
    pub fn matches(&self, element: &ElementId) -> Vec<PathBuf> {
        self.candidates(element)
            .into_iter()
            .filter(|p| is_file(p))
            .collect()
    }

    /// Resolve `element` to its single manifest file.
    ///
    /// # Errors
    ///
    /// `ManifestNotFound` when no candidate exists, `AmbiguousManifest` when
    /// more than one does.
    pub fn resolve(&self, element: &ElementId) -> Result<PathBuf, ValidationError> {
        let mut found = self.matches(element);
        match found.len() {
            0 => Err(ValidationError::ManifestNotFound {
                element_id: element.to_string(),
                search_dirs: self.search_dirs.clone(),
            }),
            1 => {
                let path = found.remove(0);
                tracing::debug!(element = %element, file = %path.display(), "resolved manifest");
                Ok(path)
            }
            count => {
                tracing::warn!(element = %element, count, "more than one manifest matches");
                Err(ValidationError::AmbiguousManifest {
                    element_id: element.to_string(),
                    count,
                    candidates: found,
                })
            }
        }
    }
}

impl Default for ManifestResolver {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}
