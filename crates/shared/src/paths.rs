//! File path utilities for export files.
//!
//! Centralizes the naming of the CSV files produced for ratings and lists.

use crate::models::{Language, ListId, UserId};
use std::path::{Path, PathBuf};

/// File path manager for export files
#[derive(Debug, Clone)]
pub struct ExportPaths {
    root: PathBuf,
}

impl ExportPaths {
    /// Create a new ExportPaths rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the output directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ratings export: `filmAffinity_{lang}_{user}.csv`
    pub fn ratings_file(&self, user_id: &UserId, lang: Language) -> PathBuf {
        self.root
            .join(format!("filmAffinity_{}_{}.csv", lang, user_id))
    }

    /// Single list export: `filmAffinity_{lang}_{user}_list_{list}.csv`
    pub fn list_file(&self, user_id: &UserId, list_id: &ListId, lang: Language) -> PathBuf {
        self.named_list_file(user_id, list_id.as_str(), lang)
    }

    /// List export keyed by an already-sanitized list name
    pub fn named_list_file(&self, user_id: &UserId, name: &str, lang: Language) -> PathBuf {
        self.root
            .join(format!("filmAffinity_{}_{}_list_{}.csv", lang, user_id, name))
    }

    /// Create the output directory if needed
    pub fn create_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }
}
