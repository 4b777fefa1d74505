// src/core/fs_ops.rs
//! Async file reading with path context on errors

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

pub struct FsOps;

impl FsOps {
    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Lower-cased extension, if any.
    pub fn get_extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }
}
