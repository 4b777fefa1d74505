// src/core/mod.rs
//! Configuration, file access and document conversion

pub mod config_manager;
pub mod converter;
pub mod fs_ops;

pub use config_manager::{ConfigManager, ExtractorConfig, ServerConfig};
pub use converter::{extract_text, TextConverter};
pub use fs_ops::FsOps;
