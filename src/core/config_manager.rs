// src/core/config_manager.rs
//! Configuration loading: defaults, then `config.yaml`, then environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::extraction::skills::{KeywordMatch, KeywordVocabulary};
use crate::extraction::{DocumentExtractor, PageExtractor};

const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Extraction settings shared by the page and document pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Links on this domain are internal; pages off it are refused.
    pub site_domain: String,
    /// Headings containing this token are site chrome, not a person's name.
    pub brand_token: String,
    pub page_skill_cap: usize,
    pub document_skill_cap: usize,
    pub keywords: KeywordVocabulary,
    pub keyword_match: KeywordMatch,
    pub wait_timeout_ms: u64,
    pub wait_poll_ms: u64,
}

impl ExtractorConfig {
    /// The keyword table with the configured matching mode applied.
    pub fn vocabulary(&self) -> KeywordVocabulary {
        self.keywords.clone().with_matching(self.keyword_match)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            site_domain: "linkedin.com".to_string(),
            brand_token: "LinkedIn".to_string(),
            page_skill_cap: 20,
            document_skill_cap: 15,
            keywords: KeywordVocabulary::default(),
            keyword_match: KeywordMatch::Substring,
            wait_timeout_ms: 5000,
            wait_poll_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// JSON logs go here when set; otherwise plain logs go to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            log_file: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnvironmentSection {
    extractor: ExtractorConfig,
    server: ServerConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: EnvironmentSection,
    production: EnvironmentSection,
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub extractor: ExtractorConfig,
    pub server: ServerConfig,
}

impl ConfigManager {
    /// Load configuration for the current environment.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let config_path = std::env::var("PROFILE_EXTRACTOR_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        let path = config_path.exists().then_some(config_path.as_path());

        let mut config = Self::load_from(path, &environment)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("PROFILE_EXTRACTOR_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Built-in defaults, overlaid with the `environment` section of the YAML
    /// file at `path` when one is given.
    pub fn load_from(path: Option<&Path>, environment: &str) -> Result<Self> {
        let section = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let file: ConfigFile = serde_yaml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                info!("Loaded configuration file {}", path.display());
                match environment {
                    "production" => file.production,
                    _ => file.local,
                }
            }
            None => {
                debug!("No configuration file, using defaults");
                EnvironmentSection::default()
            }
        };

        Ok(Self {
            environment: environment.to_string(),
            extractor: section.extractor,
            server: section.server,
        })
    }

    /// Apply `PROFILE_EXTRACTOR_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PROFILE_EXTRACTOR_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PROFILE_EXTRACTOR_PORT must be a port number, got {port:?}"))?;
        }
        if let Some(domain) = lookup("PROFILE_EXTRACTOR_SITE_DOMAIN") {
            let domain = domain.trim();
            if domain.is_empty() {
                anyhow::bail!("PROFILE_EXTRACTOR_SITE_DOMAIN must not be empty");
            }
            self.extractor.site_domain = domain.to_string();
        }
        Ok(())
    }

    pub fn page_extractor(&self) -> PageExtractor {
        PageExtractor::new(&self.extractor)
    }

    pub fn document_extractor(&self) -> DocumentExtractor {
        DocumentExtractor::new(
            self.extractor.vocabulary(),
            self.extractor.document_skill_cap,
        )
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.extractor.wait_timeout_ms)
    }

    pub fn wait_poll(&self) -> Duration {
        Duration::from_millis(self.extractor.wait_poll_ms)
    }
}
