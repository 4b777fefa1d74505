// src/extraction/page.rs
//! Page pipeline: runs the field extractors over one parsed profile page.
//!
//! Fields are independent. Each runs behind its own fault boundary, so an
//! error or panic in one leaves the others intact and only costs that field
//! its default value.

use std::panic::{self, AssertUnwindSafe};

use anyhow::Result;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::core::config_manager::ExtractorConfig;
use crate::extraction::contact::{belongs_to, extract_contact, ContactRegion};
use crate::extraction::duration::DurationAggregator;
use crate::extraction::locator::{locate_entries, outermost, rendered_text, SectionSearch};
use crate::extraction::name::extract_name;
use crate::extraction::selectors::LocatorTables;
use crate::extraction::skills::{extract_skills, KeywordVocabulary};
use crate::types::{CandidateProfile, ContactInfo, ExtractionResponse};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageRequest {
    /// Address the HTML was captured from, when known.
    pub source_url: Option<String>,
    #[serde(default)]
    pub contact_region: ContactRegion,
}

#[derive(Debug, Clone)]
pub struct PageExtractor {
    site_domain: String,
    brand_token: String,
    vocabulary: KeywordVocabulary,
    skill_cap: usize,
    aggregator: DurationAggregator,
    tables: LocatorTables,
}

impl PageExtractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            site_domain: config.site_domain.clone(),
            brand_token: config.brand_token.clone(),
            vocabulary: config.vocabulary(),
            skill_cap: config.page_skill_cap,
            aggregator: DurationAggregator::new(),
            tables: LocatorTables::default(),
        }
    }

    pub fn with_tables(mut self, tables: LocatorTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_aggregator(mut self, aggregator: DurationAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn site_domain(&self) -> &str {
        &self.site_domain
    }

    pub fn extract(&self, html: &str, request: &PageRequest) -> ExtractionResponse {
        self.extract_at(html, request, Utc::now())
    }

    pub fn extract_at(
        &self,
        html: &str,
        request: &PageRequest,
        extracted_at: DateTime<Utc>,
    ) -> ExtractionResponse {
        if let Some(source_url) = &request.source_url {
            if !self.is_site_page(source_url) {
                warn!("Refusing to extract from {}", source_url);
                return ExtractionResponse::failure(
                    CandidateProfile::empty(extracted_at),
                    format!("not a profile page on {}", self.site_domain),
                );
            }
        }

        let document = Html::parse_document(html);
        let root = document.root_element();
        let mut warnings = Vec::new();

        let name = isolate("name", &mut warnings, || {
            extract_name(root, self.tables.name, &self.brand_token)
        });
        let total_years_experience = isolate("experience", &mut warnings, || {
            experience_years(root, self.tables.experience, &self.aggregator)
        });
        let tech_stack = isolate("skills", &mut warnings, || {
            extract_skills(
                root,
                self.tables.skills,
                self.tables.about,
                &self.vocabulary,
                self.skill_cap,
            )
        });
        let contact_info: ContactInfo = isolate("contact", &mut warnings, || {
            extract_contact(root, &self.tables, &self.site_domain, request.contact_region)
        });

        let profile = CandidateProfile {
            name,
            total_years_experience,
            tech_stack,
            contact_info,
            extracted_at,
        };

        info!(
            "Extracted profile: name={:?}, {} years, {} skills, {} field warnings",
            profile.name,
            profile.total_years_experience,
            profile.tech_stack.len(),
            warnings.len()
        );

        ExtractionResponse::success(profile).with_warnings(warnings)
    }

    fn is_site_page(&self, source_url: &str) -> bool {
        Url::parse(source_url)
            .ok()
            .and_then(|url| url.host_str().map(|host| belongs_to(host, &self.site_domain)))
            .unwrap_or(false)
    }
}

/// Total years across experience fragments found via the two-tier search.
pub fn experience_years(
    root: ElementRef<'_>,
    search: &SectionSearch,
    aggregator: &DurationAggregator,
) -> Result<f64> {
    let hits = locate_entries(root, search)?;
    let fragments: Vec<String> = outermost(hits.entries)
        .into_iter()
        .map(rendered_text)
        .collect();

    let years = aggregator.total_years(&fragments);
    info!(
        "Total experience: {} years from {} fragments ({:?})",
        years,
        fragments.len(),
        hits.scope
    );
    Ok(years)
}

/// Run one field extractor; any error or panic becomes the field's default
/// plus a warning.
fn isolate<T, F>(field: &str, warnings: &mut Vec<String>, extract: F) -> T
where
    T: Default,
    F: FnOnce() -> Result<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(extract)) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            warn!("Extracting {} failed: {:#}", field, e);
            warnings.push(format!("{field}: {e:#}"));
            T::default()
        }
        Err(_) => {
            warn!("Extracting {} panicked", field);
            warnings.push(format!("{field}: extractor panicked"));
            T::default()
        }
    }
}
