// src/web/types.rs
use rocket::serde::{Deserialize, Serialize};

use crate::extraction::{ContactRegion, DocumentExtractor, PageExtractor, PageRequest};
use crate::types::{CandidateProfile, ProfileEdits};

/// Read-only state shared by every request; each request builds its own
/// profile.
pub struct AppState {
    pub page: PageExtractor,
    pub document: DocumentExtractor,
    /// Cap applied to edited tech stacks.
    pub skill_cap: usize,
}

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct PageExtractionRequest {
    pub html: String,
    pub source_url: Option<String>,
    #[serde(default)]
    pub contact_region_visible: bool,
}

impl PageExtractionRequest {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            source_url: self.source_url.clone(),
            contact_region: if self.contact_region_visible {
                ContactRegion::Visible
            } else {
                ContactRegion::Hidden
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct DocumentExtractionRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct MergeRequest {
    pub page: CandidateProfile,
    pub document: CandidateProfile,
}

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct EditRequest {
    pub profile: CandidateProfile,
    pub edits: ProfileEdits,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_code: error_code.into(),
        }
    }
}
