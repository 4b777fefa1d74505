// src/types/response.rs
use serde::{Deserialize, Serialize};

use crate::types::profile::CandidateProfile;

/// Envelope returned by every extraction entry point.
///
/// `data` is always present; on failure it is the all-default profile and
/// `error` carries the reason. Per-field faults that were absorbed by the
/// orchestrator are listed in `warnings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub success: bool,
    pub data: CandidateProfile,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ExtractionResponse {
    pub fn success(data: CandidateProfile) -> Self {
        Self {
            success: true,
            data,
            error: None,
            warnings: Vec::new(),
        }
    }

    pub fn failure(data: CandidateProfile, reason: impl Into<String>) -> Self {
        Self {
            success: false,
            data,
            error: Some(reason.into()),
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
