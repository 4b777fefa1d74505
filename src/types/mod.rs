// src/types/mod.rs
pub mod profile;
pub mod response;

pub use profile::{CandidateProfile, ContactInfo, ProfileEdits};
pub use response::{ExtractionResponse, HealthResponse};
