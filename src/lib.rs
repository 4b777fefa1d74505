//! Candidate profile extraction from rendered profile pages and resume text.
//!
//! Two pipelines produce the same [`CandidateProfile`]: [`PageExtractor`]
//! reads a parsed profile page, [`DocumentExtractor`] scans flat document
//! text. [`merge_profiles`] combines the two, preferring page values.

pub mod cli;
pub mod core;
pub mod errors;
pub mod extraction;
pub mod report;
pub mod types;
pub mod web;

pub use errors::ExtractError;
pub use extraction::{merge_profiles, DocumentExtractor, PageExtractor, PageRequest};
pub use types::{CandidateProfile, ContactInfo, ExtractionResponse, ProfileEdits};
pub use web::start_web_server;
