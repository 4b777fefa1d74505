// src/extraction/merge.rs
//! Display-time combination of a page profile and a document profile.

use crate::types::{CandidateProfile, ContactInfo};

/// Field by field: the page value when non-empty, else the document value.
/// Neither input is modified.
pub fn merge_profiles(page: &CandidateProfile, document: &CandidateProfile) -> CandidateProfile {
    CandidateProfile {
        name: prefer_text(&page.name, &document.name),
        total_years_experience: if page.total_years_experience > 0.0 {
            page.total_years_experience
        } else {
            document.total_years_experience.max(0.0)
        },
        tech_stack: prefer_list(&page.tech_stack, &document.tech_stack),
        contact_info: ContactInfo {
            email: prefer_text(&page.contact_info.email, &document.contact_info.email),
            phone: prefer_text(&page.contact_info.phone, &document.contact_info.phone),
            websites: prefer_list(&page.contact_info.websites, &document.contact_info.websites),
        },
        extracted_at: page.extracted_at,
    }
}

fn prefer_text(primary: &str, fallback: &str) -> String {
    if primary.is_empty() {
        fallback.to_string()
    } else {
        primary.to_string()
    }
}

fn prefer_list(primary: &[String], fallback: &[String]) -> Vec<String> {
    if primary.is_empty() {
        fallback.to_vec()
    } else {
        primary.to_vec()
    }
}
