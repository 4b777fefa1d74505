// src/report.rs
//! Plain-text rendering of a profile for copying into other tools.

use crate::types::{CandidateProfile, ContactInfo};

pub fn format_experience(years: f64) -> String {
    if years > 0.0 {
        format!("{years} years")
    } else {
        String::new()
    }
}

/// One `Label: value` line per non-empty contact field.
pub fn format_contact(contact: &ContactInfo) -> String {
    let mut lines = Vec::new();
    if !contact.email.is_empty() {
        lines.push(format!("Email: {}", contact.email));
    }
    if !contact.phone.is_empty() {
        lines.push(format!("Phone: {}", contact.phone));
    }
    if !contact.websites.is_empty() {
        lines.push(format!("Websites: {}", contact.websites.join(", ")));
    }
    lines.join("\n")
}

pub fn format_profile(profile: &CandidateProfile, source: Option<&str>) -> String {
    let mut text = String::from("CANDIDATE INFORMATION\n");
    text.push_str("====================\n\n");
    text.push_str(&format!("Name: {}\n", profile.name));
    text.push_str(&format!(
        "Experience: {}\n",
        format_experience(profile.total_years_experience)
    ));
    text.push_str(&format!("Tech Stack: {}\n", profile.tech_stack.join(", ")));
    text.push_str(&format!(
        "Contact Info:\n{}\n\n",
        format_contact(&profile.contact_info)
    ));
    text.push_str(&format!("Source: {}\n", source.unwrap_or_default()));
    text.push_str(&format!(
        "Extracted: {}\n",
        profile.extracted_at.format("%Y-%m-%dT%H:%M:%S%.3fZ")
    ));
    text
}
