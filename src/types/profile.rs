// src/types/profile.rs
//! Candidate record shared by the page and document pipelines

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extraction::normalize::{normalize_list, round_one_decimal};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub websites: Vec<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.phone.is_empty() && self.websites.is_empty()
    }
}

/// One extraction result. Built fresh per request and handed out by value;
/// corrections go through [`ProfileEdits`] into a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub name: String,
    pub total_years_experience: f64,
    pub tech_stack: Vec<String>,
    pub contact_info: ContactInfo,
    pub extracted_at: DateTime<Utc>,
}

impl CandidateProfile {
    pub fn empty(extracted_at: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            total_years_experience: 0.0,
            tech_stack: Vec::new(),
            contact_info: ContactInfo::default(),
            extracted_at,
        }
    }

    /// True when no field carries data (the timestamp does not count).
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.total_years_experience == 0.0
            && self.tech_stack.is_empty()
            && self.contact_info.is_empty()
    }
}

/// Manual corrections layered over an extracted profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEdits {
    pub name: Option<String>,
    pub total_years_experience: Option<f64>,
    pub tech_stack: Option<Vec<String>>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub websites: Option<Vec<String>>,
}

impl ProfileEdits {
    /// Produce the edited record. `base` is left untouched.
    pub fn apply(&self, base: &CandidateProfile, skill_cap: usize) -> CandidateProfile {
        let mut edited = base.clone();

        if let Some(name) = &self.name {
            edited.name = name.trim().to_string();
        }
        if let Some(years) = self.total_years_experience {
            edited.total_years_experience = round_one_decimal(years.max(0.0));
        }
        if let Some(skills) = &self.tech_stack {
            edited.tech_stack = normalize_list(skills, Some(skill_cap));
        }
        if let Some(email) = &self.email {
            edited.contact_info.email = email.trim().to_string();
        }
        if let Some(phone) = &self.phone {
            edited.contact_info.phone = phone.trim().to_string();
        }
        if let Some(websites) = &self.websites {
            edited.contact_info.websites = normalize_list(websites, None);
        }

        edited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> CandidateProfile {
        CandidateProfile {
            name: "Alice Martin".to_string(),
            total_years_experience: 4.5,
            tech_stack: vec!["Rust".to_string(), "Go".to_string()],
            contact_info: ContactInfo {
                email: "alice@example.com".to_string(),
                phone: String::new(),
                websites: vec!["https://alice.dev".to_string()],
            },
            extracted_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_profile_has_defaults() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let profile = CandidateProfile::empty(at);
        assert!(profile.is_empty());
        assert_eq!(profile.name, "");
        assert_eq!(profile.total_years_experience, 0.0);
        assert_eq!(profile.extracted_at, at);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["totalYearsExperience"], 4.5);
        assert_eq!(json["techStack"][0], "Rust");
        assert_eq!(json["contactInfo"]["email"], "alice@example.com");
        assert!(json.get("extractedAt").is_some());
    }

    #[test]
    fn test_edits_produce_new_record() {
        let base = sample();
        let edits = ProfileEdits {
            name: Some("  Alice M. ".to_string()),
            total_years_experience: Some(-3.0),
            tech_stack: Some(vec![
                "Rust".to_string(),
                " Rust ".to_string(),
                "Kafka".to_string(),
            ]),
            ..Default::default()
        };

        let edited = edits.apply(&base, 20);

        assert_eq!(edited.name, "Alice M.");
        assert_eq!(edited.total_years_experience, 0.0);
        assert_eq!(edited.tech_stack, vec!["Rust", "Kafka"]);
        assert_eq!(edited.contact_info.email, "alice@example.com");
        assert_eq!(base, sample());
    }
}
