// src/extraction/document.rs
//! Pattern-based extraction from flat résumé text.
//!
//! There is no structure to lean on here, so everything is regular
//! expressions and lower precision than the page pipeline. Callers treat the
//! result as a supplement to a page extraction.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::extraction::normalize::{clean_text, UniqueList};
use crate::extraction::skills::{scan_keywords, KeywordVocabulary};
use crate::types::{CandidateProfile, ContactInfo, ExtractionResponse};

/// How many non-empty leading lines are considered for the name.
const NAME_SEARCH_LINES: usize = 5;

const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

const COMMON_TLDS: &[&str] = &[
    "com", "org", "net", "io", "dev", "co", "me", "app", "ai", "info", "tech", "site", "xyz",
    "page", "blog", "biz", "edu", "gov", "us", "uk", "de", "fr", "ca", "eu", "in", "ch", "nl",
];

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-zA-Z'’\-]+(?: [A-Z][a-zA-Z'’\-]+)+$").expect("valid name pattern")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid email pattern")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s\-]?)?(?:\(\d{1,4}\)[\s\-]?)?\d{2,4}(?:[\s\-]?\d{2,5}){1,4}")
        .expect("valid phone pattern")
});

static WEBSITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:https?://)?(?:www\.)?[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9\-]*[a-z0-9])?)*\.[a-z]{2,}(?:/[^\s,;<>"'()]*)?"#,
    )
    .expect("valid website pattern")
});

/// First line near the top that reads like "First Last".
pub fn find_name(text: &str) -> Option<String> {
    text.lines()
        .map(clean_text)
        .filter(|line| !line.is_empty())
        .take(NAME_SEARCH_LINES)
        .find(|line| NAME_RE.is_match(line))
}

pub fn find_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First phone-like match with 10 to 15 digits. The literal as written is
/// returned, separators included.
pub fn find_phone(text: &str) -> Option<String> {
    PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| is_valid_phone(candidate))
        .map(str::to_string)
}

pub fn is_valid_phone(candidate: &str) -> bool {
    let digits = candidate.chars().filter(char::is_ascii_digit).count();
    PHONE_DIGITS.contains(&digits)
}

/// Domain-like tokens with or without a scheme. Email addresses are removed
/// first so their domains are not reported as websites.
pub fn find_websites(text: &str) -> Vec<String> {
    let without_emails = EMAIL_RE.replace_all(text, " ");
    let mut websites = UniqueList::new(None);

    for m in WEBSITE_RE.find_iter(&without_emails) {
        let candidate = m.as_str().trim_end_matches(['.', ':', '!', '?']);
        if is_plausible_website(candidate) {
            websites.push(candidate);
        }
    }

    websites.into_vec()
}

fn is_plausible_website(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.") {
        return true;
    }
    let host = lower.split('/').next().unwrap_or_default();
    host.rsplit('.')
        .next()
        .is_some_and(|tld| COMMON_TLDS.contains(&tld))
}

#[derive(Debug, Clone)]
pub struct DocumentExtractor {
    vocabulary: KeywordVocabulary,
    skill_cap: usize,
}

impl DocumentExtractor {
    pub fn new(vocabulary: KeywordVocabulary, skill_cap: usize) -> Self {
        Self {
            vocabulary,
            skill_cap,
        }
    }

    pub fn extract(&self, text: &str) -> ExtractionResponse {
        self.extract_at(text, Utc::now())
    }

    pub fn extract_at(&self, text: &str, extracted_at: DateTime<Utc>) -> ExtractionResponse {
        if text.trim().is_empty() {
            warn!("Document text is empty, returning default profile");
            return ExtractionResponse::success(CandidateProfile::empty(extracted_at))
                .with_warnings(vec!["document text is empty".to_string()]);
        }

        ExtractionResponse::success(self.profile_at(text, extracted_at))
    }

    /// Partial profile from document text. Experience is not derived from
    /// documents and stays at zero.
    pub fn profile_at(&self, text: &str, extracted_at: DateTime<Utc>) -> CandidateProfile {
        debug!("Scanning {} characters of document text", text.len());

        let profile = CandidateProfile {
            name: find_name(text).unwrap_or_default(),
            total_years_experience: 0.0,
            tech_stack: scan_keywords(text, &self.vocabulary, self.skill_cap),
            contact_info: ContactInfo {
                email: find_email(text).unwrap_or_default(),
                phone: find_phone(text).unwrap_or_default(),
                websites: find_websites(text),
            },
            extracted_at,
        };

        info!(
            "Document extraction: name={:?}, {} skills, email={}, phone={}, {} websites",
            profile.name,
            profile.tech_stack.len(),
            !profile.contact_info.email.is_empty(),
            !profile.contact_info.phone.is_empty(),
            profile.contact_info.websites.len()
        );

        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RESUME: &str = "\
Jane Doe
Senior Backend Engineer
Contact me at jane.doe@example.com or +1 (555) 123-4567.
Portfolio: https://janedoe.dev/projects, github.com/janedoe

Summary
Worked with Python, Docker and Kubernetes from 2016 - 2024. Built Node.js services.
";

    fn extractor() -> DocumentExtractor {
        DocumentExtractor::new(KeywordVocabulary::default(), 15)
    }

    #[test]
    fn test_find_name_from_leading_lines() {
        assert_eq!(find_name(RESUME).as_deref(), Some("Jane Doe"));
        assert_eq!(
            find_name("\n\n  Jean-Luc   O'Neil \nEngineer").as_deref(),
            Some("Jean-Luc O'Neil")
        );
        assert_eq!(find_name("resume\nno capitals here"), None);
    }

    #[test]
    fn test_find_name_keeps_every_capitalized_word() {
        assert_eq!(
            find_name("Maria Del Carmen Garcia Lopez\nData Engineer").as_deref(),
            Some("Maria Del Carmen Garcia Lopez")
        );
        assert_eq!(find_name("Madonna\nSinger"), None);
    }

    #[test]
    fn test_email_embedded_in_sentence() {
        let text = "Please reach out to jane.doe@example.com. Thanks!";
        assert_eq!(find_email(text).as_deref(), Some("jane.doe@example.com"));
    }

    #[test]
    fn test_phone_keeps_literal_form() {
        assert_eq!(find_phone(RESUME).as_deref(), Some("+1 (555) 123-4567"));
        assert_eq!(find_phone("call 555-123-4567 today").as_deref(), Some("555-123-4567"));
        assert_eq!(find_phone("+44 20 7946 0958").as_deref(), Some("+44 20 7946 0958"));
    }

    #[test]
    fn test_short_numbers_are_not_phones() {
        assert_eq!(find_phone("from 2016 - 2024, team of 12"), None);
        assert!(!is_valid_phone("123-4567"));
        assert!(is_valid_phone("(555) 123-4567"));
    }

    #[test]
    fn test_websites_skip_email_domains_and_dotted_names() {
        let websites = find_websites(RESUME);
        assert_eq!(
            websites,
            vec!["https://janedoe.dev/projects", "github.com/janedoe"]
        );
    }

    #[test]
    fn test_full_document_profile() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let response = extractor().extract_at(RESUME, at);
        assert!(response.success);

        let profile = response.data;
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.total_years_experience, 0.0);
        assert_eq!(profile.contact_info.email, "jane.doe@example.com");
        assert_eq!(profile.contact_info.phone, "+1 (555) 123-4567");
        assert_eq!(
            profile.tech_stack,
            vec!["python", "node.js", "docker", "kubernetes", "git", "github"]
        );
        assert_eq!(profile.extracted_at, at);
    }

    #[test]
    fn test_empty_text_gives_default_profile() {
        let response = extractor().extract("   \n ");
        assert!(response.success);
        assert!(response.data.is_empty());
        assert_eq!(response.warnings, vec!["document text is empty"]);
    }

    #[test]
    fn test_skill_cap_is_fifteen() {
        let text = crate::extraction::skills::DEFAULT_KEYWORDS.join(", ");
        let profile = extractor().profile_at(&text, Utc::now());
        assert_eq!(profile.tech_stack.len(), 15);
    }
}
