// src/extraction/skills.rs
//! Skill collection: structural skill entries first, then a keyword scan of
//! free text against a configurable vocabulary.

use anyhow::Result;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::extraction::locator::{
    first_element, locate_entries, rendered_text, Locator, SearchScope, SectionSearch,
};
use crate::extraction::normalize::UniqueList;

pub const DEFAULT_KEYWORDS: &[&str] = &[
    "javascript", "python", "java", "react", "angular", "vue", "node.js", "express",
    "mongodb", "mysql", "postgresql", "aws", "azure", "docker", "kubernetes",
    "git", "github", "gitlab", "jenkins", "ci/cd", "agile", "scrum",
    "html", "css", "sass", "less", "typescript", "php", "ruby", "go",
    "c++", "c#", ".net", "spring", "django", "flask", "laravel", "rails",
    "machine learning", "ai", "data science", "sql", "nosql", "redis",
];

/// How a keyword must appear in the scanned text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMatch {
    /// Plain substring membership: "react" matches inside "ReactJS".
    #[default]
    Substring,
    /// The keyword must not be glued to surrounding letters or digits.
    WholeWord,
}

impl KeywordMatch {
    fn matches(self, haystack: &str, term: &str) -> bool {
        if term.is_empty() {
            return false;
        }
        match self {
            KeywordMatch::Substring => haystack.contains(term),
            KeywordMatch::WholeWord => contains_whole_word(haystack, term),
        }
    }
}

/// Flat keyword table. Entries are stored lower-cased, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordVocabulary {
    keywords: Vec<String>,
    matching: KeywordMatch,
}

impl Default for KeywordVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl From<Vec<String>> for KeywordVocabulary {
    fn from(keywords: Vec<String>) -> Self {
        Self::new(keywords)
    }
}

impl From<KeywordVocabulary> for Vec<String> {
    fn from(vocabulary: KeywordVocabulary) -> Self {
        vocabulary.keywords
    }
}

impl KeywordVocabulary {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = UniqueList::new(None);
        for keyword in keywords {
            list.push(&keyword.as_ref().to_lowercase());
        }
        Self {
            keywords: list.into_vec(),
            matching: KeywordMatch::default(),
        }
    }

    pub fn with_matching(mut self, matching: KeywordMatch) -> Self {
        self.matching = matching;
        self
    }

    pub fn matching(&self) -> KeywordMatch {
        self.matching
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Keywords present in the lower-cased `text`, in vocabulary order.
    pub fn find_in<'v>(&'v self, text: &str) -> Vec<&'v str> {
        let haystack = text.to_lowercase();
        self.keywords
            .iter()
            .filter(|keyword| self.matching.matches(&haystack, keyword))
            .map(String::as_str)
            .collect()
    }
}

fn contains_whole_word(haystack: &str, term: &str) -> bool {
    haystack.match_indices(term).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Skill-like single tokens accepted by the in-section fallback scan.
fn is_skill_token(text: &str) -> bool {
    let len = text.chars().count();
    len > 2 && len < 50 && !text.contains(char::is_whitespace)
}

pub fn extract_skills(
    root: ElementRef<'_>,
    search: &SectionSearch,
    about: &[Locator],
    vocabulary: &KeywordVocabulary,
    cap: usize,
) -> Result<Vec<String>> {
    let mut skills = UniqueList::new(Some(cap));

    let hits = locate_entries(root, search)?;
    for entry in &hits.entries {
        let text = rendered_text(*entry);
        let accepted = match hits.scope {
            SearchScope::SectionFallback => is_skill_token(&text),
            SearchScope::Section | SearchScope::Page => text.chars().count() > 1,
        };
        if accepted && skills.push(&text) {
            debug!("Found skill: {}", text);
        }
    }

    match first_element(root, about)? {
        Some((section, locator)) => {
            debug!("Found About section with {:?}", locator);
            for keyword in vocabulary.find_in(&rendered_text(section)) {
                if skills.push(keyword) {
                    debug!("Found keyword in About section: {}", keyword);
                }
            }
        }
        None => debug!("No About section found"),
    }

    info!("Total skills found: {}", skills.len());
    Ok(skills.into_vec())
}

/// Keyword-only scan used for flat document text.
pub fn scan_keywords(text: &str, vocabulary: &KeywordVocabulary, cap: usize) -> Vec<String> {
    let mut skills = UniqueList::new(Some(cap));
    for keyword in vocabulary.find_in(text) {
        skills.push(keyword);
    }
    skills.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::selectors::{ABOUT, SKILLS};
    use scraper::Html;

    fn skills_of(page: &str, cap: usize) -> Vec<String> {
        let html = Html::parse_document(page);
        extract_skills(
            html.root_element(),
            &SKILLS,
            ABOUT,
            &KeywordVocabulary::default(),
            cap,
        )
        .unwrap()
    }

    #[test]
    fn test_keywords_match_inside_longer_tokens() {
        let vocabulary = KeywordVocabulary::default();
        let found = vocabulary.find_in("Built ASP.NET APIs and ReactJS frontends on NodeJS");
        assert!(found.contains(&".net"));
        assert!(found.contains(&"react"));
        assert!(!found.contains(&"node.js"));

        let found = vocabulary.find_in("Shipping JavaScript services");
        assert!(found.contains(&"javascript"));
        assert!(found.contains(&"java"));
    }

    #[test]
    fn test_whole_word_matching_is_opt_in() {
        let vocabulary = KeywordVocabulary::default().with_matching(KeywordMatch::WholeWord);
        let found = vocabulary.find_in("Shipping JavaScript and C++ services; loves Go, not Google.");
        assert!(found.contains(&"javascript"));
        assert!(found.contains(&"c++"));
        assert!(found.contains(&"go"));
        assert!(!found.contains(&"java"));
        assert!(!found.contains(&"ai"));

        let found = vocabulary.find_in("Built ASP.NET APIs");
        assert!(!found.contains(&".net"));
    }

    #[test]
    fn test_vocabulary_is_lowercased_and_deduped() {
        let vocabulary = KeywordVocabulary::new(["Rust", "rust", "Tokio"]);
        assert_eq!(vocabulary.keywords(), &["rust".to_string(), "tokio".to_string()]);
        assert_eq!(vocabulary.find_in("Built with RUST"), vec!["rust"]);
    }

    #[test]
    fn test_structural_entries_precede_keywords() {
        let page = r#"
            <section id="skills">
              <span class="pv-skill-category-entity__name">Python</span>
              <span class="pv-skill-category-entity__name">Kubernetes</span>
              <span class="pv-skill-category-entity__name">Python</span>
              <span class="pv-skill-category-entity__name">C</span>
            </section>
            <section id="about"><p>I write python and docker tooling.</p></section>
        "#;
        assert_eq!(
            skills_of(page, 20),
            vec!["Python", "Kubernetes", "python", "docker"]
        );
    }

    #[test]
    fn test_section_fallback_collects_skill_tokens() {
        let page = r#"
            <div data-section="skills">
              <h2>Skills</h2>
              <ul><li>TypeScript</li><li>Team leadership</li><li>PostgreSQL</li></ul>
            </div>
        "#;
        assert_eq!(skills_of(page, 20), vec!["TypeScript", "PostgreSQL"]);
    }

    #[test]
    fn test_page_wide_entries_without_section() {
        let page = r#"
            <div><span class="skill-category-entity__name">Terraform</span></div>
        "#;
        assert_eq!(skills_of(page, 20), vec!["Terraform"]);
    }

    #[test]
    fn test_cap_applies_in_encounter_order() {
        let entries: String = (0..25)
            .map(|i| format!(r#"<span class="pv-skill-category-entity__name">Skill{i}</span>"#))
            .collect();
        let page = format!(r#"<section id="skills">{entries}</section>"#);
        let skills = skills_of(&page, 20);
        assert_eq!(skills.len(), 20);
        assert_eq!(skills[0], "Skill0");
        assert_eq!(skills[19], "Skill19");
    }

    #[test]
    fn test_scan_keywords_caps_results() {
        let text = DEFAULT_KEYWORDS.join(" ; ");
        let skills = scan_keywords(&text, &KeywordVocabulary::default(), 15);
        assert_eq!(skills.len(), 15);
        assert_eq!(skills[0], "javascript");
    }
}
