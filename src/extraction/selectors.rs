// src/extraction/selectors.rs
//! Selector tables for the profile page markup.
//!
//! These track markup that changes without notice. Order matters: scoped,
//! structural locators come before generic ones.

use crate::extraction::locator::{Locator, SectionSearch};

pub static NAME: &[Locator] = &[
    Locator::Css("h1.text-heading-xlarge"),
    Locator::Css("h1[data-generated-suggestion-target]"),
    Locator::Css(".pv-text-details__left-panel h1"),
    Locator::Css(".ph5 h1"),
    Locator::Css("h1.break-words"),
    Locator::Css("h1[data-anonymize='person-name']"),
    Locator::Css(".pv-text-details__left-panel h1 span[aria-hidden='true']"),
    Locator::Css(".pv-text-details__left-panel h1 span:first-child"),
    Locator::Css("h1.break-words span[aria-hidden='true']"),
    Locator::Css(".pv-top-card--list-bullet h1"),
    Locator::Css(".pv-top-card--list-bullet h1 span[aria-hidden='true']"),
    Locator::Css("h1[data-anonymize='person-name'] span[aria-hidden='true']"),
    Locator::Css(".pv-text-details__left-panel h1 span:not([aria-hidden='false'])"),
    Locator::Css(".pv-top-card--list-bullet h1 span:not([aria-hidden='false'])"),
    Locator::Css("h1.break-words span:not([aria-hidden='false'])"),
    Locator::Css("h1"),
];

pub static EXPERIENCE: SectionSearch = SectionSearch {
    field: "experience",
    sections: &[
        Locator::Css("#experience"),
        Locator::Css("[data-section='experience']"),
        Locator::Css(".experience-section"),
        Locator::ParentOf("#experience"),
        Locator::Css("#experience ~ *"),
        Locator::Css(".pv-profile-section.experience-section"),
    ],
    scoped_entries: &[
        Locator::Css(".pv-entity__date-range"),
        Locator::Css(".pvs-entity__caption-wrapper"),
        Locator::Css(".pv-entity__dates"),
        Locator::Css(".experience-item__duration"),
        Locator::Css(".pv-entity__summary-info-v2 .pv-entity__dates"),
    ],
    section_fallback: &[Locator::LeafText {
        scope: "*",
        needles: &["19", "20", "yr", "year", "mo", "present", "current"],
    }],
    page_entries: &[
        Locator::Css(".pv-entity__date-range"),
        Locator::Css(".pvs-entity__caption-wrapper"),
        Locator::Css(".pv-entity__dates"),
        Locator::Css(".experience-item__duration"),
        Locator::Css(".pv-entity__summary-info-v2 .pv-entity__dates"),
        Locator::Css(".pvs-entity__caption-wrapper span"),
        Locator::Css(".pv-entity__date-range span"),
        Locator::Css(".experience-section .pv-entity__date-range"),
        Locator::Css("[data-section='experience'] .pv-entity__date-range"),
        Locator::Css("[data-section='experience'] .pvs-entity__caption-wrapper"),
        Locator::Css(".pv-profile-section .pv-entity__date-range"),
        Locator::Css(".pv-profile-section .pvs-entity__caption-wrapper"),
        Locator::Css(".pvs-entity__caption-wrapper .t-14"),
        Locator::Css(".pvs-entity__caption-wrapper .t-12"),
        Locator::Css(".pv-entity__date-range .t-14"),
        Locator::Css(".pv-entity__date-range .t-12"),
        Locator::Css(".pv-entity__dates .t-14"),
        Locator::Css(".pv-entity__dates .t-12"),
    ],
};

pub static SKILLS: SectionSearch = SectionSearch {
    field: "skills",
    sections: &[
        Locator::Css("#skills"),
        Locator::Css("[data-section='skills']"),
        Locator::Css(".skills-section"),
        Locator::ParentOf("#skills"),
        Locator::Css("#skills ~ *"),
        Locator::Css(".pv-profile-section.skills-section"),
    ],
    scoped_entries: &[
        Locator::Css(".pv-skill-category-entity__name"),
        Locator::Css(".pvs-entity__caption-wrapper"),
        Locator::Css(".skill-category-entity__name"),
        Locator::Css(".pv-skill-category-entity__name-text"),
        Locator::Css(".pv-skill-category-entity__name span"),
        Locator::Css(".skill-category-entity__name span"),
        Locator::Css(".pvs-entity__caption-wrapper span"),
        Locator::Css(".pv-skill-category-entity__name-text span"),
    ],
    section_fallback: &[Locator::LeafText {
        scope: "*",
        needles: &["script", "java", "python", "react", "node", "sql", "html", "css", "git"],
    }],
    // `.pvs-entity__caption-wrapper` is left out here: page-wide it mostly
    // hits experience captions.
    page_entries: &[
        Locator::Css(".pv-skill-category-entity__name"),
        Locator::Css(".skill-category-entity__name"),
        Locator::Css(".pv-skill-category-entity__name-text"),
        Locator::Css(".pv-skill-category-entity__name span"),
        Locator::Css(".skill-category-entity__name span"),
    ],
};

pub static ABOUT: &[Locator] = &[
    Locator::Css("#about"),
    Locator::ParentOf("#about"),
    Locator::Css("[data-section='about']"),
    Locator::Css(".pv-about-section"),
    Locator::Css(".pv-about__summary-text"),
    Locator::Css(".pv-profile-section.about-section"),
];

pub static CONTACT_REGION: &[Locator] = &[
    Locator::Css(".ci-v2-modal"),
    Locator::Css(".contact-info-modal"),
    Locator::Css("[data-test-id='contact-info-modal']"),
    Locator::Css(".pv-contact-info"),
    Locator::Css(".pv-contact-info__contact-type"),
];

pub static EMAIL_LINKS: &[Locator] = &[
    Locator::Css("a[href^='mailto:']"),
    Locator::Css("a[href*='mailto:']"),
];

pub static PHONE_LINKS: &[Locator] = &[
    Locator::Css("a[href^='tel:']"),
    Locator::Css("a[href*='tel:']"),
];

pub static LINKS: &[Locator] = &[Locator::Css("a[href]")];

pub static EMAIL_ATTRIBUTES: &[&str] = &["data-email", "data-contact-email"];
pub static PHONE_ATTRIBUTES: &[&str] = &["data-phone", "data-contact-phone"];

/// Selector tables used by the page extractor. Swappable so stale markup can
/// be patched without touching the resolution code.
#[derive(Debug, Clone, Copy)]
pub struct LocatorTables {
    pub name: &'static [Locator],
    pub experience: &'static SectionSearch,
    pub skills: &'static SectionSearch,
    pub about: &'static [Locator],
    pub contact_region: &'static [Locator],
    pub email_links: &'static [Locator],
    pub phone_links: &'static [Locator],
    pub links: &'static [Locator],
    pub email_attributes: &'static [&'static str],
    pub phone_attributes: &'static [&'static str],
}

impl Default for LocatorTables {
    fn default() -> Self {
        Self {
            name: NAME,
            experience: &EXPERIENCE,
            skills: &SKILLS,
            about: ABOUT,
            contact_region: CONTACT_REGION,
            email_links: EMAIL_LINKS,
            phone_links: PHONE_LINKS,
            links: LINKS,
            email_attributes: EMAIL_ATTRIBUTES,
            phone_attributes: PHONE_ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    fn all_locators() -> Vec<Locator> {
        let tables = LocatorTables::default();
        let mut locators = Vec::new();
        for search in [tables.experience, tables.skills] {
            locators.extend_from_slice(search.sections);
            locators.extend_from_slice(search.scoped_entries);
            locators.extend_from_slice(search.section_fallback);
            locators.extend_from_slice(search.page_entries);
        }
        for list in [
            tables.name,
            tables.about,
            tables.contact_region,
            tables.email_links,
            tables.phone_links,
            tables.links,
        ] {
            locators.extend_from_slice(list);
        }
        locators
    }

    #[test]
    fn test_every_selector_parses() {
        for locator in all_locators() {
            assert!(
                Selector::parse(locator.selector()).is_ok(),
                "selector failed to parse: {}",
                locator.selector()
            );
        }
    }

    #[test]
    fn test_bare_heading_is_last_name_locator() {
        assert_eq!(NAME.last(), Some(&Locator::Css("h1")));
    }
}
