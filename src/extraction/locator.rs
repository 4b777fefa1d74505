// src/extraction/locator.rs
//! Locator descriptors and the generic "first match wins" resolvers.
//!
//! Locators are plain data; the selector tables live in `selectors.rs`. Every
//! resolver here only ever returns rendered elements: anything inside a
//! `hidden` subtree, an inline `display: none` / `visibility: hidden` block,
//! or non-content tags (`head`, `script`, `template`, ...) is invisible to it.

use std::collections::HashSet;

use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::errors::ExtractError;
use crate::extraction::normalize::clean_text;

const NON_CONTENT_TAGS: &[&str] = &["head", "script", "style", "template", "noscript"];

/// Where a value of interest typically lives in a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// Every rendered element matching a CSS selector, in document order.
    Css(&'static str),
    /// The parent of each rendered match. Used for anchor markers that sit
    /// as an empty first child of the section they label.
    ParentOf(&'static str),
    /// Rendered leaf elements under `scope` whose text contains one of
    /// `needles` (case-insensitive).
    LeafText {
        scope: &'static str,
        needles: &'static [&'static str],
    },
}

impl Locator {
    pub fn selector(&self) -> &'static str {
        match self {
            Locator::Css(selector) | Locator::ParentOf(selector) => selector,
            Locator::LeafText { scope, .. } => scope,
        }
    }

    pub fn find<'a>(&self, root: ElementRef<'a>) -> Result<Vec<ElementRef<'a>>, ExtractError> {
        let selector = parse_selector(self.selector())?;
        let matches = root.select(&selector).filter(|el| is_rendered(*el));

        let found = match self {
            Locator::Css(_) => matches.collect(),
            Locator::ParentOf(_) => {
                let mut seen = HashSet::new();
                matches
                    .filter_map(|el| el.parent().and_then(ElementRef::wrap))
                    .filter(|parent| is_rendered(*parent) && seen.insert(parent.id()))
                    .collect()
            }
            Locator::LeafText { needles, .. } => matches
                .filter(|el| is_leaf(*el))
                .filter(|el| {
                    let text = rendered_text(*el).to_lowercase();
                    !text.is_empty() && needles.iter().any(|needle| text.contains(needle))
                })
                .collect(),
        };

        Ok(found)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidLocator {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn is_hidden(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if NON_CONTENT_TAGS.contains(&value.name()) || value.attr("hidden").is_some() {
        return true;
    }
    if value.name() == "input" && value.attr("type") == Some("hidden") {
        return true;
    }
    value.attr("style").is_some_and(|style| {
        let style: String = style
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        style.contains("display:none") || style.contains("visibility:hidden")
    })
}

/// True when neither the element nor any ancestor is hidden.
pub fn is_rendered(element: ElementRef<'_>) -> bool {
    !is_hidden(element) && !element.ancestors().filter_map(ElementRef::wrap).any(is_hidden)
}

fn is_leaf(element: ElementRef<'_>) -> bool {
    !element.children().any(|child| child.value().is_element())
}

/// Whitespace-collapsed text of the rendered descendants of `element`.
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    collect_text(element, &mut parts);
    clean_text(&parts.join(" "))
}

fn collect_text(element: ElementRef<'_>, parts: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let text: &str = text;
            parts.push(text.to_string());
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !is_hidden(child_element) {
                collect_text(child_element, parts);
            }
        }
    }
}

/// Try each locator in order; for the first element it yields with non-empty
/// text that also passes `accept`, return that text.
pub fn first_text<F>(
    root: ElementRef<'_>,
    locators: &[Locator],
    accept: F,
) -> Result<Option<String>, ExtractError>
where
    F: Fn(&str) -> bool,
{
    for locator in locators {
        let Some(element) = locator.find(root)?.into_iter().next() else {
            continue;
        };
        let text = rendered_text(element);
        if text.is_empty() {
            continue;
        }
        if accept(&text) {
            debug!("Locator {:?} matched text: {}", locator, text);
            return Ok(Some(text));
        }
        debug!("Locator {:?} matched rejected text: {}", locator, text);
    }
    Ok(None)
}

/// First rendered element with non-empty text, trying locators in order.
pub fn first_element<'a>(
    root: ElementRef<'a>,
    locators: &[Locator],
) -> Result<Option<(ElementRef<'a>, Locator)>, ExtractError> {
    for locator in locators {
        if let Some(element) = locator
            .find(root)?
            .into_iter()
            .find(|el| !rendered_text(*el).is_empty())
        {
            return Ok(Some((element, *locator)));
        }
    }
    Ok(None)
}

/// Union of every locator's matches, deduplicated by node, in locator order
/// then document order.
pub fn collect_all<'a>(
    root: ElementRef<'a>,
    locators: &[Locator],
) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    let mut seen = HashSet::new();
    let mut elements = Vec::new();
    for locator in locators {
        let found = locator.find(root)?;
        debug!("Locator {:?} found {} elements", locator, found.len());
        for element in found {
            if seen.insert(element.id()) {
                elements.push(element);
            }
        }
    }
    Ok(elements)
}

/// Drop elements nested inside another element of the same set, so text is
/// never read twice.
pub fn outermost<'a>(elements: Vec<ElementRef<'a>>) -> Vec<ElementRef<'a>> {
    let ids: HashSet<_> = elements.iter().map(|el| el.id()).collect();
    elements
        .into_iter()
        .filter(|el| !el.ancestors().any(|ancestor| ids.contains(&ancestor.id())))
        .collect()
}

/// Two-tier search shared by the skills and experience extractors: a named
/// section first, the whole page when no section can be identified.
#[derive(Debug, Clone, Copy)]
pub struct SectionSearch {
    pub field: &'static str,
    pub sections: &'static [Locator],
    pub scoped_entries: &'static [Locator],
    /// Looser locators tried inside a found section when no entry matched.
    pub section_fallback: &'static [Locator],
    pub page_entries: &'static [Locator],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    Section,
    SectionFallback,
    Page,
}

#[derive(Debug)]
pub struct SectionHits<'a> {
    pub scope: SearchScope,
    pub entries: Vec<ElementRef<'a>>,
}

pub fn locate_entries<'a>(
    root: ElementRef<'a>,
    search: &SectionSearch,
) -> Result<SectionHits<'a>, ExtractError> {
    if let Some((section, locator)) = first_element(root, search.sections)? {
        debug!("Found {} section with {:?}", search.field, locator);

        let entries = collect_all(section, search.scoped_entries)?;
        if !entries.is_empty() {
            debug!("Found {} {} entries in section", entries.len(), search.field);
            return Ok(SectionHits {
                scope: SearchScope::Section,
                entries,
            });
        }

        debug!("No {} entries in section, trying looser locators", search.field);
        return Ok(SectionHits {
            scope: SearchScope::SectionFallback,
            entries: collect_all(section, search.section_fallback)?,
        });
    }

    debug!("No {} section found, searching the whole page", search.field);
    Ok(SectionHits {
        scope: SearchScope::Page,
        entries: collect_all(root, search.page_entries)?,
    })
}
