// src/extraction/contact.rs
use anyhow::Result;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::extraction::document::{find_email, find_phone};
use crate::extraction::locator::{collect_all, first_element, is_rendered, rendered_text, Locator};
use crate::extraction::normalize::UniqueList;
use crate::extraction::selectors::LocatorTables;
use crate::types::ContactInfo;

/// Caller-supplied signal: has the contact details region been revealed?
/// Revealing it (clicking, waiting) is the caller's business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactRegion {
    Visible,
    #[default]
    Hidden,
}

pub fn extract_contact(
    root: ElementRef<'_>,
    tables: &LocatorTables,
    site_domain: &str,
    region: ContactRegion,
) -> Result<ContactInfo> {
    let region_element = match region {
        ContactRegion::Visible => first_element(root, tables.contact_region)?,
        ContactRegion::Hidden => None,
    };

    let (scope, page_wide) = match region_element {
        Some((element, locator)) => {
            debug!("Extracting from contact region found with {:?}", locator);
            (element, false)
        }
        None => {
            debug!("No contact region, searching the whole page");
            (root, true)
        }
    };

    let mut contact = ContactInfo {
        email: first_link_target(scope, tables.email_links, "mailto:")?.unwrap_or_default(),
        phone: first_link_target(scope, tables.phone_links, "tel:")?.unwrap_or_default(),
        websites: outbound_links(scope, tables.links, site_domain)?,
    };

    if page_wide && (contact.email.is_empty() || contact.phone.is_empty()) {
        let text = rendered_text(root);
        if contact.email.is_empty() {
            contact.email = find_email(&text)
                .or_else(|| first_attribute(root, tables.email_attributes))
                .unwrap_or_default();
        }
        if contact.phone.is_empty() {
            contact.phone = find_phone(&text)
                .or_else(|| first_attribute(root, tables.phone_attributes))
                .unwrap_or_default();
        }
    }

    info!(
        "Contact info: email={}, phone={}, {} websites",
        !contact.email.is_empty(),
        !contact.phone.is_empty(),
        contact.websites.len()
    );
    Ok(contact)
}

/// Target of the first link using `scheme`, with the scheme and any query
/// string removed.
fn first_link_target(
    scope: ElementRef<'_>,
    locators: &[Locator],
    scheme: &str,
) -> Result<Option<String>> {
    for element in collect_all(scope, locators)? {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let lower = href.to_lowercase();
        let Some(start) = lower.find(scheme) else {
            continue;
        };
        let target = href[start + scheme.len()..]
            .split('?')
            .next()
            .unwrap_or_default()
            .trim();
        if !target.is_empty() {
            debug!("Found {} target: {}", scheme, target);
            return Ok(Some(target.to_string()));
        }
    }
    Ok(None)
}

/// Absolute http(s) links that leave `site_domain`, deduplicated by exact
/// URL in discovery order.
fn outbound_links(
    scope: ElementRef<'_>,
    locators: &[Locator],
    site_domain: &str,
) -> Result<Vec<String>> {
    let mut websites = UniqueList::new(None);
    for element in collect_all(scope, locators)? {
        let Some(href) = element.value().attr("href").map(str::trim) else {
            continue;
        };
        if is_outbound(href, site_domain) && websites.push(href) {
            debug!("Found website: {}", href);
        }
    }
    Ok(websites.into_vec())
}

pub fn is_outbound(href: &str, site_domain: &str) -> bool {
    let Ok(url) = Url::parse(href) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    match url.host_str() {
        Some(host) => !belongs_to(host, site_domain),
        None => false,
    }
}

pub fn belongs_to(host: &str, site_domain: &str) -> bool {
    let host = host.trim_end_matches('.').to_lowercase();
    let domain = site_domain.trim_matches('.').to_lowercase();
    !domain.is_empty() && (host == domain || host.ends_with(&format!(".{domain}")))
}

fn first_attribute(root: ElementRef<'_>, attributes: &[&str]) -> Option<String> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| is_rendered(*element))
        .find_map(|element| {
            attributes
                .iter()
                .filter_map(|name| element.value().attr(name))
                .map(str::trim)
                .find(|value| !value.is_empty())
                .map(str::to_string)
        })
}
