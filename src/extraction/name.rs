// src/extraction/name.rs
use anyhow::Result;
use scraper::ElementRef;
use tracing::{debug, info};

use crate::extraction::locator::{first_text, Locator};

/// Walk the name locators in priority order and return the first plausible
/// full name, or an empty string.
pub fn extract_name(
    root: ElementRef<'_>,
    locators: &[Locator],
    brand_token: &str,
) -> Result<String> {
    let name = first_text(root, locators, |text| is_plausible_name(text, brand_token))?;

    match name {
        Some(name) => {
            info!("Found name: {}", name);
            Ok(name)
        }
        None => {
            debug!("No name found with any locator");
            Ok(String::new())
        }
    }
}

fn is_plausible_name(text: &str, brand_token: &str) -> bool {
    text.chars().count() > 1
        && (brand_token.is_empty() || !text.contains(brand_token))
        && !text.contains("Profile")
}
