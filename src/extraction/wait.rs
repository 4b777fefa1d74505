// src/extraction/wait.rs
//! One-shot "wait until the page shows X, or give up" primitive.
//!
//! The probe is polled until it reports true or the timeout elapses. It never
//! re-triggers whatever interaction was supposed to reveal the content.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use scraper::Html;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, warn};

use crate::errors::ExtractError;
use crate::extraction::locator::{first_element, Locator};

pub async fn wait_until<F>(probe: F, limit: Duration, poll: Duration) -> Result<(), ExtractError>
where
    F: FnMut() -> bool,
{
    let mut probe = probe;
    wait_until_async(move || std::future::ready(probe()), limit, poll).await
}

pub async fn wait_until_async<F, Fut>(
    mut probe: F,
    limit: Duration,
    poll: Duration,
) -> Result<(), ExtractError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let polling = async {
        let mut ticker = interval(poll.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if probe().await {
                return;
            }
        }
    };

    timeout(limit, polling).await.map_err(|_| {
        let waited_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
        warn!("Gave up waiting after {} ms", waited_ms);
        ExtractError::Timeout { waited_ms }
    })
}

/// True when any locator matches a rendered, non-empty element of `html`.
pub fn html_has_match(html: &str, locators: &[Locator]) -> bool {
    let document = Html::parse_document(html);
    match first_element(document.root_element(), locators) {
        Ok(found) => found.is_some(),
        Err(e) => {
            debug!("Locator check failed: {}", e);
            false
        }
    }
}

/// Re-read an HTML snapshot on disk until one of `locators` matches.
pub async fn wait_for_locator(
    path: &Path,
    locators: &[Locator],
    limit: Duration,
    poll: Duration,
) -> Result<(), ExtractError> {
    wait_until_async(
        || async move {
            match tokio::fs::read_to_string(path).await {
                Ok(html) => html_has_match(&html, locators),
                Err(e) => {
                    debug!("Snapshot {} not readable yet: {}", path.display(), e);
                    false
                }
            }
        },
        limit,
        poll,
    )
    .await
}
