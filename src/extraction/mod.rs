// src/extraction/mod.rs
//! Profile extraction: page and document pipelines plus the shared pieces
//! they are built from.

pub mod contact;
pub mod document;
pub mod duration;
pub mod locator;
pub mod merge;
pub mod name;
pub mod normalize;
pub mod page;
pub mod selectors;
pub mod skills;
pub mod wait;

pub use contact::ContactRegion;
pub use document::DocumentExtractor;
pub use duration::DurationAggregator;
pub use locator::{Locator, SectionSearch};
pub use merge::merge_profiles;
pub use page::{PageExtractor, PageRequest};
pub use selectors::LocatorTables;
pub use skills::{KeywordMatch, KeywordVocabulary};
pub use wait::{wait_for_locator, wait_until};
