// src/extraction/normalize.rs
//! Trimming, de-duplication and capping for list-valued fields

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Insertion-ordered list of unique, trimmed strings with an optional cap.
/// Comparison is exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct UniqueList {
    items: Vec<String>,
    cap: Option<usize>,
}

impl UniqueList {
    pub fn new(cap: Option<usize>) -> Self {
        Self {
            items: Vec::new(),
            cap,
        }
    }

    /// Returns true when the item was added.
    pub fn push(&mut self, item: &str) -> bool {
        let item = item.trim();
        if item.is_empty() || self.is_full() || self.contains(item) {
            return false;
        }
        self.items.push(item.to_string());
        true
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|existing| existing == item)
    }

    pub fn is_full(&self) -> bool {
        self.cap.is_some_and(|cap| self.items.len() >= cap)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

pub fn normalize_list<I, S>(items: I, cap: Option<usize>) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut list = UniqueList::new(cap);
    for item in items {
        list.push(item.as_ref());
    }
    list.into_vec()
}
