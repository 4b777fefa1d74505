// src/extraction/duration.rs
//! Sums experience fragments ("2 yrs 3 mos", "2019 - Present") into years.
//!
//! Fragments are summed naively: overlapping or concurrent roles are counted
//! twice.

use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use tracing::debug;

use crate::extraction::normalize::round_one_decimal;

static YEARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:year|yr|y)").expect("valid years pattern"));

static MONTHS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:month|mos|mo)").expect("valid months pattern"));

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})\s*[-–—]\s*(?:present|current|now|\d{4})").expect("valid range pattern")
});

#[derive(Debug, Clone, Copy)]
pub struct DurationAggregator {
    current_year: i32,
}

impl Default for DurationAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl DurationAggregator {
    pub fn new() -> Self {
        Self::for_year(Utc::now().year())
    }

    /// Pin "now" for date ranges.
    pub fn for_year(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Months contributed by one fragment. Explicit counts win; a date range
    /// is only consulted when they yield nothing, and always counts from its
    /// start year up to the current year, whatever end it names.
    pub fn fragment_months(&self, fragment: &str) -> u32 {
        let text = fragment.to_lowercase();

        let years = capture_number(&YEARS_RE, &text);
        let months = capture_number(&MONTHS_RE, &text);
        let explicit = years.saturating_mul(12).saturating_add(months);
        if explicit > 0 {
            return explicit;
        }

        let Some(caps) = RANGE_RE.captures(&text) else {
            return 0;
        };
        let Ok(start) = caps[1].parse::<i32>() else {
            return 0;
        };

        let span = self.current_year.saturating_sub(start).max(0);
        u32::try_from(span).unwrap_or(0).saturating_mul(12)
    }

    pub fn total_months<I, S>(&self, fragments: I) -> u32
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        fragments
            .into_iter()
            .map(|fragment| {
                let months = self.fragment_months(fragment.as_ref());
                if months > 0 {
                    debug!("Experience fragment '{}' = {} months", fragment.as_ref(), months);
                }
                months
            })
            .fold(0u32, u32::saturating_add)
    }

    pub fn total_years<I, S>(&self, fragments: I) -> f64
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        months_to_years(self.total_months(fragments))
    }
}

pub fn months_to_years(months: u32) -> f64 {
    round_one_decimal(f64::from(months) / 12.0)
}

fn capture_number(re: &Regex, text: &str) -> u32 {
    re.captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregator() -> DurationAggregator {
        DurationAggregator::for_year(2024)
    }

    #[test]
    fn test_explicit_years_and_months() {
        assert_eq!(aggregator().fragment_months("2 yrs 3 mos"), 27);
        assert_eq!(aggregator().total_years(["2 yrs 3 mos"]), 2.3);
        assert_eq!(aggregator().fragment_months("1 year"), 12);
        assert_eq!(aggregator().fragment_months("11 months"), 11);
    }

    #[test]
    fn test_present_range_uses_current_year() {
        assert_eq!(aggregator().fragment_months("Jan 2020 - Present"), 48);
        assert_eq!(aggregator().total_years(["Jan 2020 - Present"]), 4.0);
        assert_eq!(aggregator().fragment_months("2021 – current"), 36);
    }

    #[test]
    fn test_closed_range_counts_to_current_year() {
        assert_eq!(aggregator().fragment_months("2015 - 2018"), 108);
        assert_eq!(aggregator().fragment_months("Sep 2019 – 2021"), 60);
        assert_eq!(aggregator().total_years(["2015 - 2018"]), 9.0);
    }

    #[test]
    fn test_explicit_count_wins_over_range() {
        let fragment = "Jan 2020 - Present · 4 yrs 10 mos";
        assert_eq!(aggregator().fragment_months(fragment), 58);
    }

    #[test]
    fn test_unrecognized_fragment_is_zero() {
        assert_eq!(aggregator().fragment_months("Software Engineer at Acme"), 0);
        assert_eq!(aggregator().fragment_months(""), 0);
        assert_eq!(aggregator().fragment_months("2030 - present"), 0);
    }

    #[test]
    fn test_fragments_are_summed_naively() {
        let fragments = ["2 yrs", "2 yrs", "6 mos"];
        assert_eq!(aggregator().total_months(fragments), 54);
        assert_eq!(aggregator().total_years(fragments), 4.5);
        assert_eq!(aggregator().total_years(Vec::<String>::new()), 0.0);
    }
}
