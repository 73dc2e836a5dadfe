//! Chart-ready structures derived from fetched records

use serde::Serialize;

/// Calendar month abbreviations, January first
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Label used when there is nothing to chart
pub const PLACEHOLDER_CATEGORY_LABEL: &str = "No Categories Available";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub quantity: i64,
}

/// Quantity per category in first-seen order
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub entries: Vec<CategoryCount>,
    /// Set when `entries` is the single zero-valued stand-in
    pub is_placeholder: bool,
}

impl CategorySummary {
    /// Single-entry zero summary so charts never render an empty series
    pub fn placeholder() -> Self {
        Self {
            entries: vec![CategoryCount {
                category: PLACEHOLDER_CATEGORY_LABEL.to_string(),
                quantity: 0,
            }],
            is_placeholder: true,
        }
    }

    pub fn total(&self) -> i64 {
        self.entries
            .iter()
            .fold(0i64, |acc, e| acc.saturating_add(e.quantity))
    }

    pub fn max_quantity(&self) -> i64 {
        self.entries.iter().map(|e| e.quantity).max().unwrap_or(0)
    }

    pub fn get(&self, category: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.quantity)
    }
}

impl Default for CategorySummary {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// One slice of the category distribution
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub quantity: i64,
    pub percent: f64,
}

/// User sign-ups per calendar month
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct MonthBuckets {
    /// Index 0 is January
    pub counts: [u64; 12],
    /// Records skipped because `created_at` did not parse
    pub dropped: u64,
}

impl MonthBuckets {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Count for a 1-based month number
    pub fn month(&self, month: u32) -> Option<u64> {
        let idx = usize::try_from(month).ok()?.checked_sub(1)?;
        self.counts.get(idx).copied()
    }

    /// `(label, count)` pairs in calendar order
    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        MONTH_LABELS.iter().copied().zip(self.counts.iter().copied())
    }

    /// Largest single-month count, used to scale bars
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}
