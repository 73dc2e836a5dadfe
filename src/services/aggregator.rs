//! Aggregator service for category metrics

use crate::types::{CategoryCount, CategoryRecord, CategoryShare, CategorySummary};
use std::collections::HashMap;

/// Aggregator for food-item category statistics
pub struct Aggregator;

impl Aggregator {
    /// Sum quantities per category, keeping first-seen category order.
    /// Empty input yields the placeholder summary.
    pub fn aggregate(records: &[CategoryRecord]) -> CategorySummary {
        if records.is_empty() {
            return CategorySummary::placeholder();
        }

        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<CategoryCount> = Vec::new();

        for record in records {
            match index.get(record.category.as_str()) {
                Some(&i) => {
                    entries[i].quantity = entries[i].quantity.saturating_add(record.quantity);
                }
                None => {
                    index.insert(record.category.as_str(), entries.len());
                    entries.push(CategoryCount {
                        category: record.category.clone(),
                        quantity: record.quantity,
                    });
                }
            }
        }

        CategorySummary {
            entries,
            is_placeholder: false,
        }
    }

    /// Percentage share of each category (all zero when the total is zero)
    pub fn distribution(summary: &CategorySummary) -> Vec<CategoryShare> {
        let total = summary.total();

        summary
            .entries
            .iter()
            .map(|e| CategoryShare {
                category: e.category.clone(),
                quantity: e.quantity,
                percent: if total > 0 {
                    e.quantity as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }
}
