//! Batch-level views over annotated items: filters and summary counts.

use std::collections::BTreeMap;

use serde::Serialize;
use testimony_core::Platform;

use crate::types::AnnotatedItem;

/// Selection applied before summarizing or listing items.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Keep only these platforms. Empty keeps every platform.
    pub platforms: Vec<Platform>,
    pub believers_only: bool,
}

impl ItemFilter {
    #[must_use]
    pub fn matches(&self, annotated: &AnnotatedItem) -> bool {
        if self.believers_only && !annotated.classification.is_believer {
            return false;
        }
        if self.platforms.is_empty() {
            return true;
        }
        let key = annotated.item.platform.key();
        self.platforms.iter().any(|p| p.key() == key)
    }
}

#[must_use]
pub fn filter_items<'a>(items: &'a [AnnotatedItem], filter: &ItemFilter) -> Vec<&'a AnnotatedItem> {
    items.iter().filter(|a| filter.matches(a)).collect()
}

/// Aggregate counts over a set of annotated items.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub per_platform: BTreeMap<String, usize>,
    pub believers: usize,
    pub non_believers: usize,
    /// Items tagged with each category. Every configured category is present,
    /// even with a zero count.
    pub category_counts: BTreeMap<String, usize>,
    pub age_ranges: BTreeMap<String, usize>,
    /// Mean credibility score, `None` for an empty set.
    pub mean_credibility: Option<f32>,
    /// Items that needed at least one neutral-default substitution.
    pub degraded: usize,
}

/// Summarize `items`, seeding `category_counts` with `categories`.
#[must_use]
pub fn summarize<'a, I>(items: I, categories: &[String]) -> BatchSummary
where
    I: IntoIterator<Item = &'a AnnotatedItem>,
{
    let mut summary = BatchSummary {
        category_counts: categories.iter().map(|c| (c.clone(), 0)).collect(),
        ..BatchSummary::default()
    };
    let mut score_total: u64 = 0;

    for annotated in items {
        summary.total += 1;
        *summary
            .per_platform
            .entry(annotated.item.platform.to_string())
            .or_insert(0) += 1;

        if annotated.classification.is_believer {
            summary.believers += 1;
        } else {
            summary.non_believers += 1;
        }

        for category in &annotated.classification.categories {
            *summary.category_counts.entry(category.clone()).or_insert(0) += 1;
        }
        *summary
            .age_ranges
            .entry(annotated.classification.age_range.to_string())
            .or_insert(0) += 1;

        score_total += u64::from(annotated.credibility_score.value());
        if !annotated.fallbacks.is_empty() {
            summary.degraded += 1;
        }
    }

    if summary.total > 0 {
        #[allow(clippy::cast_precision_loss)]
        let mean = score_total as f64 / summary.total as f64;
        #[allow(clippy::cast_possible_truncation)]
        let mean = mean as f32;
        summary.mean_credibility = Some(mean);
    }

    summary
}
