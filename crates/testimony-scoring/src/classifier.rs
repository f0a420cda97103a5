//! Item classifier façade: one raw item in, one annotated item out.

use testimony_core::{validate_rules, RawItem, RuleSet};

use crate::engagement::{malformed_fields, Aggregator};
use crate::error::ScoringError;
use crate::keywords::KeywordClassifiers;
use crate::scorer::Scorer;
use crate::types::{AnnotatedItem, ClassificationResult, Fallback};

/// The scoring engine, built once from a validated [`RuleSet`].
///
/// Holds only read-only compiled tables, so one instance can be shared
/// across threads for batch classification.
#[derive(Debug, Clone)]
pub struct Engine {
    keywords: KeywordClassifiers,
    aggregator: Aggregator,
    scorer: Scorer,
    categories: Vec<String>,
}

impl Engine {
    /// Validate, normalize and compile `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::Config`] if any table is missing or invalid, or
    /// [`ScoringError::Pattern`] if a keyword table cannot be compiled.
    pub fn new(rules: RuleSet) -> Result<Self, ScoringError> {
        validate_rules(&rules)?;
        let rules = rules.normalized();

        let keywords = KeywordClassifiers::new(&rules)?;
        tracing::debug!(
            platforms = rules.platforms.weights.len(),
            categories = rules.categories.len(),
            age_rules = rules.age_rules.len(),
            believer_keywords = rules.believer_keywords.len(),
            "scoring engine initialised"
        );

        Ok(Self {
            keywords,
            aggregator: Aggregator::from_rules(&rules),
            scorer: Scorer::from_rules(&rules),
            categories: rules.category_names(),
        })
    }

    /// Engine over the built-in rule tables.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::new`].
    pub fn with_default_rules() -> Result<Self, ScoringError> {
        Self::new(RuleSet::default())
    }

    #[must_use]
    pub fn keywords(&self) -> &KeywordClassifiers {
        &self.keywords
    }

    #[must_use]
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    #[must_use]
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Configured category names, in table order.
    #[must_use]
    pub fn category_names(&self) -> &[String] {
        &self.categories
    }

    /// Classify and score one item.
    ///
    /// Never fails: missing or malformed signals fall back to neutral defaults
    /// and are listed in [`AnnotatedItem::fallbacks`].
    #[must_use]
    pub fn classify(&self, item: &RawItem) -> AnnotatedItem {
        let mut fallbacks = Vec::new();

        let text = item.text();
        if text.trim().is_empty() {
            fallbacks.push(Fallback::EmptyText);
        }
        let classification = ClassificationResult {
            is_believer: self.keywords.detect_believer(&text),
            age_range: self.keywords.estimate_age_range(&text),
            categories: self.keywords.detect_categories(&text),
        };

        if item.comments.is_empty() {
            fallbacks.push(Fallback::NoComments);
        }
        fallbacks.extend(
            malformed_fields(&item.engagement)
                .into_iter()
                .map(|field| Fallback::ClampedInput { field }),
        );
        let profile = self.aggregator.aggregate(&item.comments, &item.engagement);

        let (credibility_score, breakdown) =
            self.scorer.score_with_breakdown(&profile, &item.platform);
        if !breakdown.platform_known {
            fallbacks.push(Fallback::UnknownPlatform {
                platform: item.platform.to_string(),
            });
        }

        if !fallbacks.is_empty() {
            tracing::debug!(
                title = %item.title,
                platform = %item.platform,
                fallbacks = ?fallbacks,
                "substituted neutral defaults"
            );
        }

        AnnotatedItem {
            item: item.clone(),
            credibility_score,
            classification,
            profile,
            breakdown,
            fallbacks,
        }
    }
}
