//! Keyword-driven classifiers: believer detection, age range, categories.

use std::collections::BTreeSet;

use regex::Regex;
use testimony_core::{validate_rules, AgeRange, ConfigError, RuleSet};

use crate::error::ScoringError;

/// Tag returned by [`KeywordClassifiers::detect_categories`] when no category matches.
pub const GENERAL_CATEGORY: &str = "General";

/// Build a case-insensitive whole-word alternation over `keywords`.
///
/// An empty alternation would match any word, so a table with no usable
/// keyword is refused.
fn word_pattern(table: &str, keywords: &[String]) -> Result<Regex, ScoringError> {
    let escaped: Vec<String> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(regex::escape)
        .collect();
    if escaped.is_empty() {
        return Err(ScoringError::Config(ConfigError::Validation(format!(
            "{table} must list at least one keyword"
        ))));
    }
    Regex::new(&format!(r"(?i)\b(?:{})\b", escaped.join("|"))).map_err(|source| {
        ScoringError::Pattern {
            table: table.to_string(),
            source,
        }
    })
}

#[derive(Debug, Clone)]
struct CompiledAgeRule {
    range: AgeRange,
    pattern: Regex,
}

#[derive(Debug, Clone)]
struct CompiledCategory {
    name: String,
    keywords: Vec<String>,
}

/// The three text classifiers, compiled once from a [`RuleSet`].
#[derive(Debug, Clone)]
pub struct KeywordClassifiers {
    believer: Regex,
    age_rules: Vec<CompiledAgeRule>,
    categories: Vec<CompiledCategory>,
}

impl KeywordClassifiers {
    /// Validate and compile the keyword tables of `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::Config`] if the rule set fails validation, or
    /// [`ScoringError::Pattern`] if a keyword table cannot be compiled.
    pub fn new(rules: &RuleSet) -> Result<Self, ScoringError> {
        validate_rules(rules)?;

        let believer = word_pattern("believer_keywords", &rules.believer_keywords)?;

        let age_rules = rules
            .age_rules
            .iter()
            .enumerate()
            .map(|(idx, rule)| {
                word_pattern(&format!("age rule {idx} ({})", rule.range), &rule.keywords).map(
                    |pattern| CompiledAgeRule {
                        range: rule.range,
                        pattern,
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let categories = rules
            .categories
            .iter()
            .map(|c| CompiledCategory {
                name: c.name.clone(),
                keywords: c
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .collect(),
            })
            .collect();

        Ok(Self {
            believer,
            age_rules,
            categories,
        })
    }

    /// `true` if any believer keyword occurs as a whole word.
    #[must_use]
    pub fn detect_believer(&self, text: &str) -> bool {
        self.believer.is_match(text)
    }

    /// Range of the first age rule with a whole-word keyword hit, else `Unknown`.
    #[must_use]
    pub fn estimate_age_range(&self, text: &str) -> AgeRange {
        self.age_rules
            .iter()
            .find(|rule| rule.pattern.is_match(text))
            .map_or(AgeRange::Unknown, |rule| rule.range)
    }

    /// Every category with a keyword occurring anywhere in the text.
    ///
    /// Never empty: falls back to `{"General"}`.
    #[must_use]
    pub fn detect_categories(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        let mut found: BTreeSet<String> = self
            .categories
            .iter()
            .filter(|c| c.keywords.iter().any(|k| lowered.contains(k.as_str())))
            .map(|c| c.name.clone())
            .collect();
        if found.is_empty() {
            found.insert(GENERAL_CATEGORY.to_string());
        }
        found
    }
}
