//! Item classification and single-comment sentiment commands.

use std::path::Path;

use testimony_core::{AppConfig, Platform, RawItem, RuleSet};
use testimony_scoring::{AnnotatedItem, Engine, ItemFilter, Stance};

/// Read a JSON array of raw items.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of items.
pub(crate) fn load_items(path: &Path) -> anyhow::Result<Vec<RawItem>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    parse_items(&content).map_err(|e| anyhow::anyhow!("invalid items in {}: {e}", path.display()))
}

/// Parse a JSON array of raw items, one element at a time.
///
/// An element that cannot be read as an item is kept as an empty item so the
/// output still has one entry per input element.
pub(crate) fn parse_items(content: &str) -> Result<Vec<RawItem>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(content)?;
    let items = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!(index, error = %e, "unreadable item; classifying as empty");
                RawItem::default()
            })
        })
        .collect();
    Ok(items)
}

pub(crate) fn build_filter(platforms: &[String], believers_only: bool) -> ItemFilter {
    ItemFilter {
        platforms: platforms.iter().map(|p| Platform::parse(p)).collect(),
        believers_only,
    }
}

/// Load, classify and filter the items in `input`.
///
/// # Errors
///
/// Returns an error if the rules are invalid, the input cannot be loaded, or
/// the worker pool cannot be built.
pub(crate) fn classify_file(
    rules: RuleSet,
    config: &AppConfig,
    input: &Path,
    filter: &ItemFilter,
) -> anyhow::Result<(Engine, Vec<AnnotatedItem>)> {
    let engine = Engine::new(rules)?;
    let items = load_items(input)?;
    tracing::info!(path = %input.display(), items = items.len(), "loaded raw items");

    let annotated = testimony_scoring::classify_batch_with_workers(
        &engine,
        &items,
        config.batch_workers,
    )?;
    let kept: Vec<AnnotatedItem> = annotated
        .into_iter()
        .filter(|a| filter.matches(a))
        .collect();
    Ok((engine, kept))
}

/// Classify a file of raw items and print them as a table or JSON.
///
/// # Errors
///
/// See [`classify_file`]; also fails if JSON serialization fails.
pub(crate) fn run_classify(
    rules: RuleSet,
    config: &AppConfig,
    input: &Path,
    filter: &ItemFilter,
    json: bool,
) -> anyhow::Result<()> {
    let (_, annotated) = classify_file(rules, config, input, filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&annotated)?);
    } else if annotated.is_empty() {
        println!("no items matched");
    } else {
        print!("{}", render_table(&annotated));
    }
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

pub(crate) fn render_table(items: &[AnnotatedItem]) -> String {
    let mut out = format!(
        "{:<7}{:<10}{:<10}{:<10}{:<32}TITLE\n",
        "SCORE", "BELIEVER", "AGE", "PLATFORM", "CATEGORIES"
    );
    for a in items {
        let categories = a
            .classification
            .categories
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "{:<7}{:<10}{:<10}{:<10}{:<32}{}\n",
            a.credibility_score,
            if a.classification.is_believer { "yes" } else { "no" },
            a.classification.age_range,
            truncate(&a.item.platform.to_string(), 9),
            truncate(&categories, 31),
            truncate(&a.item.title, 60)
        ));
    }
    out
}

/// Score a single comment and print its polarity and stance.
pub(crate) fn run_sentiment(text: &str, threshold: f32) {
    let polarity = testimony_scoring::estimate_sentiment(text);
    println!("{polarity:.3} {}", stance_label(polarity, threshold));
}

fn stance_label(polarity: f32, threshold: f32) -> &'static str {
    match Stance::from_polarity(polarity, threshold) {
        Stance::Supportive => "supportive",
        Stance::Ridiculing => "ridiculing",
        Stance::Neutral => "neutral",
    }
}
