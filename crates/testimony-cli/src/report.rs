//! Markdown summary report over a classified batch.

use std::fmt::Write;
use std::path::Path;

use testimony_core::{AppConfig, RuleSet};
use testimony_scoring::{summarize, AnnotatedItem, BatchSummary, ItemFilter};

use crate::classify::classify_file;

/// Classify a file of raw items and print a markdown report.
///
/// # Errors
///
/// Returns an error if the rules are invalid or the input cannot be loaded.
pub(crate) fn run_report(
    rules: RuleSet,
    config: &AppConfig,
    input: &Path,
    filter: &ItemFilter,
) -> anyhow::Result<()> {
    let (engine, annotated) = classify_file(rules, config, input, filter)?;
    let summary = summarize(&annotated, engine.category_names());
    let mut out = String::new();
    write_report(&mut out, &summary, &annotated)?;
    print!("{out}");
    Ok(())
}

pub(crate) fn write_report<W: Write>(
    out: &mut W,
    summary: &BatchSummary,
    items: &[AnnotatedItem],
) -> std::fmt::Result {
    writeln!(out, "# Testimony report\n")?;

    if summary.total == 0 {
        return writeln!(out, "No items matched.");
    }

    writeln!(out, "Items: {}", summary.total)?;
    if let Some(mean) = summary.mean_credibility {
        writeln!(out, "Mean credibility: {mean:.1}")?;
    }
    if summary.degraded > 0 {
        writeln!(out, "Items scored with neutral defaults: {}", summary.degraded)?;
    }

    writeln!(out, "\n## Items per platform\n")?;
    writeln!(out, "| Platform | Count |\n|---|---|")?;
    for (platform, count) in &summary.per_platform {
        let label = if platform.is_empty() { "(none)" } else { platform.as_str() };
        writeln!(out, "| {label} | {count} |")?;
    }

    writeln!(out, "\n## Believers vs non-believers\n")?;
    writeln!(out, "- Believers: {}", summary.believers)?;
    writeln!(out, "- Non-believers: {}", summary.non_believers)?;

    writeln!(out, "\n## Prophecy correlation\n")?;
    writeln!(out, "| Category | Count |\n|---|---|")?;
    for (category, count) in &summary.category_counts {
        writeln!(out, "| {category} | {count} |")?;
    }

    writeln!(out, "\n## Age ranges\n")?;
    for (range, count) in &summary.age_ranges {
        writeln!(out, "- {range}: {count}")?;
    }

    writeln!(out, "\n## Testimonies\n")?;
    for a in items {
        write_item(out, a)?;
    }
    Ok(())
}

fn write_item<W: Write>(out: &mut W, a: &AnnotatedItem) -> std::fmt::Result {
    let b = &a.breakdown;
    writeln!(out, "### {}\n", a.item.title)?;
    writeln!(out, "- Platform: {}", a.item.platform)?;
    if let Some(author) = &a.item.author {
        writeln!(out, "- Author: {author}")?;
    }
    writeln!(out, "- Age range: {}", a.classification.age_range)?;
    writeln!(out, "- Credibility: {}%", a.credibility_score)?;
    writeln!(
        out,
        "- Breakdown: base {:.1}, posting frequency {:+.1}, sentiment {:+.1}, \
         support/ridicule {:+.1}, reposts {:+.1}, reactions {:+.1}, platform {:+.1}",
        b.base, b.posting_frequency, b.sentiment, b.ridicule, b.repost, b.reaction, b.platform
    )?;
    if let Some(url) = &a.item.source_url {
        writeln!(out, "- Source: {url}")?;
    }
    if !a.fallbacks.is_empty() {
        let notes = a
            .fallbacks
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        writeln!(out, "- Defaults applied: {notes}")?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use testimony_core::{Platform, RawItem};
    use testimony_scoring::Engine;

    use super::*;

    fn render(summary: &BatchSummary, items: &[AnnotatedItem]) -> String {
        let mut out = String::new();
        write_report(&mut out, summary, items).unwrap();
        out
    }

    #[test]
    fn empty_report_says_so() {
        let report = render(&BatchSummary::default(), &[]);
        assert!(report.contains("No items matched."));
    }

    #[test]
    fn report_includes_every_section() {
        let engine = Engine::with_default_rules().unwrap();
        let mut raw = RawItem::new("Saw heaven", "my testimony", Platform::YouTube)
            .with_comments(["Amen!"]);
        raw.source_url = Some("https://www.youtube.com/watch?v=abc".to_string());
        raw.author = Some("Grace".to_string());
        let items = vec![
            engine.classify(&raw),
            engine.classify(&RawItem::new("untitled", "", Platform::parse("Mastodon"))),
        ];
        let summary = summarize(&items, engine.category_names());
        let report = render(&summary, &items);

        assert!(report.contains("## Items per platform"));
        assert!(report.contains("| YouTube | 1 |"));
        assert!(report.contains("- Believers: 1"));
        assert!(report.contains("| Near-Death Experience | 1 |"));
        assert!(report.contains("| Rapture | 0 |"));
        assert!(report.contains("### Saw heaven"));
        assert!(report.contains("- Source: https://www.youtube.com/watch?v=abc"));
        assert!(report.contains("- Author: Grace"));
        assert_eq!(report.matches("- Author:").count(), 1);
        assert!(report.contains("unknown platform 'Mastodon'"));
    }
}
