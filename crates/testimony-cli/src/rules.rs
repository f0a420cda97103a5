//! Rule-table loading and inspection commands.

use std::path::Path;

use testimony_core::{AppConfig, RuleSet};

/// Pick the rule set for this run.
///
/// Precedence: `--rules` flag, then `TESTIMONY_RULES_PATH`, then the built-in
/// tables.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be loaded or fails validation.
pub(crate) fn resolve_rules(flag: Option<&Path>, config: &AppConfig) -> anyhow::Result<RuleSet> {
    match flag.or(config.rules_path.as_deref()) {
        Some(path) => {
            let rules = testimony_core::load_rules(path)?;
            tracing::info!(path = %path.display(), "loaded rules file");
            Ok(rules)
        }
        None => {
            tracing::debug!("using built-in rule tables");
            Ok(RuleSet::default())
        }
    }
}

/// Validate a rules file and print a one-line summary.
///
/// # Errors
///
/// Returns an error if the file is unreadable, malformed, or invalid.
pub(crate) fn run_rules_check(path: &Path) -> anyhow::Result<()> {
    let rules = testimony_core::load_rules(path)?;
    println!("{}", describe_rules(&rules, path));
    Ok(())
}

fn describe_rules(rules: &RuleSet, path: &Path) -> String {
    format!(
        "{}: ok ({} platforms, {} believer keywords, {} categories, {} age rules)",
        path.display(),
        rules.platforms.weights.len(),
        rules.believer_keywords.len(),
        rules.categories.len(),
        rules.age_rules.len()
    )
}

/// Print the active rule set as YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn run_rules_show(rules: &RuleSet) -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(rules)?);
    Ok(())
}
