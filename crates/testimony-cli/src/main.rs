mod classify;
mod report;
mod rules;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use testimony_core::Environment;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "testimony")]
#[command(about = "Score and classify testimony posts")]
pub(crate) struct Cli {
    /// Rules file to load instead of `TESTIMONY_RULES_PATH` or the built-in tables
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Print the polarity of a single comment
    Sentiment {
        /// Comment text to score
        text: String,
    },
    /// Classify a JSON array of raw items
    Classify {
        /// Path to the JSON input file
        #[arg(long)]
        input: PathBuf,

        /// Keep only these platforms (repeatable)
        #[arg(long = "platform")]
        platforms: Vec<String>,

        /// Keep only items classified as believers
        #[arg(long)]
        believers_only: bool,

        /// Emit annotated items as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print a markdown summary report for a JSON array of raw items
    Report {
        /// Path to the JSON input file
        #[arg(long)]
        input: PathBuf,

        /// Keep only these platforms (repeatable)
        #[arg(long = "platform")]
        platforms: Vec<String>,

        /// Keep only items classified as believers
        #[arg(long)]
        believers_only: bool,
    },
    /// Inspect rule tables
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum RulesCommands {
    /// Validate a rules file
    Check {
        /// Path to the YAML rules file
        path: PathBuf,
    },
    /// Print the active rule tables as YAML
    Show,
}

/// Colored log output everywhere except production, where stderr is usually
/// captured by a log collector.
fn use_ansi(env: &Environment) -> bool {
    !matches!(env, Environment::Production)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = testimony_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(use_ansi(&config.env))
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let rules_path = cli.rules.as_deref();

    match cli.command {
        Some(Commands::Sentiment { text }) => {
            let rule_set = rules::resolve_rules(rules_path, &config)?;
            classify::run_sentiment(&text, rule_set.sentiment_threshold);
        }
        Some(Commands::Classify {
            input,
            platforms,
            believers_only,
            json,
        }) => {
            let rule_set = rules::resolve_rules(rules_path, &config)?;
            let filter = classify::build_filter(&platforms, believers_only);
            classify::run_classify(rule_set, &config, &input, &filter, json)?;
        }
        Some(Commands::Report {
            input,
            platforms,
            believers_only,
        }) => {
            let rule_set = rules::resolve_rules(rules_path, &config)?;
            let filter = classify::build_filter(&platforms, believers_only);
            report::run_report(rule_set, &config, &input, &filter)?;
        }
        Some(Commands::Rules {
            command: RulesCommands::Check { path },
        }) => rules::run_rules_check(&path)?,
        Some(Commands::Rules {
            command: RulesCommands::Show,
        }) => {
            let rule_set = rules::resolve_rules(rules_path, &config)?;
            rules::run_rules_show(&rule_set)?;
        }
        None => println!("no command given; run `testimony --help`"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
