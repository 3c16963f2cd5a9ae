//! CLI for running depth-scoped rules over an XML file

mod config;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use roxmltree_adapter::run_file;
use xml_rule_engine::Engine;

use crate::config::{merge_rules, RuleDef, RuleFile};
use crate::report::Recorder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "xml-rule-cli", version, about = "Run depth-scoped rules over an XML file")]
struct Cli {
    /// XML file to scan
    file: PathBuf,

    /// JSON file with a `rules` array
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Extra rule as KIND:DEPTH[:NAME], e.g. element:0:project or comment:1
    #[arg(long = "rule", value_name = "RULE")]
    rule: Vec<RuleDef>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let file = cli.rules.as_deref().map(RuleFile::load).transpose()?;
    let defs = merge_rules(file, &cli.rule)?;

    let recorder = Recorder::default();
    let rules = defs
        .iter()
        .map(|def| {
            def.build(&recorder)
                .with_context(|| format!("invalid rule `{}`", def))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut engine = Engine::new(rules);
    info!(
        "loaded {} rules (max depth {})",
        engine.rules().len(),
        engine.max_depth()
    );
    run_file(&mut engine, &cli.file)
        .with_context(|| format!("failed to process {}", cli.file.display()))?;

    let records = recorder.take();
    match cli.format {
        Format::Text => {
            for record in &records {
                println!("{}", record);
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&records)?),
    }
    Ok(())
}
