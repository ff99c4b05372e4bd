mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use lexi_rules::{ComplianceValidator, RuleStore};

use crate::cli::{CliArgs, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let store = match &args.rules {
        Some(path) => RuleStore::from_path(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        None => RuleStore::builtin(),
    };

    match args.command {
        Command::Rules {
            document_type,
            jurisdiction,
        } => match (document_type, jurisdiction) {
            (Some(document_type), Some(jurisdiction)) => {
                let rules = store.requirements(&document_type, &jurisdiction);
                if rules.is_empty() {
                    println!("No requirements for {}/{}", document_type, jurisdiction);
                } else {
                    println!("Requirements for {}/{}:", document_type, jurisdiction);
                    for rule in rules {
                        println!("  - {}", rule.text);
                    }
                }
            }
            (None, None) => {
                for (document_type, jurisdiction, rules) in store.iter() {
                    println!("{}/{}:", document_type, jurisdiction);
                    for rule in rules {
                        println!("  - {}", rule.text);
                    }
                }
            }
            _ => anyhow::bail!("--document-type and --jurisdiction must be given together"),
        },
        Command::Validate {
            file,
            jurisdiction,
            document_type,
            json,
        } => {
            let draft = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read draft from {}", file.display()))?;
            let validator = ComplianceValidator::new(Arc::new(store));
            let report = validator.validate(&draft, &jurisdiction, &document_type);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.compliant {
                println!("COMPLIANT: no missing requirements detected");
            } else {
                println!(
                    "NON-COMPLIANT: {} requirement(s) not detected:",
                    report.missing_requirements.len()
                );
                for requirement in &report.missing_requirements {
                    println!("  - {}", requirement);
                }
            }

            if !report.compliant {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
