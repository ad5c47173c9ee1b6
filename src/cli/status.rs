use std::{
    collections::{BTreeMap, HashSet},
    path::PathBuf,
};

use anyhow::Context;
use bloodline::{BloodType, Registry};
use clap::Parser;
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

#[derive(Debug, Parser, Default)]
#[command(about = "Show donor counts by blood type and verified-name totals")]
pub struct Command {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

struct Summary {
    counts: BTreeMap<BloodType, usize>,
    total: usize,
    verified_entries: usize,
    verified_names: usize,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let registry = Registry::open(root)?;
        let store = registry.store();

        let mut counts: BTreeMap<BloodType, usize> = BTreeMap::new();
        for donor in store.read_all_donors().context("Could not read donor data")? {
            let donor = donor.context("Could not read donor data")?;
            *counts.entry(donor.blood_type).or_insert(0) += 1;
        }

        let names = store
            .read_verified_names()
            .context("Could not read verified-name log")?;
        let distinct: HashSet<_> = names.iter().map(|entry| entry.to_lowercase()).collect();

        let summary = Summary {
            total: counts.values().sum(),
            counts,
            verified_entries: names.len(),
            verified_names: distinct.len(),
        };

        match self.output {
            OutputFormat::Json => Self::output_json(&summary)?,
            OutputFormat::Table if self.quiet => Self::output_quiet(&summary),
            OutputFormat::Table => Self::output_table(&summary),
        }

        Ok(())
    }

    fn output_json(summary: &Summary) -> anyhow::Result<()> {
        use serde_json::json;

        let blood_types: Vec<_> = summary
            .counts
            .iter()
            .map(|(blood_type, count)| {
                json!({
                    "blood": blood_type,
                    "count": count,
                })
            })
            .collect();

        let output = json!({
            "blood_types": blood_types,
            "donors": summary.total,
            "verified_names": {
                "entries": summary.verified_entries,
                "distinct": summary.verified_names,
            }
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_quiet(summary: &Summary) {
        println!(
            "donors={} verified={}",
            summary.total, summary.verified_names
        );
    }

    fn output_table(summary: &Summary) {
        if summary.total == 0 {
            println!("No donors registered yet. Add one with 'blood donor'.");
        } else {
            println!("Donor counts");
            println!("{}", "────────────".dim());

            if is_narrow() {
                for (blood_type, count) in &summary.counts {
                    println!("{blood_type}: {count}");
                }
                println!("Total: {}", summary.total);
            } else {
                println!("{:<8} Count", "Blood");
                for (blood_type, count) in &summary.counts {
                    println!("{:<8} {count}", blood_type.as_str());
                }
                println!("Total    {}", summary.total);
            }
        }

        println!();
        println!(
            "Verified names: {} {}",
            summary.verified_names.to_string().success(),
            format!("({} log entries)", summary.verified_entries).dim()
        );
    }
}
