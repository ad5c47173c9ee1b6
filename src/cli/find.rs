use std::path::PathBuf;

use anyhow::Context;
use bloodline::{BloodType, Donor, Registry};
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Blood type needed (A+, A-, B+, B-, AB+, AB-, O+, O-)
    blood: BloodType,

    /// Only show donors whose location contains this text
    #[arg(long, short, default_value = "")]
    location: String,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let registry = Registry::open(root)?;
        let donors = registry
            .find_donors(self.blood, &self.location)
            .context("Could not read donor data")?;

        match self.output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&donors)?);
            }
            OutputFormat::Table if donors.is_empty() => {
                println!("{}", "No donors found matching criteria.".dim());
            }
            OutputFormat::Table if is_narrow() => output_stacked(&donors),
            OutputFormat::Table => output_table(&donors),
        }

        Ok(())
    }
}

fn output_stacked(donors: &[Donor]) {
    for donor in donors {
        println!("{} ({}, {})", donor.name, donor.blood_type, donor.age);
        println!("  {}", donor.location);
        println!("  {}", donor.contact.dim());
    }
}

fn output_table(donors: &[Donor]) {
    let width = |header: &str, field: fn(&Donor) -> usize| {
        donors.iter().map(field).max().unwrap_or(0).max(header.len())
    };
    let name = width("Name", |d| d.name.chars().count());
    let location = width("Location", |d| d.location.chars().count());
    let contact = width("Contact", |d| d.contact.chars().count());

    println!(
        "{:<name$}  {:<5}  {:<location$}  {:<contact$}  Age",
        "Name", "Blood", "Location", "Contact"
    );
    println!(
        "{}",
        "─".repeat(name + location + contact + 5 + 3 + 4 * 2).dim()
    );
    for donor in donors {
        println!(
            "{:<name$}  {:<5}  {:<location$}  {:<contact$}  {}",
            donor.name,
            donor.blood_type.as_str(),
            donor.location,
            donor.contact,
            donor.age
        );
    }
}
