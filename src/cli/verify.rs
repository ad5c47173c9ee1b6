use std::path::PathBuf;

use anyhow::Context;
use bloodline::{Error, Registry};
use dialoguer::Confirm;
use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The name to look up
    name: String,

    /// Add the name without asking if it is not found
    #[arg(long, short, conflicts_with = "no_add")]
    yes: bool,

    /// Only report; never add the name
    #[arg(long)]
    no_add: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            anyhow::bail!("Enter a name to verify.");
        }

        let registry = Registry::open(root)?;
        let verifier = registry.verifier();

        let verified = verifier
            .is_verified(name)
            .context("Could not read verified-name log")?;
        if verified {
            println!(
                "{}",
                format!("✅ '{name}' is verified and registered as donor.").success()
            );
            return Ok(());
        }

        println!("{}", format!("'{name}' not found.").warning());

        let add = if self.yes {
            true
        } else if self.no_add {
            false
        } else {
            Confirm::new()
                .with_prompt("Add to the verified-name log?")
                .default(false)
                .interact()?
        };

        if !add {
            return Ok(());
        }

        match verifier.add_verified(name) {
            Ok(()) => println!("{}", format!("✅ '{name}' added.").success()),
            Err(Error::Validation(error)) => return Err(error.into()),
            // A failed log write is advisory only.
            Err(Error::Storage(error)) => eprintln!(
                "{}",
                format!("⚠️  Could not write to verified-name log: {error}").warning()
            ),
        }

        Ok(())
    }
}
