use std::path::PathBuf;

use bloodline::{DonorForm, Registry};
use tracing::instrument;

use crate::cli::{report, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Donor name (letters and spaces only)
    #[arg(long, short)]
    name: String,

    /// Age in years (16-100)
    #[arg(long, short)]
    age: String,

    /// Blood type (A+, A-, B+, B-, AB+, AB-, O+, O-)
    #[arg(long, short)]
    blood: String,

    /// Hospital or city
    #[arg(long, short)]
    location: String,

    /// 10-digit phone number or Gmail address
    #[arg(long, short)]
    contact: String,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let registry = Registry::open(root)?;

        let form = DonorForm {
            name: self.name,
            age: self.age,
            blood_type: self.blood,
            location: self.location,
            contact: self.contact,
        };

        let registration = registry
            .register_donor(&form)
            .map_err(|e| report(e, "Could not save donor data"))?;

        println!(
            "{}",
            format!(
                "✅ Donor '{}' registered successfully.",
                registration.donor.name
            )
            .success()
        );

        if let Some(warning) = registration.log_warning {
            eprintln!(
                "{}",
                format!("⚠️  Could not write to verified-name log: {warning}").warning()
            );
        }

        Ok(())
    }
}
