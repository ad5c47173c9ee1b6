use std::path::PathBuf;

use bloodline::{Registry, RequestForm};
use tracing::instrument;

use crate::cli::{report, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Patient name
    #[arg(long, short)]
    name: String,

    /// Blood type needed (A+, A-, B+, B-, AB+, AB-, O+, O-)
    #[arg(long, short)]
    blood: String,

    /// Hospital or city
    #[arg(long, short)]
    location: String,

    /// Urgency level (Low, Medium, High, Critical)
    #[arg(long, short)]
    urgency: String,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let registry = Registry::open(root)?;

        let form = RequestForm {
            name: self.name,
            blood_type: self.blood,
            location: self.location,
            urgency: self.urgency,
        };

        let request = registry
            .submit_request(&form)
            .map_err(|e| report(e, "Could not save request"))?;

        println!("{}", "✅ Request submitted successfully.".success());
        println!(
            "{}",
            format!(
                "{} needed at {} ({})",
                request.blood_type, request.location, request.urgency
            )
            .dim()
        );

        Ok(())
    }
}
