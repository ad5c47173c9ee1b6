use std::path::PathBuf;

mod donor;
mod find;
mod init;
mod request;
mod status;
mod terminal;
mod verify;

use bloodline::Error;
use clap::ArgAction;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory the registry files are kept in
    #[arg(short, long, default_value = "data", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(status::Command::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show donor and verified-name counts (default)
    Status(status::Command),

    /// Create the registry files if they do not exist
    Init,

    /// Register a new donor
    Donor(donor::Command),

    /// Submit a blood request
    Request(request::Command),

    /// Find donors by blood type and location
    ///
    /// Blood types must match exactly. The location filter matches any part
    /// of a donor's location, ignoring case.
    Find(find::Command),

    /// Check a name against the verified-name log
    ///
    /// If the name is not found you are asked whether to add it.
    Verify(verify::Command),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(root)?,
            Self::Init => init::run(&root)?,
            Self::Donor(command) => command.run(root)?,
            Self::Request(command) => command.run(root)?,
            Self::Find(command) => command.run(root)?,
            Self::Verify(command) => command.run(root)?,
        }
        Ok(())
    }
}

/// Turns a registry error into a CLI error.
///
/// Validation messages are shown as-is. Storage failures are prefixed with
/// `action`, e.g. "Could not save donor data".
fn report(error: Error, action: &'static str) -> anyhow::Error {
    match error {
        Error::Validation(error) => anyhow::Error::new(error),
        Error::Storage(error) => anyhow::Error::new(error).context(action),
    }
}
