use std::path::{Path, PathBuf};

mod classify;
mod generate;
mod tables;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use classify::Classify;
use generate::Generate;
use pendingsubs::{LookupTables, Settings, Snapshot};
use tables::Tables;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the settings file. Defaults apply if it does not exist
    #[arg(short, long, default_value = "pending-subs.toml", global = true)]
    settings: PathBuf,

    /// Path to the JSON snapshot of drafts and configuration
    #[arg(long, default_value = "snapshot.json", global = true)]
    snapshot: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let settings = Settings::load_or_default(&self.settings)
            .with_context(|| format!("invalid settings in {}", self.settings.display()))?;
        let input = Input {
            settings,
            snapshot: self.snapshot,
        };

        self.command
            .unwrap_or_else(|| Command::Generate(Generate::default()))
            .run(&input)
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
    /// Classify the snapshot and write the HTML report (default)
    Generate(Generate),

    /// Classify the snapshot and print the records
    Classify(Classify),

    /// Verify the configuration tables and summarise them
    Tables(Tables),
}

impl Command {
    fn run(self, input: &Input) -> anyhow::Result<()> {
        match self {
            Self::Generate(command) => command.run(input)?,
            Self::Classify(command) => command.run(input)?,
            Self::Tables(command) => command.run(input)?,
        }
        Ok(())
    }
}

/// Settings and snapshot location shared by every command.
#[derive(Debug)]
pub struct Input {
    settings: Settings,
    snapshot: PathBuf,
}

impl Input {
    /// Loads the snapshot and verifies its configuration tables.
    ///
    /// Any configuration problem aborts before a single draft is classified.
    fn load(&self) -> anyhow::Result<(Snapshot, LookupTables)> {
        let snapshot = load_snapshot(&self.snapshot)?;
        let tables = snapshot
            .tables(&self.settings)
            .context("refusing to classify with unverified configuration")?;
        Ok((snapshot, tables))
    }
}

fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    Snapshot::load(path).with_context(|| format!("failed to load snapshot {}", path.display()))
}
