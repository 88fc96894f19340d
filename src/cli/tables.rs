use anyhow::Context;
use clap::Parser;
use tracing::instrument;

use super::{Input, load_snapshot, terminal::Colorize};

#[derive(Debug, Parser, Default)]
#[command(about = "Verify the configuration tables and summarise them")]
pub struct Tables {
    /// List every project shortcut and its name
    #[arg(long)]
    list: bool,
}

impl Tables {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, input: &Input) -> anyhow::Result<()> {
        let snapshot = load_snapshot(&input.snapshot)?;

        let tables = snapshot
            .tables(&input.settings)
            .inspect_err(|e| println!("{}", format!("⚠️  {e}").warning()))
            .context("configuration tables are not usable")?;

        println!(
            "{}",
            format!(
                "✅ Configuration verified (last edited by {})",
                snapshot.config.last_editor
            )
            .success()
        );
        println!("Projects:  {}", tables.project_count());
        println!("Infoboxes: {}", tables.infobox_count());

        if self.list {
            println!();
            for (shortcut, name) in tables.projects() {
                println!("{:<8} {}", shortcut.as_str().info(), name);
            }
        }

        Ok(())
    }
}
