use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pendingsubs::{Pipeline, Report, storage::DEFAULT_TEMPLATE};
use tracing::instrument;

use super::{Input, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Classify the snapshot and write the HTML report")]
pub struct Generate {
    /// Handlebars template to render instead of the built-in one
    #[arg(long, value_name = "PATH")]
    template: Option<PathBuf>,

    /// Where to write the report
    #[arg(short, long, value_name = "PATH", default_value = "index.html")]
    output: PathBuf,
}

impl Default for Generate {
    fn default() -> Self {
        Self {
            template: None,
            output: PathBuf::from("index.html"),
        }
    }
}

impl Generate {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, input: &Input) -> anyhow::Result<()> {
        tracing::info!("Starting pending-subs updater");

        let template = match &self.template {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read template {}", path.display()))?,
            None => DEFAULT_TEMPLATE.to_string(),
        };

        let (snapshot, tables) = input.load()?;
        let classification = Pipeline::new(&input.settings, &tables).run(&snapshot.documents);

        Report::new(&classification, &tables)
            .write(&self.output, &template)
            .with_context(|| format!("failed to write report {}", self.output.display()))?;

        println!(
            "{}",
            format!(
                "✅ Wrote {} submissions to {}",
                classification.records.len(),
                self.output.display()
            )
            .success()
        );

        Ok(())
    }
}
