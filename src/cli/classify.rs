use clap::Parser;
use pendingsubs::{ClassificationRecord, Pipeline};
use tracing::instrument;

use super::{Input, terminal::Colorize};

#[derive(Debug, Parser, Default)]
#[command(about = "Classify the snapshot and print one line per draft")]
pub struct Classify {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Only show drafts carrying this note (can be specified multiple times)
    #[arg(long, value_name = "NOTE")]
    note: Vec<pendingsubs::Note>,
}

const NOTES_WIDTH: usize = 30;

/// Pads before colouring so escape codes don't count towards the width.
fn notes_cell(record: &ClassificationRecord) -> String {
    let notes = record.notes_list();
    if notes.is_empty() {
        format!("{:<NOTES_WIDTH$}", "–").dim()
    } else {
        format!("{notes:<NOTES_WIDTH$}").warning()
    }
}

fn tags_cell(record: &ClassificationRecord) -> String {
    let tags = record.tags_list();
    if tags.is_empty() { "–".dim() } else { tags.info() }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Classify {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, input: &Input) -> anyhow::Result<()> {
        let (snapshot, tables) = input.load()?;
        let classification = Pipeline::new(&input.settings, &tables).run(&snapshot.documents);

        let records: Vec<&ClassificationRecord> = classification
            .records
            .iter()
            .filter(|record| self.note.iter().all(|note| record.notes.contains(note)))
            .collect();

        match self.output {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(std::io::stdout(), &records)?;
                println!();
            }
            OutputFormat::Table => Self::output_table(&records, classification.skipped),
        }

        Ok(())
    }

    fn output_table(records: &[&ClassificationRecord], skipped: usize) {
        if records.is_empty() {
            println!("{}", "No matching submissions.".dim());
            return;
        }

        let width = records
            .iter()
            .map(|record| record.title.chars().count())
            .max()
            .unwrap_or(0);

        println!("{:<width$}  {:<NOTES_WIDTH$}  Projects", "Title", "Notes");
        for record in records {
            println!(
                "{:<width$}  {}  {}",
                record.title,
                notes_cell(record),
                tags_cell(record),
            );
        }

        println!();
        println!("{} submissions, {skipped} skipped", records.len());
    }
}
