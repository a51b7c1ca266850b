use clap::Parser;
use noteman::{Config, Directory, Matcher};
use tracing::instrument;

use crate::cli::OutputFormat;

/// Command arguments for `notes list`.
#[derive(Debug, Parser)]
pub struct List {
    /// Only list notes whose path (relative to the notes root) contains this
    filter: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

impl List {
    #[instrument]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let directory = Directory::open(config)?;
        let filter = self.filter.map(Matcher::new);

        let notes = directory.list(filter.as_ref());

        self.format.print("LIST", &notes, "No files present")
    }
}
