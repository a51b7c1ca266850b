use clap::Parser;
use noteman::{Config, Directory, Matcher};
use tracing::instrument;

use crate::cli::OutputFormat;

/// Command arguments for `notes search`.
#[derive(Debug, Parser)]
pub struct Search {
    /// The text to look for (plain substring, no wildcards)
    term: String,

    /// `deep` also searches inside the notes, not just their filenames
    #[arg(value_enum, default_value_t)]
    mode: Mode,

    /// Ignore case when matching
    #[arg(long, short)]
    ignore_case: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
enum Mode {
    /// Match filenames only
    #[default]
    Shallow,
    /// Match filenames and content
    Deep,
}

impl Search {
    #[instrument]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let directory = Directory::open(config)?;
        let matcher = if self.ignore_case {
            Matcher::ignore_case(self.term)
        } else {
            Matcher::new(self.term)
        };

        let results = match self.mode {
            Mode::Shallow => directory.shallow_search(&matcher),
            Mode::Deep => directory.deep_search(&matcher),
        };
        tracing::debug!("{} result(s) for '{}'", results.len(), matcher.term());

        self.format
            .print("SEARCH RESULTS", &results, "NO RESULTS FOUND")
    }
}
