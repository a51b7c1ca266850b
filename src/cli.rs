use std::path::PathBuf;

mod list;
mod search;
mod terminal;

use clap::{ArgAction, CommandFactory};
use clap_complete::Shell;
use list::List;
use noteman::{
    Config, DeleteError, Directory, ExternalEditor, LinePrompt, NoteLocation,
    domain::{DEFAULT_EDITOR, DEFAULT_ROOT},
};
use search::Search;
pub use terminal::Colorize;
use tracing::instrument;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One path per line, with a heading
    #[default]
    Plain,
    /// A JSON array of paths
    Json,
}

impl OutputFormat {
    /// Print a list of paths, or `empty` if there are none.
    fn print(self, heading: &str, paths: &[PathBuf], empty: &str) -> anyhow::Result<()> {
        match self {
            Self::Json => {
                let paths: Vec<_> = paths.iter().map(|p| p.display().to_string()).collect();
                println!("{}", serde_json::to_string_pretty(&paths)?);
            }
            Self::Plain => {
                println!("{heading}");
                if paths.is_empty() {
                    println!("{}", empty.warning());
                }
                for path in paths {
                    println!("{}", path.display().to_string().success());
                }
                if !paths.is_empty() {
                    println!("{}", format!("{} note(s)", paths.len()).dim());
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The root of the notes directory (created if missing)
    #[arg(short, long, env = "NOTES_ROOT", default_value = DEFAULT_ROOT, global = true)]
    root: PathBuf,

    /// The editor notes are opened with
    #[arg(long, env = "EDITOR", default_value = DEFAULT_EDITOR, global = true)]
    editor: String,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let root = std::path::absolute(&self.root)?;
        let config = Config::new(root).with_editor(self.editor);

        self.command.run(config)
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
            .with_writer(std::io::stderr)
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
    /// Create a note from a template and open it in the editor
    ///
    /// If the note already exists you will be asked whether to overwrite it
    /// or open it as it is.
    Create(Create),

    /// Search notes by filename, or by filename and content
    Search(Search),

    /// List notes, optionally only those whose path contains a filter
    List(List),

    /// Remove a note
    Remove(Remove),

    /// Print a shell completion script
    Completions(Completions),
}

impl Command {
    fn run(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Create(command) => command.run(config)?,
            Self::Search(command) => command.run(config)?,
            Self::List(command) => command.run(config)?,
            Self::Remove(command) => command.run(config)?,
            Self::Completions(command) => command.run(),
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Create {
    /// The subdirectory of the notes root (nested paths are allowed)
    subdirectory: PathBuf,

    /// The name of the note, without extension
    filename: String,

    /// The file extension, which selects the template [default: tex]
    extension: Option<String>,
}

impl Create {
    #[instrument]
    fn run(self, config: Config) -> anyhow::Result<()> {
        let extension = self
            .extension
            .unwrap_or_else(|| config.default_extension().to_string());

        if config.templates().get(&extension).is_none() {
            let known: Vec<_> = config.templates().extensions().collect();
            tracing::info!(
                "No template for '.{extension}' (templates exist for {}), the note will start empty",
                known.join(", ")
            );
        }

        let location = NoteLocation::new(self.subdirectory, self.filename, extension)?;
        let directory = Directory::open(config)?;
        let editor = ExternalEditor::from_config(directory.config());

        let outcome = directory.create(&location, &mut LinePrompt::stdin(), &editor)?;
        println!("{}", outcome.to_string().success());

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Remove {
    /// The subdirectory of the notes root
    subdirectory: PathBuf,

    /// The name of the note, without extension
    filename: String,

    /// The file extension [default: tex]
    extension: Option<String>,
}

impl Remove {
    #[instrument]
    fn run(self, config: Config) -> anyhow::Result<()> {
        let extension = self
            .extension
            .unwrap_or_else(|| config.default_extension().to_string());
        let location = NoteLocation::new(self.subdirectory, self.filename, extension)?;
        let directory = Directory::open(config)?;

        match directory.delete(&location) {
            Ok(path) => {
                println!(
                    "{}",
                    format!("Note at {} removed successfully", path.display()).success()
                );
                Ok(())
            }
            Err(DeleteError::NotFound(path)) => {
                anyhow::bail!("Note does not exist: {}", path.display())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Completions {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

impl Completions {
    fn run(self) {
        let mut cmd = Cli::command();
        clap_complete::generate(self.shell, &mut cmd, "notes", &mut std::io::stdout());
    }
}
