use std::path::PathBuf;

use clap::{Parser, Subcommand};

use scratchpad_frameworks::DEFAULT_SENTINEL;

#[derive(Parser, Debug)]
#[command(
    name = "scratchpad",
    about = "Batch maintenance for reasoning-framework YAML records",
    arg_required_else_help = true
)]
pub(crate) struct Cli {
    /// Debug logging.
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub(crate) verbose: bool,

    /// Warnings and errors only.
    #[arg(long, short = 'q', global = true)]
    pub(crate) quiet: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Fill missing version / purpose / use_case from templates.
    Backfill {
        /// Frameworks directory (default: $SCRATCHPAD_DIR/frameworks or ./frameworks)
        dir: Option<PathBuf>,
    },
    /// Re-emit every record in canonical YAML.
    Normalize {
        /// Frameworks directory
        dir: Option<PathBuf>,
    },
    /// Convert markup content into framework.structure.
    Convert {
        /// Frameworks directory
        dir: Option<PathBuf>,

        /// Tag that marks legacy content as convertible
        #[arg(long, default_value = DEFAULT_SENTINEL)]
        sentinel: String,

        /// Keep `content` next to the new structure
        #[arg(long)]
        keep_content: bool,
    },
    /// Prepend a missing `---` document marker.
    Markers {
        /// Frameworks directory
        dir: Option<PathBuf>,
    },
    /// Check YAML syntax of explicit files.
    Validate {
        /// Files to check; non-YAML paths are ignored
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Also require name / category / documentation / framework
        #[arg(long)]
        strict: bool,
    },
    /// Generate the reference and comparison markdown.
    Docs {
        /// Base directory holding `frameworks/`
        #[arg(long, value_name = "DIR")]
        base: Option<PathBuf>,

        /// Output directory (default: <base>/docs)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Print a JSON inventory (size + sha256) of every file.
    Inventory {
        /// Root to scan
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

impl Cli {
    /// Default log directive for the workspace crates.
    pub(crate) fn log_directive(&self) -> String {
        let level = if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        };
        ["scratchpad", "scratchpad_cli", "scratchpad_frameworks", "scratchpad_io"]
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}
