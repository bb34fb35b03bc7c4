use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "potlist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate the source file list for translatable-string extraction")]
#[command(
    long_about = "PotList walks the project source tree, keeps the sources below the \
                  configured subtree marker, appends a fixed list of extra files and writes \
                  the result to localization/i18n/list.txt for the string extractor."
)]
#[command(after_help = "EXAMPLES:\n  \
    potlist\n  \
    potlist --root ~/src/slicer --verbose\n  \
    potlist --marker src/slic3r/ --extensions cpp,hpp --exclude build\n  \
    potlist --dry-run --output-format plain")]
pub struct Cli {
    /// Project root (defaults to two levels above the executable)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Manifest path, relative to the project root unless absolute
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directories whose relative path contains this marker are scanned
    #[arg(short, long)]
    pub marker: Option<String>,

    /// File extensions to collect (comma-separated)
    #[arg(short, long, help = "File extensions to collect (e.g., cpp,hpp)")]
    pub extensions: Option<String>,

    /// Directory names to skip entirely
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Do not append the supplementary file list
    #[arg(long)]
    pub no_supplementary: bool,

    /// Keep walk order instead of sorting discovered entries
    #[arg(long)]
    pub traversal_order: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the manifest instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self, project_root: &Path) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref(), project_root)?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_subtree_marker(self.marker.clone())
            .with_extensions(self.extensions.clone())
            .with_exclude_dirs(self.exclude.clone())
            .with_manifest_path(self.output.clone())
            .with_supplementary(self.no_supplementary.then_some(false))
            .with_sort_entries(self.traversal_order.then_some(false))
    }

    pub fn output_mode(&self) -> OutputMode {
        match self.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
