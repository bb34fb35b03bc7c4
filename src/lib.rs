pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod root;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ManifestConfig, ScanConfig};
pub use error::{PotListError, Result, UserFriendlyError};

// Core functionality re-exports
pub use manifest::{build_manifest, render_manifest, write_manifest, GenerationReport, Manifest};
pub use root::{project_root_from_executable, resolve_project_root};
pub use scanner::{FileFilter, ScanEvent, ScanStatistics, SourceScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressAwareOutput, ProgressManager};

use std::path::{Path, PathBuf};

/// Main library interface for one manifest generation run
pub struct PotList {
    config: Config,
    project_root: PathBuf,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl PotList {
    pub fn new(
        config: Config,
        project_root: PathBuf,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        // Spinner only in human mode, and not while per-line progress is printed.
        let show_spinner = output_mode == OutputMode::Human && !quiet && verbose == 0;
        let progress_manager = ProgressManager::new(show_spinner);

        Self {
            config,
            project_root,
            output_formatter,
            progress_manager,
        }
    }

    /// Create PotList instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let project_root = resolve_project_root(cli_args.root.as_deref())?;
        let config = cli_args.load_config(&project_root)?;

        Ok(Self::new(
            config,
            project_root,
            cli_args.output_mode(),
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Scan the project, write the manifest and report what was written.
    pub fn generate(&self) -> Result<GenerationReport> {
        let manifest_path = self.manifest_path();
        self.output_formatter.start_operation(&format!(
            "Generate {} from {}",
            manifest_path.display(),
            self.project_root.display()
        ));

        let (manifest, statistics) = self.scan_sources()?;
        write_manifest(&manifest_path, manifest.entries())?;

        self.output_formatter.success(&format!(
            "Generated {} ({} entries)",
            manifest_path.display(),
            manifest.len()
        ));

        Ok(GenerationReport::new(
            &self.project_root,
            &manifest_path,
            &manifest,
            statistics,
            false,
        ))
    }

    /// Scan the project without touching the manifest file.
    pub fn preview(&self) -> Result<(Manifest, GenerationReport)> {
        let (manifest, statistics) = self.scan_sources()?;
        let report = GenerationReport::new(
            &self.project_root,
            &self.manifest_path(),
            &manifest,
            statistics,
            true,
        );
        Ok((manifest, report))
    }

    fn scan_sources(&self) -> Result<(Manifest, ScanStatistics)> {
        self.output_formatter
            .start_operation("Scanning source tree");

        let scanner = SourceScanner::new(&self.config.scan)?;
        let spinner = self.progress_manager.create_scan_spinner();
        let output = ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));
        let progress_callback = |event: ScanEvent<'_>| {
            match event {
                ScanEvent::Directory(dir) => ui::progress::update_scan_progress(&spinner, dir),
                ScanEvent::File(_) => spinner.inc(1),
            }
            output.scan_event(event);
        };

        let result = build_manifest(
            &scanner,
            &self.project_root,
            &self.config.manifest.supplementary,
            Some(&progress_callback),
        );

        let (manifest, statistics) = match result {
            Ok(built) => built,
            Err(e) => {
                spinner.abandon();
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(
            &spinner,
            &format!("Found {} source files", statistics.files_matched),
            statistics.elapsed,
        );

        if manifest.discovered().is_empty() {
            output.warning(&format!(
                "No *{} files found below '{}'",
                scanner.filter().suffixes().join(", *"),
                scanner.filter().subtree_marker()
            ));
        }
        self.output_formatter.debug(&statistics.display_summary());

        Ok((manifest, statistics))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.config.manifest_path(&self.project_root)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &PotListError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}
