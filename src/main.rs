use clap::Parser;
use potlist::{Cli, OutputFormatter, OutputMode, PotList, PotListError, UserFriendlyError};
use std::path::PathBuf;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let potlist = match PotList::from_cli(&cli) {
        Ok(potlist) => potlist,
        Err(e) => {
            print_startup_error(&cli, &e);
            return e.exit_code();
        }
    };

    if cli.dry_run {
        return handle_dry_run(&potlist);
    }

    match potlist.generate() {
        Ok(report) => {
            potlist.output_formatter().print_generation_report(&report);
            0
        }
        Err(e) => {
            potlist.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("potlist.toml"));

    match PotList::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path.display());
            println!("\nTo use this configuration:");
            println!("  potlist --config {}", config_path.display());
            println!("\nPlace it in the project root as potlist.toml to pick it up automatically.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

// Manifest lines go to stdout; everything else is the usual diagnostics.
fn handle_dry_run(potlist: &PotList) -> i32 {
    let formatter = potlist.output_formatter();

    match potlist.preview() {
        Ok((manifest, report)) => {
            if formatter.mode() == OutputMode::Json {
                let json_output = serde_json::json!({
                    "report": report,
                    "entries": manifest.entries().collect::<Vec<_>>(),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json_output).unwrap_or_else(|_| "{}".to_string())
                );
                return 0;
            }

            formatter.info("DRY RUN MODE - manifest will not be written");
            formatter.print_separator();
            for entry in manifest.entries() {
                println!("{}", entry);
            }
            formatter.print_separator();
            formatter.print_generation_report(&report);
            0
        }
        Err(e) => {
            potlist.handle_error(&e);
            e.exit_code()
        }
    }
}

fn print_startup_error(cli: &Cli, error: &PotListError) {
    let formatter = OutputFormatter::new(cli.output_mode(), 0, false);
    formatter.print_user_friendly_error(error);
}
