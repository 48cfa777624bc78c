use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tauri_iconsmith::{InteractivePrompter, Project, TauriIconCli, run, ui};

/// Generate platform icons for a Tauri project from assets/icon.{svg,png,jpg,jpeg}.
#[derive(Debug, Parser)]
#[command(name = "iconsmith", version, about)]
struct Cli {
    /// Root of the Tauri project.
    #[arg(default_value = ".")]
    root: PathBuf,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let project = Project::new(&cli.root);
    let generator = TauriIconCli::new(project.root());
    let mut prompter = InteractivePrompter::new();

    match run(&project, &mut prompter, &generator) {
        Ok(report) => {
            let names: Vec<&str> = report
                .rendered
                .iter()
                .map(|platform| platform.display_name())
                .collect();
            ui::print_success(&format!("Icons generated for {}", names.join(", ")));
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            ui::print_error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}
