//! testdeck - A terminal dashboard for JUnit test executions
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use testdeck_app::config::{self, Settings};
use testdeck_client::{HttpTestService, RunResponse, TestService};
use tracing::{error, info};

/// testdeck - Browse, run and inspect JUnit test executions
#[derive(Parser, Debug)]
#[command(name = "testdeck", version)]
#[command(about = "A terminal dashboard for JUnit test executions", long_about = None)]
struct Args {
    /// Project directory holding `.testdeck/config.toml`
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Test execution service API root, e.g. http://localhost:8080/api
    #[arg(long, value_name = "URL", global = true)]
    server: Option<String>,

    /// Read settings from this file instead of the project config
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default `.testdeck/config.toml` into the project
    Init,
    /// Submit a run for the given test classes and print the execution id
    Run {
        /// Fully qualified class names
        #[arg(value_name = "CLASS", required = true)]
        classes: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // Get project path from args or use current directory
    let project = args
        .path
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if let Err(e) = testdeck_core::logging::init() {
        eprintln!("Logging disabled: {e}");
    }

    if let Some(Command::Init) = args.command {
        let path = config::init_config_dir(&project)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let settings = resolve_settings(&project, &args)?;
    let service = HttpTestService::new(
        &settings.server.base_url,
        settings.server.request_timeout(),
    )?;

    match args.command {
        Some(Command::Run { classes }) => run_once(&service, &classes).await,
        _ => {
            testdeck_tui::run(service, settings).await?;
            Ok(())
        }
    }
}

/// Settings file, then environment, then command line
fn resolve_settings(project: &Path, args: &Args) -> color_eyre::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => config::load_settings_file(path)?,
        None => config::load_settings(project),
    };
    config::apply_env_overrides(&mut settings);
    if let Some(server) = &args.server {
        settings.server.base_url = server.clone();
    }
    info!("Using server {}", settings.server.base_url);
    Ok(settings)
}

/// Headless `run`: submit once, print the execution id
async fn run_once(service: &HttpTestService, classes: &[String]) -> color_eyre::Result<()> {
    let response = service.submit_run(classes).await?;
    let id = accepted_execution(&response)?;
    println!("{id}");
    Ok(())
}

/// Execution id of an accepted run; a rejection becomes the command's error
fn accepted_execution(response: &RunResponse) -> color_eyre::Result<String> {
    match response.accepted_id() {
        Some(id) => Ok(id.to_string()),
        None => {
            let message = response.rejection_message();
            error!("{}", message);
            Err(eyre!(message))
        }
    }
}
