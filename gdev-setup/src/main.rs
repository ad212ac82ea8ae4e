//! Set up a local development environment.
//!
//! Runs the steps in `<work-dir>/.gdev/gdev.setup.yaml` one at a time, trying
//! each step's fixes when it fails and printing its known issues when nothing
//! helps. Command output is kept in a temporary log directory.

use std::fs;
use std::io::stdout;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{info, warn};

use gdev_setup::exit_codes;
use gdev_setup::io::config::{default_config_path, effective_timeout, load_plan};
use gdev_setup::io::context::{ExecutionContext, create_log_dir};
use gdev_setup::io::process::ShellCommandRunner;
use gdev_setup::logging;
use gdev_setup::render::{EventPrinter, OutputFormat};
use gdev_setup::setup::run_plan;

#[derive(Parser)]
#[command(
    name = "gdev-setup",
    version,
    about = "Set up local development environment"
)]
struct Cli {
    /// The application directory.
    #[arg(
        long = "work-dir",
        alias = "workDir",
        env = "GDEV_SETUP_WORK_DIR",
        default_value = ".",
        global = true
    )]
    work_dir: PathBuf,

    /// Setup config to use instead of `<work-dir>/.gdev/gdev.setup.yaml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Kill any step or fix command running longer than this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Progress output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Diagnostics on stderr (`-v` info, `-vv` debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Load and check the setup config without running any step.
    Validate,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let work_dir = resolve_work_dir(&cli.work_dir)?;
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| default_config_path(&work_dir));

    match &cli.command {
        Some(Command::Validate) => cmd_validate(&config_path),
        None => cmd_setup(&cli, &work_dir, &config_path),
    }
}

fn cmd_validate(config_path: &Path) -> Result<i32> {
    let plan = load_plan(config_path)?;
    println!(
        "{} is valid ({} steps)",
        config_path.display(),
        plan.steps.len()
    );
    Ok(exit_codes::OK)
}

fn cmd_setup(cli: &Cli, work_dir: &Path, config_path: &Path) -> Result<i32> {
    let plan = load_plan(config_path)?;
    let timeout = effective_timeout(&plan.settings, cli.timeout_secs)?;
    let log_dir = create_log_dir()?;
    info!(log_dir = %log_dir.display(), work_dir = %work_dir.display(), "starting setup");

    let context = ExecutionContext::new(work_dir, log_dir).with_timeout(timeout);
    let runner = ShellCommandRunner::new(plan.settings.shell.clone());
    let mut printer = EventPrinter::new(cli.format, stdout().lock());

    let result = run_plan(&runner, &context, &plan, |event| {
        if let Err(err) = printer.print(event) {
            warn!(step = event.step(), err = %err, "failed to write progress output");
        }
    });

    match result {
        Ok(outcome) => {
            info!(
                steps = outcome.steps.len(),
                fixes_applied = outcome.fixes_applied(),
                "setup complete"
            );
            Ok(exit_codes::OK)
        }
        Err(err) => {
            eprintln!("{:#}", anyhow::Error::from(err));
            Ok(exit_codes::SETUP_FAILED)
        }
    }
}

fn resolve_work_dir(work_dir: &Path) -> Result<PathBuf> {
    fs::canonicalize(work_dir)
        .with_context(|| format!("resolve work dir {}", work_dir.display()))
}
