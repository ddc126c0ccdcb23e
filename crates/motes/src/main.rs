mod app;
mod cli;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use motes_config::Config;
use motes_intake::{JsonFileStore, SubmissionSink};
use ratatui::DefaultTerminal;

use crate::app::App;
use crate::cli::{Cli, Commands, SubmitArgs};

const LOG_FILE: &str = "motes.log";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match &cli.command {
        None => run_scene(&cli),
        Some(Commands::Submit(args)) => {
            init_logging(None)?;
            submit(&cli, args)
        }
        Some(Commands::Config { init }) => {
            init_logging(None)?;
            show_config(&cli, *init)
        }
    }
}

/// Run the animated scene until the user quits.
fn run_scene(cli: &Cli) -> color_eyre::Result<()> {
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| motes_config::data_dir().map(|dir| dir.join(LOG_FILE)));
    if let Some(path) = &log_file {
        init_logging(Some(path))?;
    }
    let config = load_config(cli)?;

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &config, cli.seed);
    if let Err(err) = execute!(io::stdout(), DisableMouseCapture) {
        log::warn!("failed to disable mouse capture: {err}");
    }
    ratatui::restore();
    result
}

fn run_app(
    terminal: &mut DefaultTerminal,
    config: &Config,
    seed: Option<u64>,
) -> color_eyre::Result<()> {
    execute!(io::stdout(), EnableMouseCapture)?;
    let size = terminal.size()?;
    log::info!("starting scene at {}x{} cells", size.width, size.height);
    App::new(config, seed, size.width, size.height).run(terminal)
}

/// Validate and store one enquiry, printing its id.
fn submit(cli: &Cli, args: &SubmitArgs) -> color_eyre::Result<()> {
    let store_path = match &args.store {
        Some(path) => path.clone(),
        None => load_config(cli)?
            .intake
            .store_path()
            .ok_or_else(|| eyre!("no submission store configured, pass --store"))?,
    };
    let mut store = JsonFileStore::new(&store_path);
    let record = store
        .submit(args.to_form())
        .wrap_err_with(|| format!("failed to store submission in {}", store_path.display()))?;
    println!("{}", record.id);
    Ok(())
}

/// Print the effective configuration, or write it with `--init`.
fn show_config(cli: &Cli, init: bool) -> color_eyre::Result<()> {
    let config = load_config(cli)?;
    if !init {
        print!("{}", config.to_toml()?);
        return Ok(());
    }
    let path = match &cli.config {
        Some(path) => {
            config.save(path)?;
            path.clone()
        }
        None => config.save_default()?,
    };
    println!("wrote {}", path.display());
    Ok(())
}

fn load_config(cli: &Cli) -> color_eyre::Result<Config> {
    Config::load(cli.config.as_deref()).wrap_err("failed to load configuration")
}

/// Initialize `env_logger`, writing to `log_file` or stderr.
///
/// `RUST_LOG` overrides the default `info` filter.
fn init_logging(log_file: Option<&Path>) -> color_eyre::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(path) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(open_log(path)?)));
    }
    builder.init();
    Ok(())
}

fn open_log(path: &Path) -> color_eyre::Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))
}
