use clap::Parser;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use studyroom_core::{
    parse_total_minutes, CoreError, Session, SessionConfig, SessionOutcome, TokioTickScheduler,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

mod input;
mod prompt;
mod terminal;

const EVENT_QUEUE_CAPACITY: usize = 32;

#[derive(Parser)]
#[command(name = "studyroom", version, about = "Terminal Pomodoro study timer")]
struct Cli {
    /// Total study time in minutes (asked interactively when omitted)
    #[arg(long, allow_hyphen_values = true)]
    minutes: Option<String>,
    /// Write logs to this file; the timer screen owns the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Print the session outcome as JSON on exit
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(cli.log_file.as_deref())?;

    let minutes = match cli.minutes {
        Some(raw) => parse_total_minutes(&raw)?,
        None => prompt::ask_total_minutes(&mut io::stdin().lock(), &mut io::stdout())?,
    };
    let config = SessionConfig::with_total_minutes(minutes)?;
    tracing::info!(minutes, "configuration accepted");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(run_session(config))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.summary());
    }
    Ok(())
}

/// Owns the terminal for the lifetime of one session.
async fn run_session(config: SessionConfig) -> Result<SessionOutcome, CoreError> {
    let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    let scheduler = TokioTickScheduler::new(tx.clone());

    let _screen = terminal::TerminalGuard::enter()?;
    let renderer = terminal::TerminalRenderer::new(io::stdout());
    let input = input::spawn(tx);

    let result = Session::new(config, scheduler, renderer, rx).run().await;
    input.abort();
    result
}

fn init_tracing(log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}
