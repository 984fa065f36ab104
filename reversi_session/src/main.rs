use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reversi::{PlayerMode, Request};
use reversi_session::{
    parse_player_mode, Config, FileStorage, Outgoing, Recorder, Session, SessionConfig,
};
use tokio::sync::mpsc;
use tracing::{info, trace, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Plays Reversi over JSON lines: requests on stdin, responses and events on stdout.
#[derive(Parser)]
struct Args {
    /// Where the game is saved and resumed from [default: reversi.txt]
    #[arg(long)]
    save_file: Option<PathBuf>,

    /// Path to a JSON config file. Command line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mode of the dark side, "manual" or "automated"
    #[arg(long, value_parser = parse_player_mode)]
    dark: Option<PlayerMode>,

    /// Mode of the light side, "manual" or "automated"
    #[arg(long, value_parser = parse_player_mode)]
    light: Option<PlayerMode>,

    /// How long an automated side waits before moving [default: 2000]
    #[arg(long)]
    automated_delay_ms: Option<u64>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Record finished games as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let from_file = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let settings = from_file.merge(SessionConfig {
        save_file: args.save_file,
        automated_delay_ms: args.automated_delay_ms,
        dark: args.dark,
        light: args.light,
        record_games_to_directory: args.record_games_to_directory,
    });

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let recorder = if let Some(dir_path) = settings.record_games_to_directory.clone() {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };
    let config = Config {
        rng: StdRng::seed_from_u64(seed),
        recorder,
        automated_delay: settings.automated_delay(),
        mode_overrides: settings.mode_overrides(),
    };
    let storage = FileStorage::new(settings.save_file());
    info!(save_file = %storage.path().display(), "Starting session");

    let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();
    let (request_tx, request_rx) = mpsc::channel(16);
    let session = Session::new(config, storage, outgoing_tx);

    // Blocking stdin reads must not keep the runtime from shutting down
    std::thread::spawn(move || {
        if let Err(err) = read_requests(request_tx) {
            warn!(%err, "Stopped reading requests");
        }
    });
    let writer = tokio::task::spawn_blocking(move || write_outgoing(outgoing_rx));

    session.run(request_rx).await;
    writer.await??;
    Ok(())
}

fn read_requests(requests: mpsc::Sender<Request>) -> anyhow::Result<()> {
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Request>(line) {
            Ok(request) => {
                trace!(name: "Received request", request = %line);
                if requests.blocking_send(request).is_err() {
                    break;
                }
            }
            Err(err) => warn!(%err, line, "Ignoring malformed request"),
        }
    }
    Ok(())
}

/// Runs until the session drops its sender.
fn write_outgoing(mut outgoing: mpsc::UnboundedReceiver<Outgoing>) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    while let Some(message) = outgoing.blocking_recv() {
        let mut json = serde_json::to_string(&message)?;
        trace!(name: "Sending message", message = %json);
        json.push('\n');
        stdout.write_all(json.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // stdout belongs to the protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
