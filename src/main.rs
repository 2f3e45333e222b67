use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use voicemap::assistant::{listen, Assistant, AssistantState, CommandPipeline};
use voicemap::config::Config;
use voicemap::geo::Coordinate;
use voicemap::geocode::NominatimClient;
use voicemap::intent::{CommandClassifier, IntentDispatcher, RuleClassifier};
use voicemap::logging::{init_tracing, LogFormat};
use voicemap::map::MapView;
use voicemap::position::{locate_once, FixedPosition};
use voicemap::shutdown::ShutdownHandle;
use voicemap::voice::{LineRecognizer, VoiceSession};

const TRANSCRIPT_QUEUE: usize = 16;

#[derive(Debug, Parser)]
#[command(name = "voicemap", version, about = "Voice-driven map assistant")]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Diagnostic log format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// Classify commands in-process instead of calling the intent backend
    #[arg(long, global = true)]
    local: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Listen for utterances, one per line on stdin (default)
    Listen,
    /// Process a single command and print the resulting state
    Run {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Serve the intent-classification endpoint
    Serve {
        /// Bind address, overriding the config
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    let shutdown = ShutdownHandle::new();
    shutdown.signal_on_ctrl_c();

    match cli.command.unwrap_or(Command::Listen) {
        Command::Serve { bind } => {
            let addr = match bind {
                Some(addr) => addr,
                None => config
                    .server
                    .bind_addr
                    .parse()
                    .context("parsing server.bind_addr")?,
            };
            voicemap::server::serve(addr, shutdown).await?;
        }
        Command::Run { words } => {
            let assistant = build_assistant(&config, cli.local).await?;
            assistant.handle_transcript(&words.join(" ")).await;
            print_state(&assistant.snapshot())?;
        }
        Command::Listen => {
            let assistant = build_assistant(&config, cli.local).await?;
            let (tx, rx) = mpsc::channel(TRANSCRIPT_QUEUE);
            let mut session =
                VoiceSession::new(Box::new(LineRecognizer::stdin()), tx, config.voice.continuous);

            let mut updates = assistant.subscribe();
            let printer = tokio::spawn(async move {
                while updates.changed().await.is_ok() {
                    let state = updates.borrow_and_update().clone();
                    if let Err(e) = print_state(&state) {
                        tracing::error!(error = %e, "Failed to render state");
                    }
                }
            });

            let result = listen(&assistant, &mut session, rx, shutdown).await;
            drop(session);
            drop(assistant);
            let _ = printer.await;
            result?;
        }
    }

    Ok(())
}

async fn build_assistant(config: &Config, local: bool) -> anyhow::Result<Assistant> {
    let classifier: Arc<dyn CommandClassifier> = if local {
        tracing::info!("Classifying commands locally");
        Arc::new(RuleClassifier::new())
    } else {
        let dispatcher =
            IntentDispatcher::new(&config.intent).context("building intent client")?;
        tracing::info!(endpoint = dispatcher.endpoint(), "Using intent backend");
        Arc::new(dispatcher)
    };
    let geocoder =
        Arc::new(NominatimClient::new(&config.geocode).context("building geocode client")?);

    let current = locate_once(&FixedPosition::from_config(config.position.as_ref())).await;
    let pipeline = CommandPipeline::new(
        geocoder,
        current,
        Duration::from_secs(u64::from(config.geocode.timeout_seconds)),
    );
    match pipeline.current_location() {
        Some(position) => tracing::info!(
            latitude = position.latitude,
            longitude = position.longitude,
            "Current location known"
        ),
        None => tracing::info!("Current location unavailable"),
    }

    let center = Coordinate::new(config.map.initial_latitude, config.map.initial_longitude);
    Ok(Assistant::new(
        classifier,
        pipeline,
        MapView::new(center, config.map.initial_zoom),
    ))
}

/// Writes the state as one JSON line on stdout and any failure on stderr.
fn print_state(state: &AssistantState) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(state)?);
    if let Some(error) = &state.last_error {
        eprintln!("error: {}", error);
    }
    Ok(())
}
