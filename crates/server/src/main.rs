// crates/server/src/main.rs
//! pickban-relay binary.
//!
//! Reads champ select events (recording via `--data`, otherwise stdin),
//! runs them through the lifecycle controller, and forwards picks and bans to
//! the herofest websocket unless `--no-herofest` is given.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use pickban_core::{
    ChampionCatalog, Config, Converter, InMemorySummonerCache, Overrides, StaticCatalog,
    SummonerCache,
};
use pickban_observability::{init_logging, LogConfig};
use pickban_server::{
    spawn_tee, Controller, FixedDelay, JsonLinesProvider, OutboundSocket, ProviderEvent, Recorder,
};
use pickban_types::StateEvent;

/// Capacity of the provider → controller channel.
const PROVIDER_CHANNEL_CAPACITY: usize = 256;
const STATE_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Parser)]
#[command(
    name = "pickban-relay",
    version,
    about = "Forward champ select picks and bans to a broadcast overlay"
)]
struct Args {
    /// Config file (TOML). Defaults to <config_dir>/pickban-relay/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay a recorded session instead of reading events from stdin.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Record every incoming event to this file.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Pause between replayed events, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    replay_interval_ms: u64,

    /// Disable forwarding to the herofest websocket.
    #[arg(long)]
    no_herofest: bool,

    /// Override the herofest websocket endpoint.
    #[arg(long)]
    herofest_ws: Option<String>,

    /// Override the asset host prefix for artwork URLs.
    #[arg(long)]
    herofest_host: Option<String>,

    /// Data Dragon champion.json used to resolve names and artwork.
    #[arg(long)]
    champions: Option<PathBuf>,

    #[arg(long)]
    debug: bool,

    /// Also write JSON logs (daily rotation) to this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            herofest_enabled: self.no_herofest.then_some(false),
            herofest_ws: self.herofest_ws.clone(),
            herofest_host: self.herofest_host.clone(),
            champions: self.champions.clone(),
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let path = args.config.clone().or_else(Config::default_path);
    let config = match path {
        Some(path) => {
            Config::load(&path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Config::default(),
    };
    Ok(config.with_overrides(args.overrides()))
}

fn load_catalog(config: &Config) -> Result<Arc<dyn ChampionCatalog>> {
    let Some(path) = &config.assets.champions else {
        warn!("no champion data configured; picks and bans cannot be forwarded");
        return Ok(Arc::new(StaticCatalog::empty()));
    };
    let catalog = StaticCatalog::load(path, &config.assets.version)
        .with_context(|| format!("loading champion data from {}", path.display()))?;
    info!(champions = catalog.len(), "champion catalog loaded");
    Ok(Arc::new(catalog))
}

/// Log lifecycle notifications for operators following along.
fn spawn_state_logger(mut rx: broadcast::Receiver<StateEvent>) {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(StateEvent::NewState { .. }) => {}
                Ok(event) => debug!(?event, "state event"),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "state logger lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Step 1: Logging (guard must outlive everything that logs)
    let _log_guard = init_logging(&LogConfig {
        debug: args.debug,
        log_dir: args.log_dir.clone(),
    });

    eprintln!("\n\u{1f3ae} pickban-relay v{}\n", env!("CARGO_PKG_VERSION"));

    // Step 2: Configuration and collaborators
    let config = Arc::new(load_config(&args)?);
    let catalog = load_catalog(&config)?;
    let summoners: Arc<dyn SummonerCache> = Arc::new(InMemorySummonerCache::new());
    let converter = Converter::new(catalog, summoners.clone());

    let (state_tx, state_rx) = broadcast::channel(STATE_EVENT_CAPACITY);
    spawn_state_logger(state_rx);

    // Step 3: Controller, with the outbound socket only when forwarding is on
    let mut controller = Controller::new(config.clone(), converter, summoners, state_tx);
    if config.herofest.enabled {
        let socket = OutboundSocket::spawn(config.herofest.clone(), FixedDelay::default());
        info!(url = socket.url(), "forwarding picks and bans to herofest");
        controller = controller.with_forwarder(Box::new(socket));
    } else {
        info!("herofest forwarding disabled");
    }

    // Step 4: Event source, optionally recorded
    let (provider_tx, controller_rx) = mpsc::channel::<ProviderEvent>(PROVIDER_CHANNEL_CAPACITY);
    let provider_tx = match &args.record {
        Some(path) => {
            let recorder = Recorder::create(path)
                .await
                .with_context(|| format!("creating recording {}", path.display()))?;
            let (raw_tx, raw_rx) = mpsc::channel(PROVIDER_CHANNEL_CAPACITY);
            spawn_tee(raw_rx, provider_tx, recorder);
            info!(path = %path.display(), "recording provider events");
            raw_tx
        }
        None => provider_tx,
    };

    let source = match &args.data {
        Some(path) => {
            let provider =
                JsonLinesProvider::open(path, Duration::from_millis(args.replay_interval_ms))
                    .await
                    .with_context(|| format!("opening recording {}", path.display()))?;
            info!(path = %path.display(), "replaying recorded session");
            tokio::spawn(provider.run(provider_tx))
        }
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            let provider = JsonLinesProvider::new(stdin, Duration::ZERO);
            tokio::spawn(provider.run(provider_tx))
        }
    };

    // Step 5: Run until input ends or Ctrl-C
    tokio::select! {
        _ = controller.run(controller_rx) => {
            match source.await {
                Ok(Err(e)) => warn!(error = %e, "event source failed"),
                Err(e) => warn!(error = %e, "event source task panicked"),
                Ok(Ok(_)) => {}
            }
        }
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }

    Ok(())
}
