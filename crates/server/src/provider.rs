// crates/server/src/provider.rs
//! Snapshot sources feeding the controller.
//!
//! Live acquisition from the game client happens outside this process. Events
//! arrive as JSON lines, either from a recording (`--data`) or from stdin, and
//! can be teed to a new recording (`--record`).
//!
//! Line format:
//! ```json
//! {"at":"2024-05-01T18:00:00Z","event":{"kind":"snapshot","snapshot":{"isChampSelectActive":true}}}
//! {"event":{"kind":"connected"}}
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use pickban_types::Snapshot;

use crate::error::ProviderError;

/// What the external provider delivers, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "snapshot", rename_all = "snake_case")]
pub enum ProviderEvent {
    Connected,
    Disconnected,
    Snapshot(Snapshot),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Utc>>,
    pub event: ProviderEvent,
}

/// Reads recorded events line by line and forwards them to the controller.
pub struct JsonLinesProvider<R> {
    reader: R,
    /// Pause between events; zero for live input.
    interval: Duration,
}

impl JsonLinesProvider<BufReader<File>> {
    pub async fn open(path: &Path, interval: Duration) -> Result<Self, ProviderError> {
        let file = File::open(path).await.map_err(|e| ProviderError::io(path, e))?;
        Ok(Self::new(BufReader::new(file), interval))
    }
}

impl<R: AsyncBufRead + Unpin> JsonLinesProvider<R> {
    pub fn new(reader: R, interval: Duration) -> Self {
        Self { reader, interval }
    }

    /// Forward every event until EOF. Returns the number of events sent.
    pub async fn run(mut self, tx: mpsc::Sender<ProviderEvent>) -> Result<usize, ProviderError> {
        let mut line = String::new();
        let mut line_no = 0;
        let mut sent = 0;

        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .await
                .map_err(|e| ProviderError::io("<input>", e))?;
            if read == 0 {
                break;
            }
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }

            let recorded: RecordedEvent =
                serde_json::from_str(&line).map_err(|e| ProviderError::MalformedLine {
                    line: line_no,
                    message: e.to_string(),
                })?;

            if sent > 0 && !self.interval.is_zero() {
                tokio::time::sleep(self.interval).await;
            }
            tx.send(recorded.event)
                .await
                .map_err(|_| ProviderError::ChannelClosed)?;
            sent += 1;
        }

        info!(events = sent, "provider input exhausted");
        Ok(sent)
    }
}

/// Appends provider events to a JSON-lines file.
pub struct Recorder {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl Recorder {
    pub async fn create(path: &Path) -> Result<Self, ProviderError> {
        let file = File::create(path).await.map_err(|e| ProviderError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub async fn record(&mut self, event: &ProviderEvent) -> Result<(), ProviderError> {
        let recorded = RecordedEvent {
            at: Some(Utc::now()),
            event: event.clone(),
        };
        let mut line = serde_json::to_string(&recorded)?;
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| ProviderError::io(&self.path, e))?;
        self.writer
            .flush()
            .await
            .map_err(|e| ProviderError::io(&self.path, e))
    }
}

/// Record everything passing from `rx` to `tx`, preserving order.
///
/// Recording failures are logged and never stop forwarding.
pub fn spawn_tee(
    mut rx: mpsc::Receiver<ProviderEvent>,
    tx: mpsc::Sender<ProviderEvent>,
    mut recorder: Recorder,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Err(e) = recorder.record(&event).await {
                warn!(error = %e, "failed to record provider event");
            }
            if tx.send(event).await.is_err() {
                debug!("controller gone, stopping recorder");
                break;
            }
        }
    })
}
