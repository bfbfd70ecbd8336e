// crates/server/src/socket.rs
//! Outbound websocket to the presentation consumer ("herofest").
//!
//! One supervisor task owns at most one live link at a time. Every attempt
//! builds a fresh link; whenever a link closes (clean close, stream end,
//! read/write failure, or a failed connect) exactly one new attempt is made
//! after the reconnect policy's delay. There is no retry cap.
//!
//! Sending never blocks and never buffers: a message goes out only if a link
//! is open at the time of the call, otherwise it is discarded with a warning.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{client_async_tls, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use pickban_core::{HerofestConfig, PickBanEvent, RECONNECT_DELAY};

use crate::error::SocketError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Decides how long to wait before the next connection attempt.
///
/// Kept separate from the supervisor so backoff or jitter can be added
/// without touching the controller.
pub trait ReconnectPolicy: Send + 'static {
    fn next_delay(&mut self) -> Duration;
}

/// Constant delay, unbounded retries.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl Default for FixedDelay {
    fn default() -> Self {
        Self(RECONNECT_DELAY)
    }
}

impl ReconnectPolicy for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// No open link; the message was dropped.
    Discarded,
}

/// Link state, observable through [`OutboundSocket::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Connecting { attempt: u64 },
    Open { attempt: u64 },
    Closed { attempt: u64 },
}

impl LinkStatus {
    pub fn attempt(&self) -> u64 {
        match self {
            Self::Connecting { attempt } | Self::Open { attempt } | Self::Closed { attempt } => {
                *attempt
            }
        }
    }
}

/// Where forwarded pick/ban events go.
pub trait PickBanSink: Send + Sync {
    fn send(&self, event: &PickBanEvent) -> Result<SendOutcome, SocketError>;
}

struct Link {
    attempt: u64,
    tx: mpsc::UnboundedSender<Message>,
}

type SharedLink = Arc<Mutex<Option<Link>>>;

fn lock(link: &SharedLink) -> MutexGuard<'_, Option<Link>> {
    // The guarded value is a plain Option; a poisoned lock still holds a usable one.
    link.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle to the reconnecting socket. Dropping it stops the supervisor.
pub struct OutboundSocket {
    url: String,
    link: SharedLink,
    status: watch::Receiver<LinkStatus>,
    supervisor: JoinHandle<()>,
}

impl OutboundSocket {
    /// Start connecting to `config.ws` in the background.
    pub fn spawn(config: HerofestConfig, policy: impl ReconnectPolicy) -> Self {
        install_crypto_provider();
        let link: SharedLink = Arc::new(Mutex::new(None));
        let (status_tx, status) = watch::channel(LinkStatus::Connecting { attempt: 0 });
        let url = config.ws.clone();

        debug!(url = %url, "Connecting to herofest websocket");
        let supervisor = tokio::spawn(supervise(config, policy, link.clone(), status_tx));

        Self {
            url,
            link,
            status,
            supervisor,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_open(&self) -> bool {
        lock(&self.link).is_some()
    }

    pub fn status(&self) -> watch::Receiver<LinkStatus> {
        self.status.clone()
    }

    /// Queue a text frame on the open link, or discard it.
    pub fn send_text(&self, text: String) -> SendOutcome {
        let guard = lock(&self.link);
        let Some(link) = guard.as_ref() else {
            warn!("Had to discard herofest event because socket is not connected");
            return SendOutcome::Discarded;
        };
        match link.tx.send(Message::Text(text.into())) {
            Ok(()) => SendOutcome::Sent,
            Err(_) => {
                warn!(
                    attempt = link.attempt,
                    "Had to discard herofest event because socket is closing"
                );
                SendOutcome::Discarded
            }
        }
    }
}

impl PickBanSink for OutboundSocket {
    fn send(&self, event: &PickBanEvent) -> Result<SendOutcome, SocketError> {
        Ok(self.send_text(event.to_json()?))
    }
}

impl Drop for OutboundSocket {
    fn drop(&mut self) {
        self.supervisor.abort();
    }
}

/// rustls 0.23 panics on the first `wss://` handshake unless a process-level
/// crypto provider is installed. Installing twice is harmless.
fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}

async fn supervise(
    config: HerofestConfig,
    mut policy: impl ReconnectPolicy,
    link: SharedLink,
    status: watch::Sender<LinkStatus>,
) {
    let mut attempt: u64 = 0;
    loop {
        attempt += 1;
        let _ = status.send(LinkStatus::Connecting { attempt });

        match open_link(&config).await {
            Ok(ws) => {
                info!(url = %config.ws, attempt, "Connected to herofest websocket");
                let (tx, rx) = mpsc::unbounded_channel();
                *lock(&link) = Some(Link { attempt, tx });
                let _ = status.send(LinkStatus::Open { attempt });

                let result = pump(ws, rx).await;
                lock(&link).take();
                if let Err(e) = result {
                    error!(attempt, error = %e, "Error on herofest websocket");
                }
            }
            Err(e) => {
                error!(url = %config.ws, attempt, error = %e, "Error on herofest websocket");
            }
        }

        let _ = status.send(LinkStatus::Closed { attempt });
        let delay = policy.next_delay();
        info!(
            delay_ms = delay.as_millis() as u64,
            "Disconnected from herofest websocket, attempting reconnect"
        );
        tokio::time::sleep(delay).await;
    }
}

/// TCP connect bounded by `connect_timeout`, then the websocket handshake
/// bounded by `handshake_timeout`.
async fn open_link(config: &HerofestConfig) -> Result<WsStream, SocketError> {
    let request = config
        .ws
        .as_str()
        .into_client_request()
        .map_err(|_| SocketError::InvalidUrl(config.ws.clone()))?;

    let uri = request.uri();
    let host = uri
        .host()
        .ok_or_else(|| SocketError::InvalidUrl(config.ws.clone()))?
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string();
    let port = uri
        .port_u16()
        .unwrap_or(if uri.scheme_str() == Some("wss") { 443 } else { 80 });
    let addr = format!("{host}:{port}");

    let connect = TcpStream::connect((host.as_str(), port));
    let stream = tokio::time::timeout(config.connect_timeout(), connect)
        .await
        .map_err(|_| SocketError::ConnectTimeout(config.connect_timeout()))?
        .map_err(|source| SocketError::Connect { addr, source })?;

    let handshake = client_async_tls(request, stream);
    let (ws, _response) = tokio::time::timeout(config.handshake_timeout(), handshake)
        .await
        .map_err(|_| SocketError::HandshakeTimeout(config.handshake_timeout()))??;

    Ok(ws)
}

/// Drive one link until it closes. Inbound frames from the consumer are ignored.
async fn pump(
    ws: WsStream,
    mut outbound: mpsc::UnboundedReceiver<Message>,
) -> Result<(), SocketError> {
    let (mut sink, mut stream) = ws.split();
    loop {
        tokio::select! {
            msg = outbound.recv() => {
                let Some(msg) = msg else { return Ok(()) };
                sink.send(msg).await?;
            }
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Close(frame))) => {
                    debug!(?frame, "herofest websocket closed by peer");
                    return Ok(());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> HerofestConfig {
        HerofestConfig {
            // Port 9 (discard) on localhost is closed on test machines.
            ws: "ws://127.0.0.1:9".into(),
            connect_timeout_ms: 200,
            handshake_timeout_ms: 200,
            ..HerofestConfig::default()
        }
    }

    #[test]
    fn test_fixed_delay_is_constant() {
        let mut policy = FixedDelay::default();
        assert_eq!(policy.next_delay(), Duration::from_millis(500));
        assert_eq!(policy.next_delay(), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_send_while_closed_is_discarded() {
        let socket =
            OutboundSocket::spawn(unreachable_config(), FixedDelay(Duration::from_secs(60)));
        assert!(!socket.is_open());
        assert_eq!(socket.send_text("{}".into()), SendOutcome::Discarded);
    }

    #[tokio::test]
    async fn test_failed_connect_counts_as_close() {
        let socket =
            OutboundSocket::spawn(unreachable_config(), FixedDelay(Duration::from_secs(60)));
        let mut status = socket.status();
        let closed = tokio::time::timeout(
            Duration::from_secs(5),
            status.wait_for(|s| matches!(s, LinkStatus::Closed { attempt: 1 })),
        )
        .await
        .map(|r| r.is_ok());
        assert_eq!(closed, Ok(true));
        assert!(!socket.is_open());
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_error() {
        let config = HerofestConfig {
            ws: "not a url".into(),
            ..HerofestConfig::default()
        };
        assert!(matches!(open_link(&config).await, Err(SocketError::InvalidUrl(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_attempt_waits_exactly_the_reconnect_delay() {
        // An unparseable url fails without touching the network, so only the
        // supervisor's sleep moves the clock.
        let config = HerofestConfig {
            ws: "not a url".into(),
            ..HerofestConfig::default()
        };
        let socket = OutboundSocket::spawn(config, FixedDelay::default());
        let mut status = socket.status();
        status
            .wait_for(|s| *s == LinkStatus::Closed { attempt: 1 })
            .await
            .unwrap();

        tokio::time::advance(RECONNECT_DELAY - Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(*status.borrow(), LinkStatus::Closed { attempt: 1 });

        tokio::time::advance(Duration::from_millis(1)).await;
        let next = status.wait_for(|s| s.attempt() == 2).await.map(|s| s.attempt());
        assert_eq!(next.ok(), Some(2));
    }
}
