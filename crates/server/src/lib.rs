// crates/server/src/lib.rs
//! Pick/ban relay.
//!
//! Watches champ select snapshots, detects turn changes, and forwards each new
//! pick or ban as a `lol-pickban` event over a self-healing websocket.

pub mod controller;
pub mod error;
pub mod provider;
pub mod socket;
pub mod store;

pub use controller::{Controller, SessionPhase};
pub use error::*;
pub use provider::{spawn_tee, JsonLinesProvider, ProviderEvent, RecordedEvent, Recorder};
pub use socket::{FixedDelay, LinkStatus, OutboundSocket, PickBanSink, ReconnectPolicy, SendOutcome};
pub use store::ActionStore;
