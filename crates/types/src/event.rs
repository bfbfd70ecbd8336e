// crates/types/src/event.rs
use serde::Serialize;

use crate::action::Action;
use crate::draft::DraftState;

/// Lifecycle notifications published by the controller to in-process subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    /// The game client became reachable.
    ClientConnected,
    /// The game client went away.
    ClientDisconnected,
    ChampSelectStarted,
    ChampSelectEnded,
    /// A fresh normalized draft state was applied.
    NewState { state: DraftState },
    /// A new turn was detected.
    NewAction { action: Action },
}
