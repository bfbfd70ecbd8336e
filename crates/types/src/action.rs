// crates/types/src/action.rs
use serde::{Deserialize, Serialize};

use crate::draft::{Champion, Slot};

/// Kind of turn being played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionState {
    /// Nothing is happening (between phases, or no active slot).
    #[default]
    None,
    Pick,
    Ban,
}

impl ActionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionState::None => "none",
            ActionState::Pick => "pick",
            ActionState::Ban => "ban",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[default]
    #[serde(rename = "blueTeam")]
    Blue,
    #[serde(rename = "redTeam")]
    Red,
}

impl Team {
    /// Side name used on the outbound wire.
    pub fn side(&self) -> &'static str {
        match self {
            Team::Blue => "blue",
            Team::Red => "red",
        }
    }

    /// Map the client's numeric team id (1 = blue, 2 = red).
    pub fn from_client_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Team::Blue),
            2 => Some(Team::Red),
            _ => None,
        }
    }
}

/// The acting party of an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub champion: Option<Champion>,
}

impl From<&Slot> for Subject {
    fn from(slot: &Slot) -> Self {
        Self {
            display_name: slot.display_name.clone(),
            champion: slot.champion.clone(),
        }
    }
}

/// One discrete turn of the draft, identified by `(state, team, num)`.
///
/// Recomputed from the draft state on every update; only ever compared
/// against the immediately preceding value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub state: ActionState,
    pub team: Team,
    /// Ordinal of the slot within the team's picks or bans.
    pub num: u32,
    #[serde(rename = "data")]
    pub subject: Subject,
}

impl Action {
    /// The "nothing happening" action.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(state: ActionState, team: Team, num: u32, subject: Subject) -> Self {
        Self {
            state,
            team,
            num,
            subject,
        }
    }

    pub fn is_none(&self) -> bool {
        self.state == ActionState::None
    }
}
