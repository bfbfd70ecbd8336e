// crates/types/src/draft.rs
//! Normalized draft state, produced from a [`Snapshot`](crate::Snapshot) by the converter.

use serde::{Deserialize, Serialize};

use crate::action::{ActionState, Team};

/// Resolved champion metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Champion {
    pub id: i64,
    pub name: String,
    /// Path of the centered splash artwork, relative to the asset host.
    pub splash_centered_img: String,
}

/// A single pick or ban position of one team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// True while this slot is the turn currently being played.
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Hovered or locked champion, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub champion: Option<Champion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamState {
    pub picks: Vec<Slot>,
    pub bans: Vec<Slot>,
}

impl TeamState {
    pub fn slots(&self, state: ActionState) -> &[Slot] {
        match state {
            ActionState::Pick => &self.picks,
            ActionState::Ban => &self.bans,
            ActionState::None => &[],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftState {
    pub blue_team: TeamState,
    pub red_team: TeamState,
}

impl DraftState {
    pub fn team(&self, team: Team) -> &TeamState {
        match team {
            Team::Blue => &self.blue_team,
            Team::Red => &self.red_team,
        }
    }

    pub fn team_mut(&mut self, team: Team) -> &mut TeamState {
        match team {
            Team::Blue => &mut self.blue_team,
            Team::Red => &mut self.red_team,
        }
    }

    /// Look up the slot addressed by `(state, team, num)`.
    pub fn slot(&self, state: ActionState, team: Team, num: u32) -> Option<&Slot> {
        self.team(team).slots(state).get(num as usize)
    }
}
