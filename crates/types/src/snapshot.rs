// crates/types/src/snapshot.rs
//! Raw champ select snapshot as delivered by the game client.
//!
//! Field names mirror the client's JSON (camelCase). Only the subset needed
//! for normalization is modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// One observation of the client's champ select state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// The only attribute the lifecycle controller reads directly.
    pub is_champ_select_active: bool,
    /// Session payload. Absent while no champ select is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<ChampSelectSession>,
}

impl Snapshot {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn active(session: ChampSelectSession) -> Self {
        Self {
            is_champ_select_active: true,
            session: Some(session),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampSelectSession {
    #[serde(default)]
    pub my_team: Vec<Cell>,
    #[serde(default)]
    pub their_team: Vec<Cell>,
    /// Action groups in draft order; each inner vec is one phase step.
    #[serde(default)]
    pub actions: Vec<Vec<RawAction>>,
}

impl ChampSelectSession {
    /// All cells of both teams, in client order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.my_team.iter().chain(self.their_team.iter())
    }

    pub fn cell(&self, cell_id: i64) -> Option<&Cell> {
        self.cells().find(|c| c.cell_id == cell_id)
    }
}

/// A player seat in the draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub cell_id: i64,
    #[serde(default)]
    pub champion_id: i64,
    #[serde(default)]
    pub summoner_id: i64,
    /// 1 = blue side, 2 = red side.
    pub team: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAction {
    pub id: i64,
    pub actor_cell_id: i64,
    #[serde(default)]
    pub champion_id: i64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub is_in_progress: bool,
    /// "pick", "ban", or phase markers such as "ten_bans_reveal".
    #[serde(rename = "type")]
    pub kind: String,
}

impl RawAction {
    pub fn is_pick(&self) -> bool {
        self.kind == "pick"
    }

    pub fn is_ban(&self) -> bool {
        self.kind == "ban"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_client_payload() {
        let json = r#"{
            "isChampSelectActive": true,
            "session": {
                "myTeam": [{"cellId": 0, "championId": 0, "summonerId": 11, "team": 1, "gameName": "Ada"}],
                "theirTeam": [{"cellId": 5, "team": 2}],
                "actions": [[{"id": 1, "actorCellId": 0, "championId": 64, "completed": false, "isInProgress": true, "type": "ban", "pickTurn": 1}]],
                "timer": {"phase": "BAN_PICK"}
            }
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.is_champ_select_active);
        let session = snapshot.session.unwrap();
        assert_eq!(session.cells().count(), 2);
        assert_eq!(session.cell(0).unwrap().game_name.as_deref(), Some("Ada"));
        assert!(session.actions[0][0].is_ban());
        assert!(session.actions[0][0].is_in_progress);
    }

    #[test]
    fn test_inactive_snapshot_without_session() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"isChampSelectActive": false}"#).unwrap();
        assert_eq!(snapshot, Snapshot::inactive());
    }
}
