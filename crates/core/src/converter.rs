// crates/core/src/converter.rs
//! Normalization of raw client snapshots into [`DraftState`].
//!
//! Per team:
//! - one pick slot per cell, in seat order, active while that cell's pick
//!   action is in progress;
//! - one ban slot per ban action whose actor sits on the team, in draft order.
//!
//! Champion id 0 means "nothing hovered/locked" and resolves to no champion.

use std::sync::Arc;

use pickban_types::{Cell, ChampSelectSession, DraftState, RawAction, Slot, Snapshot, Team};

use crate::catalog::ChampionCatalog;
use crate::summoners::SummonerCache;

#[derive(Clone)]
pub struct Converter {
    catalog: Arc<dyn ChampionCatalog>,
    summoners: Arc<dyn SummonerCache>,
}

impl Converter {
    pub fn new(catalog: Arc<dyn ChampionCatalog>, summoners: Arc<dyn SummonerCache>) -> Self {
        Self { catalog, summoners }
    }

    pub fn convert(&self, snapshot: &Snapshot) -> DraftState {
        let Some(session) = &snapshot.session else {
            return DraftState::default();
        };

        let mut state = DraftState::default();
        for team in [Team::Blue, Team::Red] {
            let team_state = state.team_mut(team);
            team_state.picks = self.picks(session, team);
            team_state.bans = self.bans(session, team);
        }
        state
    }

    fn picks(&self, session: &ChampSelectSession, team: Team) -> Vec<Slot> {
        session
            .cells()
            .filter(|cell| Team::from_client_id(cell.team) == Some(team))
            .map(|cell| {
                let action = session
                    .actions
                    .iter()
                    .flatten()
                    .filter(|a| a.is_pick() && a.actor_cell_id == cell.cell_id)
                    .last();
                let champion_id = match action {
                    Some(a) if a.champion_id != 0 => a.champion_id,
                    _ => cell.champion_id,
                };
                Slot {
                    is_active: action.is_some_and(is_live),
                    display_name: self.display_name(cell),
                    champion: self.champion(champion_id),
                }
            })
            .collect()
    }

    fn bans(&self, session: &ChampSelectSession, team: Team) -> Vec<Slot> {
        session
            .actions
            .iter()
            .flatten()
            .filter(|a| a.is_ban())
            .filter_map(|a| {
                let actor = session.cell(a.actor_cell_id)?;
                (Team::from_client_id(actor.team) == Some(team)).then(|| Slot {
                    is_active: is_live(a),
                    display_name: self.display_name(actor),
                    champion: self.champion(a.champion_id),
                })
            })
            .collect()
    }

    fn display_name(&self, cell: &Cell) -> Option<String> {
        self.summoners
            .display_name(cell.summoner_id)
            .or_else(|| cell.game_name.clone())
    }

    fn champion(&self, id: i64) -> Option<pickban_types::Champion> {
        if id == 0 {
            return None;
        }
        self.catalog.champion(id)
    }
}

fn is_live(action: &RawAction) -> bool {
    action.is_in_progress && !action.completed
}
