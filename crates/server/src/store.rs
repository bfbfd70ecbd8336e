// crates/server/src/store.rs
//! Holds the latest normalized draft state and derives the current action from it.
//!
//! Single owner: only the controller mutates the store.

use pickban_types::{Action, ActionState, DraftState, Subject, Team};

/// Scan order for the active slot. Only one slot is active at a time in a
/// well-formed draft; the order decides ties in malformed ones.
const SCAN_ORDER: [(Team, ActionState); 4] = [
    (Team::Blue, ActionState::Ban),
    (Team::Blue, ActionState::Pick),
    (Team::Red, ActionState::Ban),
    (Team::Red, ActionState::Pick),
];

#[derive(Debug, Default)]
pub struct ActionStore {
    data: DraftState,
}

impl ActionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &DraftState {
        &self.data
    }

    /// Replace the stored draft state.
    pub fn new_state(&mut self, data: DraftState) {
        self.data = data;
    }

    pub fn reset(&mut self) {
        self.data = DraftState::default();
    }

    /// The turn being played right now, or [`Action::none`].
    pub fn current_action(&self) -> Action {
        for (team, state) in SCAN_ORDER {
            let slots = self.data.team(team).slots(state);
            if let Some((num, slot)) = slots.iter().enumerate().find(|(_, s)| s.is_active) {
                return Action::new(state, team, num as u32, Subject::from(slot));
            }
        }
        Action::none()
    }

    /// Recompute the record of `previous` against the current data.
    ///
    /// For a concrete turn this re-reads the same `(state, team, num)` slot, so
    /// a selection locked in by this update carries its final champion. If the
    /// slot no longer exists the previous record is kept. A `none` previous
    /// action has no slot to re-read and yields the current action.
    pub fn refresh_action(&self, previous: &Action) -> Action {
        if previous.is_none() {
            return self.current_action();
        }
        match self.data.slot(previous.state, previous.team, previous.num) {
            Some(slot) => Action::new(
                previous.state,
                previous.team,
                previous.num,
                Subject::from(slot),
            ),
            None => previous.clone(),
        }
    }
}
