// crates/core/src/transition.rs
//! Turn transition detection.

use pickban_types::{Action, ActionState};

/// Whether `a` and `b` describe the same turn of the draft.
///
/// Only `(state, team, num)` identify a turn. Subject changes inside the same
/// slot are hover noise and never count as a new turn. Checks are
/// order-sensitive: two `none` actions are equal even if team/num differ.
pub fn is_same_action(a: &Action, b: &Action) -> bool {
    if a.state != b.state {
        return false;
    }
    if a.state == ActionState::None {
        return true;
    }
    if a.team != b.team {
        return false;
    }
    a.num == b.num
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickban_types::{Champion, Subject, Team};
    use proptest::prelude::*;

    fn action(state: ActionState, team: Team, num: u32, name: &str) -> Action {
        Action::new(
            state,
            team,
            num,
            Subject {
                display_name: Some(name.into()),
                champion: None,
            },
        )
    }

    #[test]
    fn test_hover_change_in_same_slot_is_same_turn() {
        let before = action(ActionState::Pick, Team::Blue, 1, "X");
        let mut after = action(ActionState::Pick, Team::Blue, 1, "Y");
        after.subject.champion = Some(Champion {
            id: 7,
            name: "Nocturne".into(),
            splash_centered_img: "/nocturne.jpg".into(),
        });
        assert!(is_same_action(&before, &after));
    }

    #[test]
    fn test_none_to_pick_is_new_turn() {
        let after = action(ActionState::Pick, Team::Blue, 0, "Ada");
        assert!(!is_same_action(&Action::none(), &after));
    }

    #[test]
    fn test_ban_to_pick_same_slot_is_new_turn() {
        let before = action(ActionState::Ban, Team::Red, 2, "Ada");
        let after = action(ActionState::Pick, Team::Red, 2, "Ada");
        assert!(!is_same_action(&before, &after));
    }

    fn any_state() -> impl Strategy<Value = ActionState> {
        prop_oneof![
            Just(ActionState::None),
            Just(ActionState::Pick),
            Just(ActionState::Ban),
        ]
    }

    fn active_state() -> impl Strategy<Value = ActionState> {
        prop_oneof![Just(ActionState::Pick), Just(ActionState::Ban)]
    }

    fn any_team() -> impl Strategy<Value = Team> {
        prop_oneof![Just(Team::Blue), Just(Team::Red)]
    }

    fn any_action() -> impl Strategy<Value = Action> {
        (any_state(), any_team(), 0u32..10, "[a-z]{0,6}")
            .prop_map(|(state, team, num, name)| action(state, team, num, &name))
    }

    proptest! {
        #[test]
        fn reflexive(a in any_action()) {
            prop_assert!(is_same_action(&a, &a));
        }

        #[test]
        fn none_actions_always_equal(a in any_action(), b in any_action()) {
            let a = Action { state: ActionState::None, ..a };
            let b = Action { state: ActionState::None, ..b };
            prop_assert!(is_same_action(&a, &b));
        }

        #[test]
        fn same_slot_ignores_subject(
            state in active_state(), team in any_team(), num in 0u32..10,
            x in "[a-z]{1,6}", y in "[a-z]{1,6}",
        ) {
            let a = action(state, team, num, &x);
            let b = action(state, team, num, &y);
            prop_assert!(is_same_action(&a, &b));
        }

        #[test]
        fn different_num_is_new_turn(
            state in active_state(), team in any_team(), n in 0u32..10, m in 0u32..10,
        ) {
            prop_assume!(n != m);
            let a = action(state, team, n, "a");
            prop_assert!(!is_same_action(&a, &action(state, team, m, "a")));
        }

        #[test]
        fn different_team_is_new_turn(state in active_state(), n in 0u32..10, m in 0u32..10) {
            let blue = action(state, Team::Blue, n, "a");
            prop_assert!(!is_same_action(&blue, &action(state, Team::Red, m, "a")));
        }

        #[test]
        fn different_state_is_new_turn(a in any_action(), b in any_action()) {
            prop_assume!(a.state != b.state);
            prop_assert!(!is_same_action(&a, &b));
        }
    }
}
