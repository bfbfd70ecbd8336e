// crates/core/src/event.rs
//! Outbound `lol-pickban` wire events.
//!
//! ```json
//! {"type":"lol-pickban","method":"pick","data":{"displayName":"Ada","team":"blue",
//!  "champion":{"id":7,"name":"Nocturne","centeredSplash":"http://host/nocturne.jpg"}}}
//! ```

use serde::Serialize;

use pickban_types::{Action, ActionState};

use crate::config::HerofestConfig;
use crate::error::TranslationError;

pub const PICKBAN_EVENT_TYPE: &str = "lol-pickban";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickBanEvent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub method: ActionState,
    pub data: PickBanData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickBanData {
    pub display_name: String,
    /// "blue" or "red".
    pub team: &'static str,
    pub champion: PickBanChampion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickBanChampion {
    pub id: i64,
    pub name: String,
    /// Absolute artwork URL (asset host + splash path).
    pub centered_splash: String,
}

impl PickBanEvent {
    /// Translate a detected action. Pure: same input, same event.
    pub fn from_action(action: &Action, config: &HerofestConfig) -> Result<Self, TranslationError> {
        if action.state == ActionState::None {
            return Err(TranslationError::NoAction);
        }
        let display_name = action.subject.display_name.clone().ok_or(
            TranslationError::MissingDisplayName {
                team: action.team,
                num: action.num,
            },
        )?;
        let champion = action
            .subject
            .champion
            .as_ref()
            .ok_or(TranslationError::MissingChampion {
                team: action.team,
                num: action.num,
            })?;

        Ok(Self {
            kind: PICKBAN_EVENT_TYPE,
            method: action.state,
            data: PickBanData {
                display_name,
                team: action.team.side(),
                champion: PickBanChampion {
                    id: champion.id,
                    name: champion.name.clone(),
                    centered_splash: format!("{}{}", config.host, champion.splash_centered_img),
                },
            },
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickban_types::{Champion, Subject, Team};
    use pretty_assertions::assert_eq;

    fn config() -> HerofestConfig {
        HerofestConfig {
            host: "https://cdn.example".into(),
            ..HerofestConfig::default()
        }
    }

    fn nocturne_pick(team: Team) -> Action {
        Action::new(
            ActionState::Pick,
            team,
            0,
            Subject {
                display_name: Some("Ada".into()),
                champion: Some(Champion {
                    id: 7,
                    name: "Nocturne".into(),
                    splash_centered_img: "/nocturne.jpg".into(),
                }),
            },
        )
    }

    #[test]
    fn test_pick_translates_to_wire_shape() {
        let event = PickBanEvent::from_action(&nocturne_pick(Team::Blue), &config()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "lol-pickban",
                "method": "pick",
                "data": {
                    "displayName": "Ada",
                    "team": "blue",
                    "champion": {
                        "id": 7,
                        "name": "Nocturne",
                        "centeredSplash": "https://cdn.example/nocturne.jpg"
                    }
                }
            })
        );
    }

    #[test]
    fn test_red_ban() {
        let mut action = nocturne_pick(Team::Red);
        action.state = ActionState::Ban;
        let event = PickBanEvent::from_action(&action, &config()).unwrap();
        assert_eq!(event.method, ActionState::Ban);
        assert_eq!(event.data.team, "red");
    }

    #[test]
    fn test_none_is_rejected() {
        let err = PickBanEvent::from_action(&Action::none(), &config()).unwrap_err();
        assert_eq!(err, TranslationError::NoAction);
    }

    #[test]
    fn test_missing_fields_propagate() {
        let mut action = nocturne_pick(Team::Blue);
        action.subject.champion = None;
        assert_eq!(
            PickBanEvent::from_action(&action, &config()).unwrap_err(),
            TranslationError::MissingChampion {
                team: Team::Blue,
                num: 0
            }
        );

        action.subject.display_name = None;
        assert!(matches!(
            PickBanEvent::from_action(&action, &config()),
            Err(TranslationError::MissingDisplayName { .. })
        ));
    }
}
