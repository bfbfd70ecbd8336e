// crates/core/src/summoners.rs
//! Party-member identity cache.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use pickban_types::ChampSelectSession;

use crate::error::SummonerError;

/// Caches display names of the players in a champ select.
///
/// `cache_summoners` is primed once per session start and runs detached from
/// the update path; `display_name` is read synchronously during normalization.
#[async_trait]
pub trait SummonerCache: Send + Sync {
    /// Prime the cache from a session. Returns how many names were stored.
    async fn cache_summoners(&self, session: ChampSelectSession) -> Result<usize, SummonerError>;

    fn display_name(&self, summoner_id: i64) -> Option<String>;
}

/// Cache primed from the game names embedded in the session cells.
#[derive(Debug, Default)]
pub struct InMemorySummonerCache {
    names: RwLock<HashMap<i64, String>>,
}

impl InMemorySummonerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.read().map(|n| n.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SummonerCache for InMemorySummonerCache {
    async fn cache_summoners(&self, session: ChampSelectSession) -> Result<usize, SummonerError> {
        if session.cells().next().is_none() {
            return Err(SummonerError::EmptySession);
        }

        let mut names = self.names.write().map_err(|_| SummonerError::Poisoned)?;
        let mut cached = 0;
        // Bots and hidden players have summoner id 0.
        for cell in session.cells().filter(|c| c.summoner_id != 0) {
            if let Some(name) = &cell.game_name {
                names.insert(cell.summoner_id, name.clone());
                cached += 1;
            }
        }
        debug!(cached, "cached summoners");
        Ok(cached)
    }

    fn display_name(&self, summoner_id: i64) -> Option<String> {
        self.names.read().ok()?.get(&summoner_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickban_types::Cell;

    fn cell(cell_id: i64, summoner_id: i64, team: u8, name: Option<&str>) -> Cell {
        Cell {
            cell_id,
            champion_id: 0,
            summoner_id,
            team,
            game_name: name.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_cache_primes_named_cells() {
        let cache = InMemorySummonerCache::new();
        let session = ChampSelectSession {
            my_team: vec![cell(0, 11, 1, Some("Ada")), cell(1, 0, 1, Some("Bot"))],
            their_team: vec![cell(5, 22, 2, None), cell(6, 23, 2, Some("Grace"))],
            actions: vec![],
        };

        assert_eq!(cache.cache_summoners(session).await.unwrap(), 2);
        assert_eq!(cache.display_name(11).as_deref(), Some("Ada"));
        assert_eq!(cache.display_name(23).as_deref(), Some("Grace"));
        assert_eq!(cache.display_name(22), None);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_session_is_an_error() {
        let cache = InMemorySummonerCache::new();
        let err = cache
            .cache_summoners(ChampSelectSession::default())
            .await
            .unwrap_err();
        assert_eq!(err, SummonerError::EmptySession);
        assert!(cache.is_empty());
    }
}
