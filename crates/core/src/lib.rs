// crates/core/src/lib.rs
pub mod catalog;
pub mod config;
pub mod converter;
pub mod error;
pub mod event;
pub mod summoners;
pub mod transition;

pub use catalog::{ChampionCatalog, StaticCatalog};
pub use config::*;
pub use converter::Converter;
pub use error::*;
pub use event::*;
pub use summoners::{InMemorySummonerCache, SummonerCache};
pub use transition::is_same_action;
