// crates/server/src/controller.rs
//! Champ select lifecycle controller.
//!
//! Consumes provider events strictly in arrival order on one task, tracks
//! whether champ select is active, and turns detected turn changes into
//! forwarded `lol-pickban` events.
//!
//! ```text
//!            active=true                       active=false
//! Inactive ─────────────▶ Active ─────────────────────────▶ Inactive
//!  (no evaluation)   started + prime cache   ended, no evaluation this update
//! ```

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info};

use pickban_core::{is_same_action, Config, Converter, PickBanEvent, SummonerCache};
use pickban_observability::spawn_detached;
use pickban_types::{Action, Snapshot, StateEvent};

use crate::error::ControllerError;
use crate::provider::ProviderEvent;
use crate::socket::PickBanSink;
use crate::store::ActionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Inactive,
    Active,
}

pub struct Controller {
    config: Arc<Config>,
    phase: SessionPhase,
    store: ActionStore,
    converter: Converter,
    summoners: Arc<dyn SummonerCache>,
    events: broadcast::Sender<StateEvent>,
    /// None when forwarding is disabled.
    forwarder: Option<Box<dyn PickBanSink>>,
}

impl Controller {
    pub fn new(
        config: Arc<Config>,
        converter: Converter,
        summoners: Arc<dyn SummonerCache>,
        events: broadcast::Sender<StateEvent>,
    ) -> Self {
        Self {
            config,
            phase: SessionPhase::Inactive,
            store: ActionStore::new(),
            converter,
            summoners,
            events,
            forwarder: None,
        }
    }

    pub fn with_forwarder(mut self, sink: Box<dyn PickBanSink>) -> Self {
        self.forwarder = Some(sink);
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn store(&self) -> &ActionStore {
        &self.store
    }

    /// Process events until the provider side of the channel closes.
    ///
    /// Errors from a single update are logged and never stop the loop.
    pub async fn run(mut self, mut rx: mpsc::Receiver<ProviderEvent>) {
        while let Some(event) = rx.recv().await {
            if let Err(e) = self.handle(event) {
                error!(error = %e, "failed to process champ select update");
            }
        }
        debug!("provider channel closed, controller stopping");
    }

    pub fn handle(&mut self, event: ProviderEvent) -> Result<Option<Action>, ControllerError> {
        match event {
            ProviderEvent::Connected => {
                debug!("DataProvider connected!");
                self.publish(StateEvent::ClientConnected);
                Ok(None)
            }
            ProviderEvent::Disconnected => {
                debug!("DataProvider disconnected!");
                self.publish(StateEvent::ClientDisconnected);
                Ok(None)
            }
            ProviderEvent::Snapshot(snapshot) => self.apply_new_state(snapshot),
        }
    }

    /// Apply one snapshot. Returns the action record of a detected turn change.
    pub fn apply_new_state(
        &mut self,
        snapshot: Snapshot,
    ) -> Result<Option<Action>, ControllerError> {
        let was_active = self.phase == SessionPhase::Active;
        let now_active = snapshot.is_champ_select_active;

        if !was_active && now_active {
            info!("ChampSelect started!");
            self.phase = SessionPhase::Active;
            self.store.reset();
            self.publish(StateEvent::ChampSelectStarted);
            self.prime_summoners(&snapshot);
        }
        if was_active && !now_active {
            info!("ChampSelect ended!");
            self.phase = SessionPhase::Inactive;
            self.store.reset();
            self.publish(StateEvent::ChampSelectEnded);
        }

        // The final turn of a session is not evaluated on the closing update.
        if !now_active {
            return Ok(None);
        }

        let cleaned = self.converter.convert(&snapshot);
        let before = self.store.current_action();
        self.store.new_state(cleaned.clone());
        self.publish(StateEvent::NewState { state: cleaned });
        let after = self.store.current_action();

        if is_same_action(&before, &after) {
            return Ok(None);
        }

        let action = self.store.refresh_action(&before);
        debug!(
            state = action.state.as_str(),
            team = action.team.side(),
            num = action.num,
            "new action"
        );
        self.publish(StateEvent::NewAction {
            action: action.clone(),
        });
        self.forward(&action)?;
        Ok(Some(action))
    }

    fn forward(&self, action: &Action) -> Result<(), ControllerError> {
        if !self.config.herofest.enabled || action.is_none() {
            return Ok(());
        }
        let Some(sink) = &self.forwarder else {
            return Ok(());
        };

        let event = PickBanEvent::from_action(action, &self.config.herofest)?;
        let outcome = sink.send(&event)?;
        info!(
            method = event.method.as_str(),
            team = event.data.team,
            display_name = %event.data.display_name,
            champion = %event.data.champion.name,
            ?outcome,
            "Sending websocket pick"
        );
        Ok(())
    }

    fn prime_summoners(&self, snapshot: &Snapshot) {
        let Some(session) = snapshot.session.clone() else {
            debug!("champ select started without a session payload, summoner cache not primed");
            return;
        };
        let cache = Arc::clone(&self.summoners);
        spawn_detached("cache_summoners", async move {
            cache.cache_summoners(session).await
        });
    }

    fn publish(&self, event: StateEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
