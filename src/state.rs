use crate::{config::Config, store::Store};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Config,
}

impl AppState {
    /// State backed by fresh in-memory collections holding the default seed.
    pub async fn seeded(config: Config) -> Self {
        let store = Store::in_memory();
        store.seed_defaults().await;
        Self { store, config }
    }
}

impl FromRef<AppState> for Store {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
