//! localStorage persistence for workout presets.
//!
//! The whole preset collection is stored as one JSON document under a fixed
//! key. Persistence failures are never surfaced to the timer: a missing or
//! unreadable store degrades to the defaults, writes that fail are logged
//! and dropped.

use log::warn;
use web_sys::Storage;
use workout_pulse::PresetStore;

const PRESETS_STORAGE_KEY: &str = "workout-pulse-presets";

fn local_storage() -> Option<Storage> {
    match gloo_utils::window().local_storage() {
        Ok(storage) => storage,
        Err(err) => {
            warn!("localStorage unavailable: {:?}", err);
            None
        }
    }
}

/// Load the preset store, falling back to an empty one on any failure.
pub fn load_store() -> PresetStore {
    let Some(storage) = local_storage() else {
        return PresetStore::default();
    };
    let Ok(Some(raw)) = storage.get_item(PRESETS_STORAGE_KEY) else {
        return PresetStore::default();
    };
    match serde_json::from_str(&raw) {
        Ok(store) => store,
        Err(err) => {
            warn!("failed to parse stored presets: {}", err);
            PresetStore::default()
        }
    }
}

/// Persist the preset store. Called on every mutation (write-through),
/// never from a render effect.
pub fn save_store(store: &PresetStore) {
    let Some(storage) = local_storage() else {
        return;
    };
    let json = match serde_json::to_string(store) {
        Ok(json) => json,
        Err(err) => {
            warn!("failed to serialize presets: {}", err);
            return;
        }
    };
    if let Err(err) = storage.set_item(PRESETS_STORAGE_KEY, &json) {
        warn!("failed to persist presets: {:?}", err);
    }
}
