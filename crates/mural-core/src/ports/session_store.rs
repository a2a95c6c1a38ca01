use anyhow::Result;
use async_trait::async_trait;

use crate::persistence::PersistedState;

/// The always-available session database holding the single versioned
/// state record.
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// `Ok(None)` when no state has ever been saved.
    async fn load_state(&self) -> Result<Option<PersistedState>>;

    /// Expected to be debounced/coalesced by the caller; the store makes
    /// no at-most-one-in-flight guarantee of its own.
    async fn save_state(&self, state: &PersistedState) -> Result<()>;
}
