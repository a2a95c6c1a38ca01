//! The versioned session blob and its load-time hygiene.

mod migration;
mod sanitize;
mod state;

pub use migration::{StateMigration, StateMigrator};
pub use sanitize::sanitize_loaded_state;
pub use state::{AuthMaterial, PersistedState, CURRENT_SCHEMA_VERSION};
