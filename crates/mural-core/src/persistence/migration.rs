use super::state::{PersistedState, CURRENT_SCHEMA_VERSION};

/// One schema step. Implementations transform a state at
/// `from_version()` into `from_version() + 1`.
pub trait StateMigration: Send + Sync {
    fn from_version(&self) -> u32;
    fn migrate(&self, state: PersistedState) -> PersistedState;
}

pub struct StateMigrator {
    migrations: Vec<Box<dyn StateMigration>>,
}

impl StateMigrator {
    pub fn new() -> Self {
        Self {
            migrations: vec![
                // Box::new(MigrationV1ToV2),
            ],
        }
    }

    pub fn migrate_to_latest(&self, mut state: PersistedState) -> PersistedState {
        loop {
            let current = state.schema_version;

            if current >= CURRENT_SCHEMA_VERSION {
                break;
            }

            let migration = self
                .migrations
                .iter()
                .find(|m| m.from_version() == current)
                .unwrap_or_else(|| panic!("no migration found from version {}", current));

            state = migration.migrate(state);
        }

        state
    }
}

impl Default for StateMigrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version_passes_through() {
        let state = PersistedState::default();
        let migrated = StateMigrator::new().migrate_to_latest(state.clone());
        assert_eq!(migrated, state);
    }
}
