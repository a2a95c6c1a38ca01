use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;

use mural_core::persistence::{PersistedState, StateMigrator};
use mural_core::ports::SessionStorePort;

use crate::db::models::{NewSessionStateRow, SessionStateRow};
use crate::db::pool::DbPool;
use crate::db::schema::t_session_state;

/// The single versioned state record lives under this fixed row id.
const STATE_ROW_ID: &str = "session";

pub struct DieselSessionStateRepository {
    pool: DbPool,
}

impl DieselSessionStateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStorePort for DieselSessionStateRepository {
    async fn load_state(&self) -> Result<Option<PersistedState>> {
        let mut conn = self.pool.get()?;

        let row = t_session_state::table
            .filter(t_session_state::id.eq(STATE_ROW_ID))
            .first::<SessionStateRow>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let state: PersistedState =
            serde_json::from_str(&row.payload).context("deserialize session state failed")?;
        let migrated = StateMigrator::new().migrate_to_latest(state);

        Ok(Some(migrated))
    }

    async fn save_state(&self, state: &PersistedState) -> Result<()> {
        let payload = serde_json::to_string(state).context("serialize session state failed")?;
        let row = NewSessionStateRow {
            id: STATE_ROW_ID.to_string(),
            schema_version: state.schema_version as i32,
            payload,
            updated_at: Utc::now().timestamp_millis(),
        };

        let mut conn = self.pool.get()?;
        diesel::replace_into(t_session_state::table)
            .values(&row)
            .execute(&mut conn)?;

        Ok(())
    }
}
