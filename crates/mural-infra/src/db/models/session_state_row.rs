use crate::db::schema::t_session_state;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = t_session_state)]
pub struct SessionStateRow {
    /// Fixed row id; the store holds exactly one state record.
    pub id: String,

    /// Schema version of the serialized payload.
    pub schema_version: i32,

    /// The `PersistedState` blob as JSON.
    pub payload: String,

    /// Last write time (Unix epoch milliseconds).
    pub updated_at: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = t_session_state)]
pub struct NewSessionStateRow {
    pub id: String,
    pub schema_version: i32,
    pub payload: String,
    pub updated_at: i64,
}
