mod session_state_row;

pub use session_state_row::{NewSessionStateRow, SessionStateRow};
