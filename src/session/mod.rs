pub mod controller;
pub mod types;

pub use controller::{APOLOGY_TEXT, QueryOutcome, SessionController};
pub use types::{Exchange, Session, SessionId, SessionState, parse_timestamp};
