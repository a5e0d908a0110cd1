pub mod chat;
pub mod dispatch;
pub mod operations;
pub mod status;
