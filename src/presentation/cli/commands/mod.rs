pub mod chat;
pub mod check;
pub mod documents;
pub mod health;
pub mod watch;
