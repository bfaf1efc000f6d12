//! `shopkeep` driver: configuration, command scripts and the session that
//! runs them against a single in-memory store.

pub mod command;
pub mod config;
pub mod session;

pub use command::{Command, CommandError};
pub use config::StoreConfig;
pub use session::Session;
