//! Command routing and user-facing replies

pub mod commands;
pub mod messages;
pub mod router;

pub use commands::{Command, parse_command};
pub use router::{CommandRouter, Reply};
