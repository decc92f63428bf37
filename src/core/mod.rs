//! Configuration, shared models and per-user state

pub mod config;
pub mod models;
pub mod session;
pub mod state;
pub mod usage;
