//! Link detection and page extraction helpers

pub mod extract;
pub mod links;
