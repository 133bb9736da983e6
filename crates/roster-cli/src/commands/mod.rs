//! Command implementations for the Roster CLI

pub mod validate;
