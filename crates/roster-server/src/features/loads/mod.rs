//! Loads feature module
//!
//! Write side of the service: CSV loads from the server's data directory and
//! JSON batch inserts of employees.

pub mod coerce;
pub mod commands;
pub mod routes;
pub mod store;
pub mod summary;

pub use routes::loads_routes;
pub use summary::{LoadSummary, Problem, ProblemSource};
