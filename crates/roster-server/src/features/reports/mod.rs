//! Reports feature module
//!
//! Read-only aggregates over the loaded hiring data, fixed to
//! [`REPORT_YEAR`](roster_common::types::REPORT_YEAR). Employees whose
//! department or job does not resolve are reported under "Unknown".

pub mod queries;
pub mod routes;

pub use routes::reports_routes;
