//! Load commands (write operations)

pub mod insert_batch;
pub mod load_csv;

pub use insert_batch::{InsertBatchCommand, InsertBatchError, MAX_BATCH_SIZE};
pub use load_csv::{LoadCsvCommand, LoadCsvError};
