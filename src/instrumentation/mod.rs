pub mod logger;

pub use logger::{OperationLog, RunLogger};
