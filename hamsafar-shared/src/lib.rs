pub mod db;
pub mod errors;
pub mod telemetry;

pub use errors::{AppError, AppResult, ErrorCode};
