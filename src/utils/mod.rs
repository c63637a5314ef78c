//! Shared utilities

pub mod busy;
pub mod error;

pub use busy::{BusyFlag, BusyGuard};
pub use error::{AppError, AppResult, Notice};
