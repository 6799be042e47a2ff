//! Centralized error handling
//!
//! Unifies error reporting across the catalog and proxy layers. The error
//! taxonomy is small: request validation, proxy authorization, upstream
//! failures, and internal faults. Classification uncertainty is never an
//! error; the classifiers resolve it to documented defaults instead.
//!
//! # Usage
//!
//! ```rust
//! use globe_tv::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
