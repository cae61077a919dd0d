//! # linkbox-core
//!
//! Core crate for Linkbox. Contains configuration schemas, the clock
//! abstraction, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Linkbox crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
