//! # linkbox-database
//!
//! SQLite connection management, idempotent schema bootstrap, and the
//! concrete link repository.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::link::LinkRepository;
