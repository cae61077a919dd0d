//! # linkbox-entity
//!
//! Domain entity models for Linkbox. Database entities derive
//! `sqlx::FromRow`; value objects derive `Serialize` for CLI and API output.

pub mod link;
