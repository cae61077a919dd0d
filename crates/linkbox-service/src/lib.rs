//! # linkbox-service
//!
//! The expiring link store. [`LinkStore`] issues short random identifiers
//! for JSON payloads, enforces their time-to-live on read, and sweeps stale
//! rows on demand.
//!
//! The store follows constructor injection: the repository, clock, and
//! identifier generator are provided at construction time. There is no global
//! instance; share one store through `Arc`.

pub mod link;

pub use link::{IdGenerator, LinkStore, RandomIdGenerator};
