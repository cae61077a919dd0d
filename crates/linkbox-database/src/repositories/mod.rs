//! Concrete repository implementations.

pub mod link;
