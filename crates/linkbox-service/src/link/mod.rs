//! Link store and identifier generation.

pub mod id;
pub mod store;

pub use id::{IdGenerator, RandomIdGenerator};
pub use store::LinkStore;
