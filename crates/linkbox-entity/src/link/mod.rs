//! Link domain entities.

pub mod created;
pub mod model;

pub use created::CreatedLink;
pub use model::{LinkRecord, LinkStats, NewLink};
