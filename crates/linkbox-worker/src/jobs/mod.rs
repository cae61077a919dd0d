//! Built-in maintenance tasks.

pub mod sweep;

pub use sweep::LinkSweepTask;
