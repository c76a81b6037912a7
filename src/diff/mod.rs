//! Selection resolution, per-file patch retrieval, and deferred presentation

pub mod present;
pub mod resolve;
pub mod retrieve;

pub use present::*;
pub use resolve::*;
pub use retrieve::*;
