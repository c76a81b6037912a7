//! Data models for seadiff

pub mod patch;
pub mod revision;
pub mod status;

pub use patch::*;
pub use revision::*;
pub use status::*;
