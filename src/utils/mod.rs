//! Small shared helpers
//!
//! Currently only the version lookup used by the startup banner.

pub mod version;

pub use version::get_version;
