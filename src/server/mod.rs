//! Clip server
//!
//! Optional HTTP surface for playing back stored clips and managing the
//! blacklist. Runs alongside the pipeline on the same store.

pub mod app;
pub mod handlers;

pub use app::{create_app, serve, AppState};
