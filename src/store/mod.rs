//! Persistent clip storage
//!
//! SQLite-backed ledger shared by the pipeline (writer) and the clip server
//! (reader/writer).

pub mod clip_store;

pub use clip_store::ClipStore;
