//! Configuration management for clipcast
//!
//! This module handles loading and validating configuration for the clip
//! pipeline and the optional clip server.

pub mod settings;

pub use settings::Settings;
