//! Request type definitions
//!
//! Inbound shapes for the clip server's routes.

use serde::{Deserialize, Serialize};

/// JSON body of the blacklist mutation routes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlacklistRequest {
    /// Clip to blacklist or un-blacklist; a missing slug is a 400
    pub slug: Option<String>,
}

impl BlacklistRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

/// Shared-secret query parameter guarding privileged routes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretQuery {
    /// Caller-supplied secret, compared for exact equality
    pub webserver_secret_token: Option<String>,
}
