//! Version information utilities
//!
//! Provides access to the crate version for the startup banner.

/// Get the current crate version
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_version_format() {
        // Expect a semver-shaped version string
        let version = get_version();
        let parts: Vec<&str> = version.split('.').collect();
        assert!(parts.len() >= 2, "version should be semver: {version}");
        assert!(parts[0].parse::<u32>().is_ok());
    }
}
