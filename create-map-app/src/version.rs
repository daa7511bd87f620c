//! Dependency version normalization
//!
//! Range-prefix-aware comparison of dependency version strings. This is
//! deliberately not semver range resolution: a version is split into an
//! optional range prefix (`^`, `~`, `>=`, ...) and a dotted core, and
//! equality is decided on the core.

/// A version string split into range prefix and dotted core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    /// Leading range prefix, possibly empty
    pub prefix: String,
    /// Dotted numeric core
    pub core: String,
}

impl VersionSpec {
    /// Split a raw version string into prefix and core.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let core_start = raw
            .find(|c: char| !matches!(c, '^' | '~' | '>' | '=' | '<'))
            .unwrap_or(raw.len());
        Self {
            prefix: raw[..core_start].to_owned(),
            core: raw[core_start..].to_owned(),
        }
    }
}

/// Re-attach the local range prefix to a new remote core.
///
/// Only `^` and `~` survive; any other prefix (including none) defaults to
/// `^`, matching how the templates pin their dependencies.
#[must_use]
pub fn suggest(remote_core: &str, local: &str) -> String {
    let prefix = match local.chars().next() {
        Some(c @ ('^' | '~')) => c,
        _ => '^',
    };
    format!("{prefix}{remote_core}")
}

/// Whether a local dependency record should be flagged for update.
///
/// Flags only when both the raw strings differ and the cores differ, so a
/// prefix-only mismatch (`^1.2.3` local against a bare `1.2.3` remote) never
/// produces a false positive.
#[must_use]
pub fn needs_update(local: &str, remote_core: &str) -> bool {
    local != suggest(remote_core, local) && VersionSpec::normalize(local).core != remote_core
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_splits_prefix_and_core() {
        assert_eq!(
            VersionSpec::normalize("^1.2.3"),
            VersionSpec {
                prefix: "^".to_owned(),
                core: "1.2.3".to_owned()
            }
        );
        assert_eq!(VersionSpec::normalize(">=2.0.0").prefix, ">=");
        assert_eq!(VersionSpec::normalize("1.2.3").prefix, "");
        assert_eq!(VersionSpec::normalize("~0.4.1").core, "0.4.1");
    }

    #[test]
    fn test_suggest_keeps_caret_and_tilde() {
        assert_eq!(suggest("1.2.3", "^1.0.0"), "^1.2.3");
        assert_eq!(suggest("1.2.3", "~1.0.0"), "~1.2.3");
    }

    #[test]
    fn test_suggest_defaults_to_caret() {
        assert_eq!(suggest("1.2.3", "1.0.0"), "^1.2.3");
        assert_eq!(suggest("1.2.3", ">=1.0.0"), "^1.2.3");
    }

    #[test]
    fn test_prefix_only_mismatch_is_not_flagged() {
        // Local is up to date modulo the range prefix
        assert!(!needs_update("^1.2.3", "1.2.3"));
        assert!(!needs_update("~1.2.3", "1.2.3"));
        assert!(!needs_update("1.2.3", "1.2.3"));
    }

    #[test]
    fn test_stale_core_is_flagged() {
        assert!(needs_update("^1.2.2", "1.2.3"));
        assert!(needs_update("~0.9.0", "1.0.0"));
        assert!(needs_update("2.0.0", "2.0.1"));
    }
}
