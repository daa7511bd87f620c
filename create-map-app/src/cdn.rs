//! CDN reference scanner
//!
//! Extracts versioned CDN URL fragments from raw template text. Two
//! independent URL families can live in the same document (the GL engine
//! assets and the search widget assets); each pattern is scanned and
//! reported separately, with occurrence counts taken against its own
//! matches.

use regex::Regex;
use serde::Serialize;

use crate::patch;

/// A versioned CDN URL family tracked inside template text.
///
/// The regex carries exactly one capture group: the dotted version embedded
/// in the URL path.
pub struct CdnPattern {
    fragment: &'static str,
    regex: Regex,
}

/// One version substitution for a scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CdnUpdate {
    /// Versioned path fragment this update applies to
    pub fragment: &'static str,
    /// Version currently embedded in the file
    pub old_version: String,
    /// Version it should be replaced with
    pub new_version: String,
    /// How many times the old version occurs
    pub occurrences: usize,
}

impl CdnPattern {
    /// CDN family for the GL engine assets.
    #[must_use]
    pub fn mapbox_gl() -> Self {
        Self::new("mapbox-gl-js")
    }

    /// CDN family for the search widget assets.
    #[must_use]
    pub fn search_js() -> Self {
        Self::new("search-js")
    }

    fn new(fragment: &'static str) -> Self {
        let pattern = format!(r"https://api\.mapbox\.com/{fragment}/v([\d.]+)/");
        Self {
            fragment,
            regex: Regex::new(&pattern).expect("static CDN pattern is valid"),
        }
    }

    /// Fragment name, for reports.
    #[must_use]
    pub const fn fragment(&self) -> &'static str {
        self.fragment
    }

    /// Distinct versions captured in `text`, in first-seen order, each with
    /// its occurrence count.
    #[must_use]
    pub fn scan(&self, text: &str) -> Vec<(String, usize)> {
        let mut found: Vec<(String, usize)> = Vec::new();
        for capture in self.regex.captures_iter(text) {
            let version = &capture[1];
            if let Some((_, count)) = found.iter_mut().find(|(v, _)| v == version) {
                *count += 1;
            } else {
                found.push((version.to_owned(), 1));
            }
        }
        found
    }

    /// Report a [`CdnUpdate`] for every scanned version that differs from
    /// `target`.
    #[must_use]
    pub fn updates_against(&self, text: &str, target: &str) -> Vec<CdnUpdate> {
        self.scan(text)
            .into_iter()
            .filter(|(version, _)| version != target)
            .map(|(old_version, occurrences)| CdnUpdate {
                fragment: self.fragment,
                old_version,
                new_version: target.to_owned(),
                occurrences,
            })
            .collect()
    }
}

impl CdnUpdate {
    /// Apply this substitution to `text` by literal replacement.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        patch::replace_versioned_fragment(text, self.fragment, &self.old_version, &self.new_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"<link href="https://api.mapbox.com/mapbox-gl-js/v2.9.0/mapbox-gl.css" rel="stylesheet">
<script src="https://api.mapbox.com/mapbox-gl-js/v2.9.0/mapbox-gl.js"></script>
<script src="https://api.mapbox.com/mapbox-gl-js/v2.9.1/mapbox-gl.js"></script>
<script src="https://api.mapbox.com/search-js/v1.0.0/web.js"></script>
"#;

    #[test]
    fn test_scan_deduplicates_by_version() {
        let found = CdnPattern::mapbox_gl().scan(HTML);
        assert_eq!(
            found,
            vec![("2.9.0".to_owned(), 2), ("2.9.1".to_owned(), 1)]
        );
    }

    #[test]
    fn test_updates_against_target() {
        let updates = CdnPattern::mapbox_gl().updates_against(HTML, "2.9.1");
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].old_version, "2.9.0");
        assert_eq!(updates[0].new_version, "2.9.1");
        assert_eq!(updates[0].occurrences, 2);
    }

    #[test]
    fn test_patterns_are_tracked_independently() {
        let gl = CdnPattern::mapbox_gl().updates_against(HTML, "2.9.1");
        let search = CdnPattern::search_js().updates_against(HTML, "1.2.0");

        assert_eq!(gl.len(), 1);
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].fragment, "search-js");
        assert_eq!(search[0].old_version, "1.0.0");
        // Counted against its own matches, not the engine pattern's
        assert_eq!(search[0].occurrences, 1);
    }

    #[test]
    fn test_no_links_found() {
        assert!(CdnPattern::mapbox_gl().scan("<html></html>").is_empty());
    }

    #[test]
    fn test_apply_replaces_all_occurrences() {
        let update = CdnUpdate {
            fragment: "mapbox-gl-js",
            old_version: "2.9.0".to_owned(),
            new_version: "2.9.1".to_owned(),
            occurrences: 2,
        };
        let patched = update.apply(HTML);
        assert!(!patched.contains("v2.9.0/"));
        assert_eq!(patched.matches("mapbox-gl-js/v2.9.1/").count(), 3);
        // The unrelated search-js reference is untouched
        assert!(patched.contains("search-js/v1.0.0/"));
    }
}
