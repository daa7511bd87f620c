//! Snippet injection engine
//!
//! Splices the optional search feature into an already-generated project's
//! source files. Anchors are per-framework patterns; a missed anchor is a
//! localized warning and the rest of the file is left byte-identical, never
//! a partial or garbled rewrite.
//!
//! Injection is intended to run once per generated file. As a guard against
//! accidental re-invocation, a snippet that is already present is detected
//! and reported as a warning instead of being inserted a second time.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::SyncError;
use crate::store;

mod framework;
mod snippets;

pub use framework::{AnchorSet, Framework};

/// Feature snippets for one framework, read-only for the duration of one
/// injection.
pub struct SnippetSet {
    /// Import/include lines appended after the target's import block
    pub imports: &'static str,
    /// Standalone widget component, persisted as a sibling file where the
    /// framework factors the widget out (React only)
    pub component: Option<&'static str>,
    /// Setup code spliced into the map-initialization body
    pub search_logic: &'static str,
}

/// Result of one injection pass over a source buffer.
#[derive(Debug)]
pub struct InjectionOutcome {
    /// Rewritten source text
    pub text: String,
    /// Non-fatal anchor misses and already-present notices
    pub warnings: Vec<SyncError>,
}

impl InjectionOutcome {
    /// Whether every snippet was spliced without a warning.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Splice `snippets` into `source` at the framework's anchors.
///
/// The import snippet is inserted at the end of the leading contiguous
/// import/include block; the logic snippet is inserted immediately after
/// the captured opening token of the map-setup body, preserving the token.
/// Each anchor is resolved independently: a miss on one does not undo the
/// other insertion. `path` is used only for warning context.
#[must_use]
pub fn inject(
    source: &str,
    path: &Path,
    anchors: &AnchorSet,
    snippets: &SnippetSet,
) -> InjectionOutcome {
    let mut text = source.to_owned();
    let mut warnings = Vec::new();

    splice_imports(&mut text, path, anchors, snippets.imports, &mut warnings);
    splice_logic(&mut text, path, anchors, snippets.search_logic, &mut warnings);

    InjectionOutcome { text, warnings }
}

fn splice_imports(
    text: &mut String,
    path: &Path,
    anchors: &AnchorSet,
    snippet: &str,
    warnings: &mut Vec<SyncError>,
) {
    if text.contains(snippet.trim()) {
        warnings.push(SyncError::SnippetAlreadyPresent {
            anchor: "imports",
            path: path.to_path_buf(),
        });
        return;
    }

    match import_block_end(text, &anchors.import_line) {
        Some(at) => text.insert_str(at, snippet),
        None => warnings.push(SyncError::AnchorNotFound {
            anchor: "imports",
            path: path.to_path_buf(),
        }),
    }
}

fn splice_logic(
    text: &mut String,
    path: &Path,
    anchors: &AnchorSet,
    snippet: &str,
    warnings: &mut Vec<SyncError>,
) {
    if text.contains(snippet.trim()) {
        warnings.push(SyncError::SnippetAlreadyPresent {
            anchor: "logic",
            path: path.to_path_buf(),
        });
        return;
    }

    // Offsets may have shifted if the import splice ran first, so the logic
    // anchor is re-matched against the current buffer.
    match anchors.logic.captures(text).and_then(|cap| cap.get(1)) {
        Some(opening) => text.insert_str(opening.end(), snippet),
        None => warnings.push(SyncError::AnchorNotFound {
            anchor: "logic",
            path: path.to_path_buf(),
        }),
    }
}

/// End of the leading contiguous run of import/include lines.
///
/// Whitespace-only gaps (blank lines between import groups) do not break
/// the run; the first non-import content does.
fn import_block_end(text: &str, import_line: &Regex) -> Option<usize> {
    let mut matches = import_line.find_iter(text);
    let first = matches.next()?;
    let mut end = first.end();

    for found in matches {
        let gap = &text[end..found.start()];
        if gap.chars().all(char::is_whitespace) {
            end = found.end();
        } else {
            break;
        }
    }

    Some(end)
}

/// Inject the search feature into one materialized project.
///
/// Reads the framework's app file under `project_root`, splices the
/// snippets, and writes the result back. For frameworks that factor the
/// widget into a standalone file, the component is persisted next to the
/// app sources. Anchor misses are returned as warnings; the call fails only
/// when the app file cannot be read or written.
///
/// Callers should invoke this once per generated project.
///
/// # Errors
///
/// Returns [`SyncError::LocalRead`] if the app file cannot be read and
/// [`SyncError::Write`] if persisting the patched file or the component
/// fails.
pub fn add_search_feature(
    framework: Framework,
    project_root: &Path,
) -> Result<Vec<SyncError>, SyncError> {
    let app_path = framework.app_file(project_root);
    let source = store::read_text(&app_path)?;
    let snippets = framework.snippets();

    let outcome = inject(&source, &app_path, &framework.anchors(), &snippets);
    if outcome.text != source {
        store::write_text(&app_path, &outcome.text)?;
    }

    if let (Some(component), Some(component_path)) = (
        snippets.component,
        framework.component_file(project_root),
    ) {
        if let Some(parent) = component_path.parent() {
            fs::create_dir_all(parent).map_err(|source| SyncError::Write {
                path: component_path.clone(),
                source,
            })?;
        }
        store::write_text(&component_path, component)?;
    }

    Ok(outcome.warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP: &str = "import { useRef, useEffect } from 'react'\nimport mapboxgl from 'mapbox-gl'\n\nimport 'mapbox-gl/dist/mapbox-gl.css';\nimport './App.css'\n\nfunction App() {\n\n  const mapRef = useRef()\n\n  return <div id='map-container' ref={mapRef} />\n}\n\nexport default App\n";

    fn snippet_set(imports: &'static str, logic: &'static str) -> SnippetSet {
        SnippetSet {
            imports,
            component: None,
            search_logic: logic,
        }
    }

    #[test]
    fn test_inject_inserts_each_snippet_exactly_once() {
        let snippets = snippet_set("import X;\n", "\n  doX();\n");
        let outcome = inject(APP, Path::new("App.jsx"), &Framework::React.anchors(), &snippets);

        assert!(outcome.is_clean());
        assert_eq!(outcome.text.matches("import X;").count(), 1);
        assert_eq!(outcome.text.matches("doX();").count(), 1);

        // Imports land at the end of the import block, before the blank line
        let import_at = outcome.text.find("import X;").unwrap();
        let block_end = outcome.text.find("import './App.css'\n").unwrap() + "import './App.css'\n".len();
        assert_eq!(import_at, block_end);

        // Logic lands immediately after the opening token, which survives
        assert!(outcome.text.contains("function App() {\n  doX();\n"));
    }

    #[test]
    fn test_inject_leaves_rest_of_file_byte_identical() {
        let snippets = snippet_set("import X;\n", "\n  doX();\n");
        let outcome = inject(APP, Path::new("App.jsx"), &Framework::React.anchors(), &snippets);

        let stripped = outcome
            .text
            .replace("import X;\n", "")
            .replace("\n  doX();\n", "");
        assert_eq!(stripped, APP);
    }

    #[test]
    fn test_missing_logic_anchor_still_inserts_imports() {
        let source = "import mapboxgl from 'mapbox-gl'\n\nconst x = 1;\n";
        let snippets = snippet_set("import X;\n", "doX();\n");
        let outcome = inject(
            source,
            Path::new("main.js"),
            &Framework::Vanilla.anchors(),
            &snippets,
        );

        assert!(outcome.text.contains("import X;"));
        assert!(!outcome.text.contains("doX();"));
        assert_eq!(outcome.warnings.len(), 1);
        assert!(matches!(
            outcome.warnings[0],
            SyncError::AnchorNotFound { anchor: "logic", .. }
        ));
    }

    #[test]
    fn test_no_anchors_leaves_file_unmodified() {
        let source = "const x = 1;\n";
        let snippets = snippet_set("import X;\n", "doX();\n");
        let outcome = inject(
            source,
            Path::new("main.js"),
            &Framework::Vanilla.anchors(),
            &snippets,
        );

        assert_eq!(outcome.text, source);
        assert_eq!(outcome.warnings.len(), 2);
    }

    #[test]
    fn test_second_pass_reports_already_present() {
        let snippets = snippet_set("import X;\n", "\n  doX();\n");
        let anchors = Framework::React.anchors();
        let first = inject(APP, Path::new("App.jsx"), &anchors, &snippets);
        assert!(first.is_clean());

        let second = inject(&first.text, Path::new("App.jsx"), &anchors, &snippets);
        assert_eq!(second.text, first.text);
        assert_eq!(second.warnings.len(), 2);
        assert!(matches!(
            second.warnings[0],
            SyncError::SnippetAlreadyPresent { anchor: "imports", .. }
        ));
    }

    #[test]
    fn test_import_block_tolerates_blank_lines() {
        let anchors = Framework::React.anchors();
        let end = import_block_end(APP, &anchors.import_line).unwrap();
        // The run covers all four import lines despite the blank line
        assert_eq!(&APP[end - "import './App.css'\n".len()..end], "import './App.css'\n");
    }

    #[test]
    fn test_import_block_stops_at_code() {
        let source = "import a from 'a'\nconst x = 1;\nimport b from 'b'\n";
        let anchors = Framework::Vanilla.anchors();
        let end = import_block_end(source, &anchors.import_line).unwrap();
        assert_eq!(end, "import a from 'a'\n".len());
    }
}
