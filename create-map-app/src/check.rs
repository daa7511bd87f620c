//! Template check orchestration
//!
//! Routes each tracked template through the checker its flavor needs: the
//! Vite-based templates diff against the upstream create-vite
//! `package.json`, the Angular template checks every dependency against the
//! npm registry, and the no-bundler template scans its HTML for versioned
//! CDN references.
//!
//! Checking is remote-authoritative and read-only; a report's pending
//! changes are persisted separately via [`TemplateReport::apply`]. Failures
//! are localized: a fetch or read error becomes a warning on that one
//! template (or package) and the batch always completes.

use std::collections::HashSet;
use std::path::PathBuf;

use serde_json::Value;

use crate::cdn::{CdnPattern, CdnUpdate};
use crate::diff::{diff_trees, ChangeRecord};
use crate::error::SyncError;
use crate::patch;
use crate::remote::{RemoteSource, VITE_TEMPLATE_BASE};
use crate::store;
use crate::version;

/// npm package whose release pins the map engine version everywhere
pub const MAPBOX_GL_PACKAGE: &str = "mapbox-gl";

/// npm package tracking the search widget CDN bundle
pub const SEARCH_JS_PACKAGE: &str = "@mapbox/search-js-web";

/// One tracked template flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// React, synced against the upstream create-vite template
    React,
    /// Vue, synced against the upstream create-vite template
    Vue,
    /// Svelte, synced against the upstream create-vite template
    Svelte,
    /// Vanilla JS, synced against the upstream create-vite template
    Vanilla,
    /// Angular, checked dependency-by-dependency against the npm registry
    Angular,
    /// No-bundler vanilla JS, checked by scanning CDN URLs in its HTML
    VanillaNoBundler,
}

impl TemplateKind {
    /// Every tracked template, in check order.
    pub const ALL: [Self; 6] = [
        Self::React,
        Self::Vue,
        Self::Svelte,
        Self::Vanilla,
        Self::Angular,
        Self::VanillaNoBundler,
    ];

    /// Local template directory name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
            Self::Svelte => "svelte",
            Self::Vanilla => "vanilla",
            Self::Angular => "angular",
            Self::VanillaNoBundler => "vanilla-no-bundler",
        }
    }

    /// Upstream create-vite template directory, for Vite-based flavors.
    #[must_use]
    pub const fn vite_upstream(self) -> Option<&'static str> {
        match self {
            Self::React => Some("template-react"),
            Self::Vue => Some("template-vue"),
            Self::Svelte => Some("template-svelte"),
            Self::Vanilla => Some("template-vanilla"),
            Self::Angular | Self::VanillaNoBundler => None,
        }
    }
}

/// Pending CDN substitutions for one scanned text file.
#[derive(Debug)]
pub struct CdnFileReport {
    /// File the updates apply to
    pub path: PathBuf,
    /// Substitutions, one per stale version per pattern
    pub updates: Vec<CdnUpdate>,
}

/// Everything the checker found for one template.
#[derive(Debug)]
pub struct TemplateReport {
    /// Which template this report covers
    pub template: TemplateKind,
    /// The template's configuration file (target of structured patches)
    pub local_path: PathBuf,
    /// Pending structured corrections to the configuration file
    pub package_changes: Vec<ChangeRecord>,
    /// Pending textual CDN substitutions, per scanned file
    pub cdn_files: Vec<CdnFileReport>,
    /// Localized failures that did not stop the check
    pub warnings: Vec<String>,
}

impl TemplateReport {
    fn new(template: TemplateKind, local_path: PathBuf) -> Self {
        Self {
            template,
            local_path,
            package_changes: Vec::new(),
            cdn_files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Whether anything needs updating.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.package_changes.is_empty() || !self.cdn_files.is_empty()
    }

    /// Total number of pending corrections.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.package_changes.len() + self.cdn_files.iter().map(|f| f.updates.len()).sum::<usize>()
    }

    /// Persist every pending change for this template.
    ///
    /// Structured changes go through the JSON patch applier (full tree in
    /// memory, single write); CDN changes through the textual applier.
    ///
    /// # Errors
    ///
    /// Returns the first [`SyncError`] hit while patching; a failure on one
    /// file aborts this template only, callers continue with siblings.
    pub fn apply(&self) -> Result<(), SyncError> {
        if !self.package_changes.is_empty() {
            patch::apply_changes_to_file(&self.local_path, &self.package_changes)?;
        }
        for file in &self.cdn_files {
            patch::apply_cdn_updates_to_file(&file.path, &file.updates)?;
        }
        Ok(())
    }
}

/// Checks every tracked template against its authoritative source.
pub struct TemplateChecker<'a> {
    remote: &'a dyn RemoteSource,
    templates_root: PathBuf,
}

impl<'a> TemplateChecker<'a> {
    /// Create a checker over the local `templates/` tree.
    pub fn new(remote: &'a dyn RemoteSource, templates_root: impl Into<PathBuf>) -> Self {
        Self {
            remote,
            templates_root: templates_root.into(),
        }
    }

    /// Latest published map engine version; pins `mapbox-gl` everywhere.
    ///
    /// # Errors
    ///
    /// Propagates the registry fetch failure; without this version no
    /// template can be checked, so this is the one fetch that is not
    /// localized.
    pub fn latest_mapbox_gl(&self) -> Result<String, SyncError> {
        self.remote.latest_npm_version(MAPBOX_GL_PACKAGE)
    }

    /// Check every tracked template.
    ///
    /// Always returns one report per template; failures surface as warnings
    /// on the affected report, never abort the batch.
    #[must_use]
    pub fn check_all(&self, latest_gl: &str) -> Vec<TemplateReport> {
        TemplateKind::ALL
            .into_iter()
            .map(|kind| self.check_template(kind, latest_gl))
            .collect()
    }

    /// Check one template with the checker its flavor needs.
    #[must_use]
    pub fn check_template(&self, kind: TemplateKind, latest_gl: &str) -> TemplateReport {
        match kind {
            TemplateKind::Angular => self.check_registry(kind, latest_gl),
            TemplateKind::VanillaNoBundler => self.check_cdn(kind, latest_gl),
            _ => self.check_vite(kind, latest_gl),
        }
    }

    fn package_json_path(&self, kind: TemplateKind) -> PathBuf {
        self.templates_root.join(kind.name()).join("package.json")
    }

    /// Vite flavors: diff the whole local package.json against upstream,
    /// then pin mapbox-gl to the latest release.
    fn check_vite(&self, kind: TemplateKind, latest_gl: &str) -> TemplateReport {
        let local_path = self.package_json_path(kind);
        let mut report = TemplateReport::new(kind, local_path.clone());

        let Some(upstream) = kind.vite_upstream() else {
            report
                .warnings
                .push(format!("{} has no Vite upstream", kind.name()));
            return report;
        };
        let url = format!("{VITE_TEMPLATE_BASE}/{upstream}/package.json");

        let remote = match self.remote.fetch_json(&url) {
            Ok(doc) => doc,
            Err(err) => {
                report.warnings.push(err.to_string());
                return report;
            }
        };
        let local = match store::read_json(&local_path) {
            Ok(doc) => doc,
            Err(err) => {
                report.warnings.push(err.to_string());
                return report;
            }
        };

        // The template keeps its own package name
        let ignores: HashSet<&str> = ["name"].into_iter().collect();
        report.package_changes = diff_trees(&remote, &local, &ignores);

        push_mapbox_gl_pin(&mut report.package_changes, &local, latest_gl);
        report
    }

    /// Angular flavor: no Vite upstream, so every dependency is checked
    /// against the npm registry individually. A failed lookup for one
    /// package warns and moves on.
    fn check_registry(&self, kind: TemplateKind, latest_gl: &str) -> TemplateReport {
        let local_path = self.package_json_path(kind);
        let mut report = TemplateReport::new(kind, local_path.clone());

        let local = match store::read_json(&local_path) {
            Ok(doc) => doc,
            Err(err) => {
                report.warnings.push(err.to_string());
                return report;
            }
        };

        for section in ["dependencies", "devDependencies"] {
            let Some(deps) = local.get(section).and_then(Value::as_object) else {
                continue;
            };

            for (package, value) in deps {
                let Some(current) = value.as_str() else {
                    continue;
                };

                // mapbox-gl is pinned by the already-fetched release
                if package == MAPBOX_GL_PACKAGE {
                    let suggested = format!("^{latest_gl}");
                    if current != suggested {
                        report.package_changes.push(ChangeRecord {
                            path: vec![section.to_owned(), package.clone()],
                            old_value: Some(Value::String(current.to_owned())),
                            new_value: Value::String(suggested),
                        });
                    }
                    continue;
                }

                let latest = match self.remote.latest_npm_version(package) {
                    Ok(v) => v,
                    Err(err) => {
                        report.warnings.push(err.to_string());
                        continue;
                    }
                };

                if version::needs_update(current, &latest) {
                    report.package_changes.push(ChangeRecord {
                        path: vec![section.to_owned(), package.clone()],
                        old_value: Some(Value::String(current.to_owned())),
                        new_value: Value::String(version::suggest(&latest, current)),
                    });
                }
            }
        }

        report
    }

    /// No-bundler flavor: scan the tracked HTML files for both CDN URL
    /// families and compare against the latest releases.
    fn check_cdn(&self, kind: TemplateKind, latest_gl: &str) -> TemplateReport {
        let base_path = self.templates_root.join(kind.name()).join("index.html");
        let search_enabled_path = self
            .templates_root
            .join("shared/search-enabled-apps")
            .join(kind.name())
            .join("index.html");
        let mut report = TemplateReport::new(kind, base_path.clone());

        // The widget CDN version comes from its npm release; if the lookup
        // fails, the engine URLs are still checked.
        let latest_search = match self.remote.latest_npm_version(SEARCH_JS_PACKAGE) {
            Ok(v) => Some(v),
            Err(err) => {
                report.warnings.push(err.to_string());
                None
            }
        };

        let gl_cdn = CdnPattern::mapbox_gl();
        let search_cdn = CdnPattern::search_js();

        for path in [base_path, search_enabled_path] {
            let text = match store::read_text(&path) {
                Ok(t) => t,
                Err(err) => {
                    report.warnings.push(err.to_string());
                    continue;
                }
            };

            let mut updates = gl_cdn.updates_against(&text, latest_gl);
            if let Some(search_version) = &latest_search {
                updates.extend(search_cdn.updates_against(&text, search_version));
            }
            if !updates.is_empty() {
                report.cdn_files.push(CdnFileReport { path, updates });
            }
        }

        report
    }
}

/// Flag `dependencies.mapbox-gl` when it is not pinned to `^<latest>`.
fn push_mapbox_gl_pin(changes: &mut Vec<ChangeRecord>, local: &Value, latest_gl: &str) {
    let suggested = format!("^{latest_gl}");
    let current = local
        .pointer("/dependencies/mapbox-gl")
        .and_then(Value::as_str);
    if current != Some(suggested.as_str()) {
        changes.push(ChangeRecord {
            path: vec!["dependencies".to_owned(), MAPBOX_GL_PACKAGE.to_owned()],
            old_value: current.map(|v| Value::String(v.to_owned())),
            new_value: Value::String(suggested),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    /// Canned remote keyed by URL; unknown URLs fail like a dead network.
    struct StubRemote {
        documents: HashMap<String, Value>,
    }

    impl StubRemote {
        fn new(entries: &[(&str, Value)]) -> Self {
            Self {
                documents: entries
                    .iter()
                    .map(|(url, doc)| ((*url).to_owned(), doc.clone()))
                    .collect(),
            }
        }
    }

    impl RemoteSource for StubRemote {
        fn fetch_json(&self, url: &str) -> Result<Value, SyncError> {
            self.documents
                .get(url)
                .cloned()
                .ok_or_else(|| SyncError::RemoteShape {
                    url: url.to_owned(),
                    detail: "no canned response".to_owned(),
                })
        }
    }

    fn write_template_json(root: &std::path::Path, template: &str, doc: &Value) {
        let dir = root.join(template);
        fs::create_dir_all(&dir).unwrap();
        store::write_json(&dir.join("package.json"), doc).unwrap();
    }

    #[test]
    fn test_vite_template_reports_upstream_and_gl_changes() {
        let dir = tempdir().unwrap();
        write_template_json(
            dir.path(),
            "react",
            &json!({
                "name": "mapbox-react-app",
                "dependencies": { "react": "^18.2.0", "mapbox-gl": "^1.2.2" },
                "devDependencies": { "vite": "^5.3.0" }
            }),
        );

        let remote = StubRemote::new(&[(
            "https://raw.githubusercontent.com/vitejs/vite/main/packages/create-vite/template-react/package.json",
            json!({
                "name": "vite-react-starter",
                "dependencies": { "react": "^18.3.1" },
                "devDependencies": { "vite": "^5.4.0" }
            }),
        )]);

        let checker = TemplateChecker::new(&remote, dir.path());
        let report = checker.check_template(TemplateKind::React, "1.2.3");

        assert!(report.warnings.is_empty());
        let paths: Vec<String> = report
            .package_changes
            .iter()
            .map(ChangeRecord::dotted_path)
            .collect();
        // `name` is ignored; react + vite from upstream, mapbox-gl pinned
        assert_eq!(
            paths,
            vec![
                "dependencies.react",
                "devDependencies.vite",
                "dependencies.mapbox-gl"
            ]
        );

        let gl = report.package_changes.last().unwrap();
        assert_eq!(gl.old_value, Some(json!("^1.2.2")));
        assert_eq!(gl.new_value, json!("^1.2.3"));
    }

    #[test]
    fn test_vite_template_prefix_only_gl_pin_is_quiet() {
        let dir = tempdir().unwrap();
        write_template_json(
            dir.path(),
            "vanilla",
            &json!({ "dependencies": { "mapbox-gl": "^1.2.3" } }),
        );
        let remote = StubRemote::new(&[(
            "https://raw.githubusercontent.com/vitejs/vite/main/packages/create-vite/template-vanilla/package.json",
            json!({ "dependencies": {} }),
        )]);

        let checker = TemplateChecker::new(&remote, dir.path());
        let report = checker.check_template(TemplateKind::Vanilla, "1.2.3");
        assert!(!report.has_changes());
    }

    #[test]
    fn test_fetch_failure_is_localized_to_one_template() {
        let dir = tempdir().unwrap();
        write_template_json(
            dir.path(),
            "react",
            &json!({ "dependencies": { "mapbox-gl": "^3.8.0" } }),
        );

        // No canned vite documents at all
        let remote = StubRemote::new(&[]);
        let checker = TemplateChecker::new(&remote, dir.path());
        let reports = checker.check_all("3.8.0");

        assert_eq!(reports.len(), TemplateKind::ALL.len());
        let react = &reports[0];
        assert_eq!(react.template, TemplateKind::React);
        assert!(!react.has_changes());
        assert_eq!(react.warnings.len(), 1);
    }

    #[test]
    fn test_missing_local_file_warns_and_reports_zero_changes() {
        let dir = tempdir().unwrap();
        let remote = StubRemote::new(&[(
            "https://raw.githubusercontent.com/vitejs/vite/main/packages/create-vite/template-svelte/package.json",
            json!({ "dependencies": {} }),
        )]);

        let checker = TemplateChecker::new(&remote, dir.path());
        let report = checker.check_template(TemplateKind::Svelte, "3.8.0");

        assert!(!report.has_changes());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("package.json"));
    }

    #[test]
    fn test_registry_template_checks_each_dependency() {
        let dir = tempdir().unwrap();
        write_template_json(
            dir.path(),
            "angular",
            &json!({
                "dependencies": {
                    "@angular/core": "^17.0.0",
                    "mapbox-gl": "^3.7.0"
                },
                "devDependencies": { "typescript": "~5.4.0" }
            }),
        );

        let remote = StubRemote::new(&[
            (
                "https://registry.npmjs.org/@angular/core/latest",
                json!({ "version": "17.1.0" }),
            ),
            (
                "https://registry.npmjs.org/typescript/latest",
                json!({ "version": "5.4.0" }),
            ),
        ]);

        let checker = TemplateChecker::new(&remote, dir.path());
        let report = checker.check_template(TemplateKind::Angular, "3.8.0");

        assert!(report.warnings.is_empty());
        assert_eq!(report.package_changes.len(), 2);

        let core = &report.package_changes[0];
        assert_eq!(core.dotted_path(), "dependencies.@angular/core");
        assert_eq!(core.new_value, json!("^17.1.0"));

        // mapbox-gl came from the pinned release, not the registry
        let gl = &report.package_changes[1];
        assert_eq!(gl.dotted_path(), "dependencies.mapbox-gl");
        assert_eq!(gl.new_value, json!("^3.8.0"));

        // typescript is current modulo prefix, so it stays quiet
        assert!(report
            .package_changes
            .iter()
            .all(|c| !c.dotted_path().contains("typescript")));
    }

    #[test]
    fn test_registry_lookup_failure_skips_only_that_package() {
        let dir = tempdir().unwrap();
        write_template_json(
            dir.path(),
            "angular",
            &json!({
                "dependencies": {
                    "@angular/core": "^17.0.0",
                    "rxjs": "^7.8.0"
                }
            }),
        );

        let remote = StubRemote::new(&[(
            "https://registry.npmjs.org/rxjs/latest",
            json!({ "version": "7.8.2" }),
        )]);

        let checker = TemplateChecker::new(&remote, dir.path());
        let report = checker.check_template(TemplateKind::Angular, "3.8.0");

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("@angular/core"));
        assert_eq!(report.package_changes.len(), 1);
        assert_eq!(report.package_changes[0].dotted_path(), "dependencies.rxjs");
    }

    #[test]
    fn test_cdn_template_scans_both_patterns() {
        let dir = tempdir().unwrap();
        let template_dir = dir.path().join("vanilla-no-bundler");
        fs::create_dir_all(&template_dir).unwrap();
        fs::write(
            template_dir.join("index.html"),
            concat!(
                "<link href=\"https://api.mapbox.com/mapbox-gl-js/v2.9.0/mapbox-gl.css\" rel=\"stylesheet\">\n",
                "<script src=\"https://api.mapbox.com/mapbox-gl-js/v2.9.0/mapbox-gl.js\"></script>\n",
                "<script src=\"https://api.mapbox.com/search-js/v1.0.0/web.js\"></script>\n",
            ),
        )
        .unwrap();

        let remote = StubRemote::new(&[(
            "https://registry.npmjs.org/@mapbox/search-js-web/latest",
            json!({ "version": "1.2.0" }),
        )]);

        let checker = TemplateChecker::new(&remote, dir.path());
        let report = checker.check_template(TemplateKind::VanillaNoBundler, "2.9.1");

        // The search-enabled variant file is absent: warned, not fatal
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.cdn_files.len(), 1);

        let updates = &report.cdn_files[0].updates;
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].fragment, "mapbox-gl-js");
        assert_eq!(updates[0].old_version, "2.9.0");
        assert_eq!(updates[0].occurrences, 2);
        assert_eq!(updates[1].fragment, "search-js");
        assert_eq!(updates[1].new_version, "1.2.0");
    }

    #[test]
    fn test_report_apply_converges() {
        let dir = tempdir().unwrap();
        write_template_json(
            dir.path(),
            "react",
            &json!({
                "dependencies": { "react": "^18.2.0", "mapbox-gl": "^3.7.0" }
            }),
        );

        let remote = StubRemote::new(&[(
            "https://raw.githubusercontent.com/vitejs/vite/main/packages/create-vite/template-react/package.json",
            json!({ "dependencies": { "react": "^18.3.1" } }),
        )]);

        let checker = TemplateChecker::new(&remote, dir.path());
        let report = checker.check_template(TemplateKind::React, "3.8.0");
        assert!(report.has_changes());
        report.apply().unwrap();

        let recheck = checker.check_template(TemplateKind::React, "3.8.0");
        assert!(!recheck.has_changes(), "re-check found {recheck:?}");
    }
}
