//! Per-framework injection targets
//!
//! The supported frameworks form a closed set; matching on [`Framework`] is
//! exhaustive, so an unsupported framework is a compile error here rather
//! than a silent missing-key lookup at run time. Each variant knows its
//! anchor patterns, its app file, and (for React, which factors the widget
//! into its own file) the standalone component path.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::Regex;

use super::{snippets, SnippetSet};

/// Framework flavor of a generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    /// React + Vite
    React,
    /// Vue + Vite
    Vue,
    /// Svelte + Vite
    Svelte,
    /// Angular CLI
    Angular,
    /// Vanilla JS + Vite
    Vanilla,
    /// Vanilla JS loaded straight from the CDN, no bundler
    VanillaNoBundler,
}

/// Anchor patterns for one framework.
///
/// `import_line` matches a single import/include line; the import anchor is
/// the end of the leading contiguous run of such lines. `logic` carries one
/// capture group holding the opening token of the map-setup body; the logic
/// snippet is inserted immediately after it, preserving the token.
pub struct AnchorSet {
    /// One import or include line, including its newline
    pub import_line: Regex,
    /// Opening of the function/component body that sets up the map
    pub logic: Regex,
}

impl Framework {
    /// Every supported framework, in prompt order.
    pub const ALL: [Self; 6] = [
        Self::React,
        Self::Vue,
        Self::Svelte,
        Self::Angular,
        Self::Vanilla,
        Self::VanillaNoBundler,
    ];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
            Self::Svelte => "svelte",
            Self::Angular => "angular",
            Self::Vanilla => "vanilla",
            Self::VanillaNoBundler => "vanilla-no-bundler",
        }
    }

    /// Path of the app source file inside a generated project.
    #[must_use]
    pub fn app_file(self, project_root: &Path) -> PathBuf {
        let relative = match self {
            Self::React => "src/App.jsx",
            Self::Vue => "src/App.vue",
            Self::Svelte => "src/App.svelte",
            Self::Angular => "src/app/app.component.ts",
            Self::Vanilla => "src/main.js",
            Self::VanillaNoBundler => "index.html",
        };
        project_root.join(relative)
    }

    /// Path of the standalone widget component, for frameworks that factor
    /// the widget into its own file.
    #[must_use]
    pub fn component_file(self, project_root: &Path) -> Option<PathBuf> {
        match self {
            Self::React => Some(project_root.join("src/components/SearchBoxComponent.jsx")),
            _ => None,
        }
    }

    /// Anchor patterns for this framework's app file.
    #[must_use]
    pub fn anchors(self) -> AnchorSet {
        let (import_line, logic) = match self {
            Self::React => (
                r"(?m)^import .*\n",
                r"(function App\(\)[^{]*\{|const App = \(\) => \{)",
            ),
            Self::Vue => (
                r"(?m)^import .*\n",
                r"(onMounted\(\s*\(\)\s*=>\s*\{|mounted\(\)\s*\{)",
            ),
            Self::Svelte => (
                r"(?m)^\s*import .*\n",
                r"(onMount\(\s*\(\)\s*=>\s*\{)",
            ),
            Self::Angular => (
                r"(?m)^import .*\n",
                r"(ngOnInit\(\)[^{]*\{)",
            ),
            Self::Vanilla => (
                r"(?m)^import .*\n",
                r"(map\.on\(\s*['\x22]load['\x22],\s*\(\)\s*=>\s*\{)",
            ),
            Self::VanillaNoBundler => (
                r"(?m)^\s*<(?:link|script)\b[^>]*>.*\n",
                r"(map\.on\(\s*['\x22]load['\x22],\s*\(\)\s*=>\s*\{)",
            ),
        };

        AnchorSet {
            import_line: Regex::new(import_line).expect("static import pattern is valid"),
            logic: Regex::new(logic).expect("static logic pattern is valid"),
        }
    }

    /// npm package that backs the search widget for this framework.
    ///
    /// The no-bundler flavor loads the widget straight from the CDN and
    /// needs no install.
    #[must_use]
    pub const fn search_package(self) -> Option<&'static str> {
        match self {
            Self::React => Some("@mapbox/search-js-react"),
            Self::VanillaNoBundler => None,
            _ => Some("@mapbox/search-js-web"),
        }
    }

    /// Embedded search snippets for this framework.
    #[must_use]
    pub fn snippets(self) -> SnippetSet {
        match self {
            Self::React => snippets::react(),
            Self::Vue => snippets::vue(),
            Self::Svelte => snippets::svelte(),
            Self::Angular => snippets::angular(),
            Self::Vanilla => snippets::vanilla(),
            Self::VanillaNoBundler => snippets::vanilla_no_bundler(),
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|framework| framework.name() == s.to_lowercase())
            .ok_or_else(|| {
                format!(
                    "unknown framework '{s}' (expected one of: {})",
                    Self::ALL.map(Self::name).join(", ")
                )
            })
    }
}
