//! Remote source adapter
//!
//! Fetches JSON documents from upstream sources: the npm registry and the
//! raw create-vite repository. This is the only module that touches the
//! network; everything above it goes through [`RemoteSource`] so checks can
//! run against canned documents in tests.
//!
//! Every request is bounded by the agent-level timeout. A failed or
//! timed-out fetch surfaces as [`SyncError::Fetch`] and aborts only the
//! check that needed it.

use std::time::Duration;

use serde_json::Value;

use crate::error::SyncError;

/// npm registry base URL
pub const NPM_REGISTRY_BASE: &str = "https://registry.npmjs.org";

/// Raw base URL of the upstream create-vite templates
pub const VITE_TEMPLATE_BASE: &str =
    "https://raw.githubusercontent.com/vitejs/vite/main/packages/create-vite";

/// Default per-request timeout
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// A source of remote JSON documents
pub trait RemoteSource {
    /// Fetch and parse one JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Fetch`] if the request fails or times out, or
    /// [`SyncError::RemoteJson`] if the body is not valid JSON.
    fn fetch_json(&self, url: &str) -> Result<Value, SyncError>;

    /// Look up the latest published version of an npm package.
    ///
    /// # Errors
    ///
    /// Returns a fetch/parse error for the registry request, or
    /// [`SyncError::RemoteShape`] if the `latest` document has no `version`
    /// field.
    fn latest_npm_version(&self, package: &str) -> Result<String, SyncError> {
        let url = format!("{NPM_REGISTRY_BASE}/{package}/latest");
        let doc = self.fetch_json(&url)?;
        doc.get("version")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(SyncError::RemoteShape {
                url,
                detail: "missing `version` field".to_owned(),
            })
    }
}

/// HTTP implementation backed by a shared [`ureq::Agent`]
pub struct HttpRemote {
    agent: ureq::Agent,
}

impl HttpRemote {
    /// Create a remote with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    /// Create a remote with a custom global timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.into(),
        }
    }
}

impl Default for HttpRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteSource for HttpRemote {
    fn fetch_json(&self, url: &str) -> Result<Value, SyncError> {
        let response = self.agent.get(url).call().map_err(|e| SyncError::Fetch {
            url: url.to_owned(),
            source: Box::new(e),
        })?;

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| SyncError::Fetch {
                url: url.to_owned(),
                source: Box::new(e),
            })?;

        serde_json::from_str(&body).map_err(|source| SyncError::RemoteJson {
            url: url.to_owned(),
            source,
        })
    }
}
