//! Error types emitted by the Stopover CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use stopover_core::{PlanError, WaypointStoreError};
use stopover_oracle::{BackendError, OracleBuildError};

/// Errors emitted by the Stopover CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// CLI flag name.
        field: &'static str,
        /// Environment variable fallback.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// CLI flag name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// Opening the request file failed.
    #[error("failed to open request at {path:?}: {source}")]
    OpenRequest {
        /// Request file path.
        path: Utf8PathBuf,
        #[source]
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Request JSON could not be decoded.
    #[error("failed to parse request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request file path.
        path: Utf8PathBuf,
        #[source]
        /// Underlying decode error.
        source: serde_json::Error,
    },
    /// The request holds more stops than a trip can carry.
    #[error("request in {path:?} was rejected: {source}")]
    RejectedWaypoint {
        /// Request file path.
        path: Utf8PathBuf,
        #[source]
        /// Store-level rejection.
        source: WaypointStoreError,
    },
    /// Constructing the backend HTTP client failed.
    #[error("failed to build backend client for {base_url:?}: {source}")]
    BuildBackendClient {
        /// Configured backend base URL.
        base_url: String,
        #[source]
        /// Underlying construction error.
        source: OracleBuildError,
    },
    /// Planning the route failed.
    #[error("planning failed: {source}")]
    Plan {
        #[source]
        /// Underlying planning error.
        source: PlanError,
    },
    /// An informational backend endpoint failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// Serializing the response failed.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[source] serde_json::Error),
    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
