#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Client side of the complaint dashboard.
//!
//! [`GorodApi`] is the seam between the dashboard logic and the backend;
//! [`ApiClient`] implements it over HTTP with a cookie store so that the
//! admin session set by `POST /auth/login` is sent with review requests.
//! On top of it sit the submission guard ([`StatementDraft`]), the review
//! queue ([`ReviewQueue`]), statement import and the dashboard loaders.

pub mod dashboard;
pub mod draft;
pub mod http;
pub mod import;
pub mod progress;
pub mod review;

pub use dashboard::{CategoryFilter, Dashboard, MapLoad, load_map};
pub use draft::StatementDraft;
pub use http::ApiClient;
pub use import::{ImportReport, import_statements, read_statements};
pub use progress::{NullProgress, ProgressCallback, null_progress};
pub use review::ReviewQueue;

use gorod_aggregation::{AggregationError, BoundaryFeature};
use gorod_api_models::{CategoryCounts, PeriodCounts, Statement};
use gorod_district_models::DistrictCounts;
use thiserror::Error;

/// Backend URL used when `GOROD_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Public path of the district boundary asset.
pub const DEFAULT_BOUNDARIES_PATH: &str = "/districts.geojson";

/// Errors returned by client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The boundary asset could not be parsed.
    #[error("Boundary data error: {0}")]
    Boundaries(#[from] AggregationError),

    /// The statement list was refused; an admin login is required.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Login failed.
    #[error("Login rejected: {0}")]
    LoginRejected(String),

    /// A submission is missing required fields. No request was sent.
    #[error("Request is incomplete, missing: {}", .missing.join(", "))]
    IncompleteDraft {
        /// Names of the empty fields.
        missing: Vec<&'static str>,
    },

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message from the response envelope, or the raw body.
        message: String,
    },
}

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and port, without the `/api` prefix.
    pub base_url: String,
    /// Path of the boundary `GeoJSON` under the public root.
    pub boundaries_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            boundaries_path: DEFAULT_BOUNDARIES_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads `GOROD_API_URL`, falling back to [`DEFAULT_API_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("GOROD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Full URL of an `/api` endpoint.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url.trim_end_matches('/'))
    }

    /// Full URL of a file under the public root.
    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Operations offered by the backend.
#[async_trait::async_trait]
pub trait GorodApi: Send + Sync {
    /// `GET /analitic/district`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    async fn district_counts(&self) -> Result<DistrictCounts, ClientError>;

    /// `GET /analitic/period`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    async fn period_counts(&self) -> Result<PeriodCounts, ClientError>;

    /// `GET /analitic/categories/{districtId}`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decoding fails.
    async fn category_counts(&self, district_id: u8) -> Result<CategoryCounts, ClientError>;

    /// The district boundary asset.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the asset is not a
    /// `GeoJSON` `FeatureCollection`.
    async fn boundaries(&self) -> Result<Vec<BoundaryFeature>, ClientError>;

    /// `GET /statement`, the statements awaiting review.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] for any non-success
    /// status.
    async fn list_statements(&self) -> Result<Vec<Statement>, ClientError>;

    /// `POST /statement` with a one-element array.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    async fn create_statement(&self, statement: &Statement) -> Result<Vec<Statement>, ClientError>;

    /// `PATCH /statement/{id}` with the approved record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    async fn accept(&self, statement: &Statement) -> Result<Vec<Statement>, ClientError>;

    /// `DELETE /statement/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or is rejected.
    async fn reject(&self, id: u64) -> Result<(), ClientError>;

    /// `POST /auth/login`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::LoginRejected`] if the credentials are
    /// refused.
    async fn login(&self, username: &str, password: &str) -> Result<(), ClientError>;

    /// Validates `draft` and submits it. Nothing is sent when a required
    /// field is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::IncompleteDraft`] before any request when the
    /// draft is incomplete, otherwise whatever
    /// [`GorodApi::create_statement`] returns.
    async fn submit(&self, draft: &StatementDraft) -> Result<Vec<Statement>, ClientError> {
        let statement = draft.to_statement()?;
        self.create_statement(&statement).await
    }
}
