//! Content-service REST plumbing.
//!
//! The viewer issues a handful of read-only JSON requests (interactor
//! resource lists, pathway occurrences) plus tuple uploads against a single
//! content-service base URL. All calls are blocking; interactive callers run
//! them through a [`RequestSlot`] so at most one request per endpoint is in
//! flight and stale responses are discarded by generation stamp.

mod chemical;
mod client;
mod pending;

pub use chemical::{ChemicalImage, ChemicalImageLoader, CHEBI_IMAGE_BASE};
pub use client::{ContentService, DEFAULT_BASE_URL};
pub use pending::RequestSlot;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure taxonomy for content-service calls.
///
/// Nothing here is fatal: callers surface the message next to the initiating
/// control and the user may retry. No request is retried automatically.
#[derive(Debug, Error)]
pub enum ContentServiceError {
    #[error("{url}: server answered {status}")]
    Status { url: String, status: u16 },
    #[error("transport failure: {0}")]
    Transport(#[source] ureq::Error),
    #[error("malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One interactor resource as listed by the content service. Inactive
/// resources stay listed but are disabled in the settings tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResource {
    pub name: String,
    #[serde(default)]
    pub active: bool,
}

/// A pathway in which a queried interactor occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayOccurrence {
    pub st_id: String,
    pub display_name: String,
    #[serde(default)]
    pub species_name: Option<String>,
    #[serde(default)]
    pub has_diagram: bool,
}

/// Parsed response of a tuple upload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(default)]
    pub summary: Option<UploadSummary>,
    #[serde(default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub warning_messages: Vec<String>,
}

impl UploadResponse {
    /// An upload succeeded when the service minted a token and reported no
    /// errors; warnings alone do not fail a submission.
    pub fn is_success(&self) -> bool {
        self.summary.is_some() && self.error_messages.is_empty()
    }
}

/// The token block of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub token: String,
    pub name: String,
    #[serde(default)]
    pub interactions: u64,
}
