use log::debug;
use serde::de::DeserializeOwned;
use std::path::Path;

use super::{ContentServiceError, PathwayOccurrence, RawResource, UploadResponse};

/// Public Reactome content service.
pub const DEFAULT_BASE_URL: &str = "https://reactome.org/ContentService";

/// Blocking client for the pathway content service.
///
/// Cheap to clone; interactive callers hand clones to worker threads via
/// [`super::RequestSlot`].
#[derive(Debug, Clone)]
pub struct ContentService {
    base_url: String,
}

impl ContentService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the PSICQUIC interactor resources.
    pub fn psicquic_resources(&self) -> Result<Vec<RawResource>, ContentServiceError> {
        let url = format!("{}/interactors/psicquic/resources", self.base_url);
        self.get_json(&url)
    }

    /// Pathways in which `molecule` occurs, filtered by species.
    pub fn interactor_occurrences(
        &self,
        molecule: &str,
        species: &str,
    ) -> Result<Vec<PathwayOccurrence>, ContentServiceError> {
        let url = format!(
            "{}/interactors/static/molecule/{}/pathways?species={}",
            self.base_url,
            encode_component(molecule),
            encode_component(species)
        );
        self.get_json(&url)
    }

    /// Submit a URL the service should fetch tuples from.
    pub fn submit_tuple_url(
        &self,
        name: &str,
        url: &str,
    ) -> Result<UploadResponse, ContentServiceError> {
        let action = self.upload_action("url", name);
        self.post_json(&action, url, "text/plain")
    }

    /// Submit pasted tuple content.
    pub fn submit_tuple_content(
        &self,
        name: &str,
        content: &str,
    ) -> Result<UploadResponse, ContentServiceError> {
        let action = self.upload_action("content", name);
        self.post_json(&action, content, "text/plain")
    }

    /// Submit a local tuple file.
    pub fn submit_tuple_file(
        &self,
        name: &str,
        path: &Path,
    ) -> Result<UploadResponse, ContentServiceError> {
        let content = std::fs::read_to_string(path)?;
        let action = self.upload_action("form", name);
        self.post_json(&action, &content, "text/plain")
    }

    fn upload_action(&self, kind: &str, name: &str) -> String {
        format!(
            "{}/interactors/upload/tuple/{}?name={}",
            self.base_url,
            kind,
            encode_component(name)
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ContentServiceError> {
        debug!("GET {url}");
        let result = ureq::get(url).header("Accept", "application/json").call();
        let mut response = check(url, result)?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(ContentServiceError::Transport)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &str,
        content_type: &str,
    ) -> Result<T, ContentServiceError> {
        debug!("POST {url}");
        let result = ureq::post(url)
            .header("Accept", "application/json")
            .header("Content-Type", content_type)
            .send(body);
        let mut response = check(url, result)?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(ContentServiceError::Transport)?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for ContentService {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Map a ureq result into the typed failure taxonomy: non-2xx statuses
/// become [`ContentServiceError::Status`], everything else is transport.
pub(crate) fn check(
    url: &str,
    result: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> Result<ureq::http::Response<ureq::Body>, ContentServiceError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::StatusCode(status)) => Err(ContentServiceError::Status {
            url: url.to_owned(),
            status,
        }),
        Err(other) => Err(ContentServiceError::Transport(other)),
    }
}

/// Minimal percent-encoding for a single path or query component.
pub(crate) fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("CHEBI:15377"), "CHEBI%3A15377");
        assert_eq!(encode_component("Homo sapiens"), "Homo%20sapiens");
        assert_eq!(encode_component("Q9Y6K9"), "Q9Y6K9");
    }

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let service = ContentService::new("https://reactome.org/ContentService/");
        assert_eq!(service.base_url(), "https://reactome.org/ContentService");
    }

    #[test]
    fn test_upload_action_urls() {
        let service = ContentService::new("http://localhost:8080/api");
        assert_eq!(
            service.upload_action("content", "my data"),
            "http://localhost:8080/api/interactors/upload/tuple/content?name=my%20data"
        );
    }
}
