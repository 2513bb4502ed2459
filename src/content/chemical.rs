use log::debug;
use std::io::Read;

use super::client::check;
use super::ContentServiceError;
use crate::events::{DiagramEvent, EventBus};

/// ChEBI 2D structure depiction endpoint.
pub const CHEBI_IMAGE_BASE: &str = "https://www.ebi.ac.uk/chebi/displayImage.do";

/// A fetched structure depiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChemicalImage {
    pub identifier: String,
    pub png: Vec<u8>,
}

/// Fetches 2D structure depictions for chemical nodes.
///
/// Constructed once per viewer instance and passed to whoever needs it; the
/// loader is stateless apart from the event bus it notifies on completed
/// loads.
#[derive(Clone)]
pub struct ChemicalImageLoader {
    bus: EventBus,
}

impl ChemicalImageLoader {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    /// Bare ChEBI id: strips a leading `CHEBI` with an optional `-`, `:` or
    /// `_` separator. Bare numeric identifiers pass through unchanged.
    pub fn chebi_id(identifier: &str) -> &str {
        match identifier.strip_prefix("CHEBI") {
            Some(rest) => rest.strip_prefix(['-', ':', '_']).unwrap_or(rest),
            None => identifier,
        }
    }

    pub fn image_url(identifier: &str) -> String {
        format!(
            "{CHEBI_IMAGE_BASE}?defaultImage=true&chebiId={}&dimensions=200&transbg=true",
            Self::chebi_id(identifier)
        )
    }

    /// Fetch the depiction for `identifier`, firing
    /// [`DiagramEvent::StructureImageLoaded`] on success.
    pub fn load(&self, identifier: &str) -> Result<ChemicalImage, ContentServiceError> {
        let url = Self::image_url(identifier);
        debug!("GET {url}");
        let result = ureq::get(url.as_str()).call();
        let mut response = check(&url, result)?;
        let mut png = Vec::new();
        response.body_mut().as_reader().read_to_end(&mut png)?;
        self.bus.fire(&DiagramEvent::StructureImageLoaded {
            identifier: identifier.to_owned(),
        });
        Ok(ChemicalImage {
            identifier: identifier.to_owned(),
            png,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_normalization() {
        for id in ["CHEBI:15377", "CHEBI-15377", "CHEBI_15377", "CHEBI15377", "15377"] {
            assert_eq!(ChemicalImageLoader::chebi_id(id), "15377", "from {id}");
        }
    }

    #[test]
    fn test_image_url() {
        let url = ChemicalImageLoader::image_url("CHEBI:15377");
        assert_eq!(
            url,
            "https://www.ebi.ac.uk/chebi/displayImage.do?defaultImage=true&chebiId=15377&dimensions=200&transbg=true"
        );
    }
}
