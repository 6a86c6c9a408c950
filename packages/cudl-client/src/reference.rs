//! Accession references and the URL algebra derived from them.
//!
//! A CUDL landing page like
//! `https://cudl.lib.cam.ac.uk/view/MS-DAR-00100-00001/1` embeds the
//! accession identifier of the record it displays. Everything the client
//! needs — the TEI metadata endpoint and the IIIF tile URLs for the scans —
//! is computed from that identifier. No I/O happens in this module.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{CudlError, Result};

/// Base URL of the TEI metadata service.
const METADATA_BASE_URL: &str = "https://services.prod.env.cudl.link/v1/metadata/tei";

/// Base URL of the IIIF image server.
const IIIF_BASE_URL: &str = "https://images.lib.cam.ac.uk/iiif";

lazy_static! {
    // Accession identifier - uppercase letter groups followed by at least
    // one zero-padded numeric group, e.g. MS-DAR-00100-00001
    static ref ACCESSION_REGEX: Regex = Regex::new(
        r"[A-Z]+(?:-[A-Z]+)*(?:-\d+)+"
    ).unwrap();
}

/// IIIF region/size crop applied to derived image URLs.
///
/// Defaults to the library's social-card crop. Rotation is always 0 and
/// quality/format always `default.jpg`, which is all the tile server
/// serves for these scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IiifCrop {
    /// `{x},{y},{w},{h}` region parameter
    pub region: String,
    /// `{w},{h}` size parameter
    pub size: String,
}

impl Default for IiifCrop {
    fn default() -> Self {
        Self {
            region: "0,1938,3063,1608".to_string(),
            size: "1200,630".to_string(),
        }
    }
}

/// A validated CUDL landing-page URL and the accession identifier
/// extracted from it.
///
/// Immutable once parsed; all derived URLs are recomputed on demand and
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReference {
    url: String,
    identifier: String,
}

impl PageReference {
    /// Parse a landing-page URL, extracting its accession identifier.
    ///
    /// Fails with [`CudlError::MalformedReference`] when the URL is not a
    /// URL at all or its path carries no identifier segment.
    pub fn parse(url: &str) -> Result<Self> {
        let parsed = url::Url::parse(url).map_err(|_| CudlError::MalformedReference {
            url: url.to_string(),
        })?;

        let identifier = ACCESSION_REGEX
            .find(parsed.path())
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| CudlError::MalformedReference {
                url: url.to_string(),
            })?;

        Ok(Self {
            url: url.to_string(),
            identifier,
        })
    }

    /// The landing-page URL this reference was parsed from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The accession identifier, e.g. `MS-DAR-00100-00001`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// URL of the TEI metadata record for this reference.
    pub fn metadata_url(&self) -> String {
        format!("{}/{}", METADATA_BASE_URL, self.identifier)
    }

    /// IIIF tile URL for the scan at `sequence`, using the default crop.
    pub fn iiif_image_url(&self, sequence: u32) -> String {
        self.iiif_image_url_with_crop(sequence, &IiifCrop::default())
    }

    /// IIIF tile URL for the scan at `sequence` with an explicit crop.
    ///
    /// The image identifier is the accession identifier with a `-000-`
    /// separator and a five-digit zero-padded sequence number, which is
    /// how the library names its `.jp2` masters.
    pub fn iiif_image_url_with_crop(&self, sequence: u32, crop: &IiifCrop) -> String {
        format!(
            "{}/{}-000-{:05}.jp2/{}/{}/0/default.jpg",
            IIIF_BASE_URL, self.identifier, sequence, crop.region, crop.size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://cudl.lib.cam.ac.uk/view/MS-DAR-00100-00001/1";

    #[test]
    fn test_parse_extracts_identifier() {
        let page = PageReference::parse(PAGE_URL).unwrap();
        assert_eq!(page.identifier(), "MS-DAR-00100-00001");
        assert_eq!(page.url(), PAGE_URL);
    }

    #[test]
    fn test_parse_rejects_url_without_identifier() {
        let err = PageReference::parse("https://cudl.lib.cam.ac.uk/collections/darwin").unwrap_err();
        assert!(matches!(err, CudlError::MalformedReference { .. }));
    }

    #[test]
    fn test_parse_rejects_non_url() {
        let err = PageReference::parse("not a url").unwrap_err();
        assert!(matches!(err, CudlError::MalformedReference { .. }));
    }

    #[test]
    fn test_metadata_url_substitutes_identifier_verbatim() {
        let page = PageReference::parse(PAGE_URL).unwrap();
        assert_eq!(
            page.metadata_url(),
            "https://services.prod.env.cudl.link/v1/metadata/tei/MS-DAR-00100-00001"
        );
    }

    #[test]
    fn test_iiif_image_url_pads_sequence() {
        let page = PageReference::parse("https://cudl.lib.cam.ac.uk/view/MS-DAR-00101/265").unwrap();
        assert_eq!(
            page.iiif_image_url(265),
            "https://images.lib.cam.ac.uk/iiif/MS-DAR-00101-000-00265.jp2/0,1938,3063,1608/1200,630/0/default.jpg"
        );
    }

    #[test]
    fn test_iiif_image_url_is_deterministic() {
        let page = PageReference::parse(PAGE_URL).unwrap();
        assert_eq!(page.iiif_image_url(7), page.iiif_image_url(7));
    }

    #[test]
    fn test_iiif_image_url_with_custom_crop() {
        let page = PageReference::parse(PAGE_URL).unwrap();
        let crop = IiifCrop {
            region: "full".to_string(),
            size: "max".to_string(),
        };
        assert_eq!(
            page.iiif_image_url_with_crop(1, &crop),
            "https://images.lib.cam.ac.uk/iiif/MS-DAR-00100-00001-000-00001.jp2/full/max/0/default.jpg"
        );
    }
}
