//! Pure Cambridge Digital Library (CUDL) client.
//!
//! A minimal client for the library's public services: it resolves a
//! landing-page URL to the record's TEI metadata endpoint, fetches the raw
//! TEI/XML, and derives IIIF tile URLs for the associated manuscript scans.
//!
//! The client does no parsing: metadata payloads are returned verbatim and
//! interpreting them is the caller's job. Transport goes through the
//! [`Fetch`] seam so tests run against canned responses.
//!
//! # Example
//!
//! ```rust,ignore
//! use cudl_client::{CudlClient, HttpFetch};
//!
//! let client = CudlClient::new(HttpFetch::new());
//!
//! let tei = client
//!     .get_metadata("https://cudl.lib.cam.ac.uk/view/MS-DAR-00100-00001/1")
//!     .await?;
//! ```

pub mod error;
pub mod fetch;
pub mod reference;
pub mod testing;

pub use error::{CudlError, Result};
pub use fetch::{Fetch, FetchResponse, HttpFetch};
pub use reference::{IiifCrop, PageReference};

/// Client over a [`Fetch`] transport.
///
/// Carries no state beyond the transport and the IIIF crop policy; every
/// operation re-derives its URLs from the page reference it is given.
pub struct CudlClient<F: Fetch> {
    fetch: F,
    crop: IiifCrop,
}

impl<F: Fetch> CudlClient<F> {
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            crop: IiifCrop::default(),
        }
    }

    /// Override the IIIF region/size crop used for derived image URLs.
    pub fn with_crop(mut self, crop: IiifCrop) -> Self {
        self.crop = crop;
        self
    }

    /// Fetch the raw TEI metadata for a landing-page URL.
    ///
    /// Resolves the metadata-service URL, issues a single fetch (no
    /// retries), and returns the body verbatim on 2xx. Any other status is
    /// [`CudlError::FileNotFoundAtUrl`] carrying the failing URL and
    /// status - callers never receive a payload for a failed fetch.
    pub async fn get_metadata(&self, page_url: &str) -> Result<String> {
        let page = PageReference::parse(page_url)?;
        let url = page.metadata_url();

        tracing::info!(
            identifier = page.identifier(),
            url = %url,
            fetcher = self.fetch.name(),
            "fetching TEI metadata"
        );
        let response = self.fetch.fetch(&url).await?;

        if !response.is_success() {
            return Err(CudlError::FileNotFoundAtUrl {
                url,
                status: response.status,
            });
        }
        Ok(response.body)
    }

    /// Derive the IIIF tile URL for the scan at `sequence`, confirming the
    /// image exists.
    ///
    /// A single fetch probes the derived URL: 404 means the library has no
    /// scan there ([`CudlError::ImageNotFound`]); any other non-2xx is a
    /// [`CudlError::FileNotFoundAtUrl`] so callers can tell "no scan at
    /// this sequence" from "image service down".
    pub async fn get_iiif_image_url(&self, page_url: &str, sequence: u32) -> Result<String> {
        let page = PageReference::parse(page_url)?;
        let url = page.iiif_image_url_with_crop(sequence, &self.crop);

        tracing::info!(
            identifier = page.identifier(),
            sequence,
            url = %url,
            "probing IIIF image"
        );
        let response = self.fetch.fetch(&url).await?;

        match response.status {
            s if response.is_success() => {
                tracing::debug!(url = %url, status = s, "image exists");
                Ok(url)
            }
            404 => Err(CudlError::ImageNotFound { url }),
            status => Err(CudlError::FileNotFoundAtUrl { url, status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetch;

    const PAGE_URL: &str = "https://cudl.lib.cam.ac.uk/view/MS-DAR-00100-00001/1";
    const METADATA_URL: &str =
        "https://services.prod.env.cudl.link/v1/metadata/tei/MS-DAR-00100-00001";

    fn image_url(sequence: u32) -> String {
        format!(
            "https://images.lib.cam.ac.uk/iiif/MS-DAR-00100-00001-000-{:05}.jp2/0,1938,3063,1608/1200,630/0/default.jpg",
            sequence
        )
    }

    #[tokio::test]
    async fn test_get_metadata_returns_body_verbatim() {
        let tei = "<TEI>\n  <teiHeader/>\n</TEI>";
        let fetch = MockFetch::new().with_response(METADATA_URL, 200, tei);
        let client = CudlClient::new(fetch.clone());

        let payload = client.get_metadata(PAGE_URL).await.unwrap();
        assert_eq!(payload, tei);
        // round-trip integrity: nothing truncated or transcoded
        assert_eq!(payload.len(), tei.len());
        assert_eq!(fetch.calls(), vec![METADATA_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_get_metadata_500_raises_file_not_found() {
        let fetch = MockFetch::new().with_status(METADATA_URL, 500);
        let client = CudlClient::new(fetch);

        let err = client.get_metadata(PAGE_URL).await.unwrap_err();
        match err {
            CudlError::FileNotFoundAtUrl { url, status } => {
                assert_eq!(url, METADATA_URL);
                assert_eq!(status, 500);
            }
            other => panic!("expected FileNotFoundAtUrl, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_metadata_404_raises_file_not_found() {
        let fetch = MockFetch::new().with_status(METADATA_URL, 404);
        let client = CudlClient::new(fetch);

        let err = client.get_metadata(PAGE_URL).await.unwrap_err();
        assert!(matches!(
            err,
            CudlError::FileNotFoundAtUrl { status: 404, .. }
        ));
    }

    #[tokio::test]
    async fn test_get_metadata_malformed_reference_before_any_io() {
        let fetch = MockFetch::new();
        let client = CudlClient::new(fetch.clone());

        let err = client
            .get_metadata("https://cudl.lib.cam.ac.uk/collections/darwin")
            .await
            .unwrap_err();
        assert!(matches!(err, CudlError::MalformedReference { .. }));
        assert_eq!(fetch.call_count(), 0);
    }

    #[tokio::test]
    async fn test_get_iiif_image_url_returns_derived_url_on_success() {
        let fetch = MockFetch::new().with_status(&image_url(265), 200);
        let client = CudlClient::new(fetch);

        let url = client.get_iiif_image_url(PAGE_URL, 265).await.unwrap();
        assert_eq!(url, image_url(265));
    }

    #[tokio::test]
    async fn test_get_iiif_image_url_404_is_image_not_found() {
        let fetch = MockFetch::new().with_status(&image_url(9), 404);
        let client = CudlClient::new(fetch);

        let err = client.get_iiif_image_url(PAGE_URL, 9).await.unwrap_err();
        assert!(matches!(err, CudlError::ImageNotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_iiif_image_url_other_failure_is_file_not_found() {
        let fetch = MockFetch::new().with_status(&image_url(9), 503);
        let client = CudlClient::new(fetch);

        let err = client.get_iiif_image_url(PAGE_URL, 9).await.unwrap_err();
        assert!(matches!(
            err,
            CudlError::FileNotFoundAtUrl { status: 503, .. }
        ));
    }

    #[tokio::test]
    async fn test_custom_crop_flows_into_probe_url() {
        let crop = IiifCrop {
            region: "full".to_string(),
            size: "max".to_string(),
        };
        let url =
            "https://images.lib.cam.ac.uk/iiif/MS-DAR-00100-00001-000-00001.jp2/full/max/0/default.jpg";
        let fetch = MockFetch::new().with_status(url, 200);
        let client = CudlClient::new(fetch).with_crop(crop);

        let derived = client.get_iiif_image_url(PAGE_URL, 1).await.unwrap();
        assert_eq!(derived, url);
    }
}
