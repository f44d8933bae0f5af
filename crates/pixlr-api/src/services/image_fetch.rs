//! Opens the image referenced by a GET save callback

use std::io;
use std::time::Duration;

use futures::TryStreamExt;
use pixlr_core::{AppError, Config, ImageOrigin, ImageStream};
use reqwest::Url;

#[derive(Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
    allowlist: Option<Vec<String>>,
}

impl ImageFetcher {
    pub fn new(timeout: Duration, allowlist: Option<Vec<String>>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            Duration::from_secs(config.image_fetch_timeout_secs),
            config.image_url_allowlist.clone(),
        )
    }

    /// Check that `url` is an absolute http(s) URL on an allowed host
    pub fn validate_url(&self, url: &str) -> Result<Url, AppError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::InvalidInput("Image URL is empty".to_string()));
        }

        let parsed = Url::parse(url)
            .map_err(|_| AppError::InvalidInput(format!("Invalid image URL: {}", url)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::InvalidInput(
                "Only HTTP and HTTPS image URLs are allowed".to_string(),
            ));
        }

        if let Some(allowlist) = &self.allowlist {
            let host = parsed.host_str().unwrap_or_default();
            if !host_allowed(host, allowlist) {
                tracing::warn!(url = %url, host = %host, "Image URL host not in allowlist");
                return Err(AppError::InvalidInput(format!(
                    "Image host '{}' is not allowed",
                    host
                )));
            }
        }

        Ok(parsed)
    }

    /// Connect to `url` and return its body as a stream.
    ///
    /// Only the response head is awaited here; the body is read as the
    /// handler consumes the stream.
    #[tracing::instrument(skip(self), fields(operation = "fetch_image"))]
    pub async fn open(&self, url: &str) -> Result<ImageStream, AppError> {
        let parsed = self.validate_url(url)?;

        let response = self.client.get(parsed).send().await.map_err(|e| {
            tracing::error!(error = %e, url = %url, "Failed to connect to image URL");
            AppError::ImageFetch(format!("{}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(AppError::ImageFetch(format!(
                "{} returned status code: {}",
                url,
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        tracing::debug!(url = %url, content_type = ?content_type, "Connected to image URL");

        let body = response.bytes_stream().map_err(io::Error::other);
        let image = ImageStream::from_stream(body, ImageOrigin::Url(url.to_string()));

        Ok(match content_type {
            Some(content_type) => image.with_content_type(content_type),
            None => image,
        })
    }
}

/// Exact host match or subdomain of an allowlisted host
fn host_allowed(host: &str, allowlist: &[String]) -> bool {
    let host = host.to_lowercase();
    allowlist
        .iter()
        .any(|allowed| host == *allowed || host.ends_with(&format!(".{}", allowed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(allowlist: Option<Vec<String>>) -> ImageFetcher {
        ImageFetcher::new(Duration::from_secs(5), allowlist).unwrap()
    }

    #[test]
    fn rejects_non_http_schemes() {
        let fetcher = fetcher(None);
        assert!(matches!(
            fetcher.validate_url("file:///etc/passwd"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            fetcher.validate_url("ftp://example.com/a.png"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_malformed_urls() {
        let fetcher = fetcher(None);
        assert!(fetcher.validate_url("not a url").is_err());
        assert!(fetcher.validate_url("   ").is_err());
    }

    #[test]
    fn allowlist_matches_hosts_and_subdomains() {
        let allowlist = vec!["pixlr.com".to_string()];
        assert!(host_allowed("pixlr.com", &allowlist));
        assert!(host_allowed("Apps.Pixlr.com", &allowlist));
        assert!(!host_allowed("evilpixlr.com", &allowlist));
        assert!(!host_allowed("pixlr.com.evil.net", &allowlist));
    }

    #[test]
    fn allowlist_is_enforced() {
        let fetcher = fetcher(Some(vec!["pixlr.com".to_string()]));
        assert!(fetcher.validate_url("https://apps.pixlr.com/_temp/a.png").is_ok());
        assert!(fetcher.validate_url("http://127.0.0.1/a.png").is_err());
    }
}
