// Remote lookup client - one GET per lookup, no retries
//
// The client is async and always runs on the worker runtime; the render
// thread never blocks on it.

use crate::model::CreatureRecord;
use crate::parser::{parse_creature, ParseError};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Public creature API base endpoint
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Connect and overall request timeout (reference behavior: 5 s each)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    /// Any non-success status; the API answers 404 for unknown creatures
    #[error("creature not found (HTTP {status})")]
    NotFound { status: u16 },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image fetch failed (HTTP {status})")]
    Status { status: u16 },

    #[error("network error fetching image: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A lookup that got a document but could not turn it into a record
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub struct LookupClient {
    http: reqwest::Client,
    base_url: String,
}

impl LookupClient {
    pub fn new(config: ClientConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(LookupClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Request URL for one identifier: lowercased, trimmed, appended as a
    /// path segment
    pub fn lookup_url(&self, identifier: &str) -> String {
        format!(
            "{}/pokemon/{}",
            self.base_url,
            identifier.trim().to_lowercase()
        )
    }

    /// Fetch the raw creature document for a name or numeric id.
    pub async fn fetch_by_identifier(&self, identifier: &str) -> Result<String, LookupError> {
        let url = self.lookup_url(identifier);
        debug!(%url, "looking up creature");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "lookup returned non-success status");
            return Err(LookupError::NotFound {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetch and parse in one step; this is the whole lookup pipeline minus
    /// validation.
    pub async fn lookup_creature(&self, identifier: &str) -> Result<CreatureRecord, FetchError> {
        let body = self.fetch_by_identifier(identifier).await?;
        Ok(parse_creature(&body)?)
    }

    /// Fetch raw artwork bytes. Decoding happens at the caller, which
    /// substitutes a placeholder on any failure.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ImageError> {
        debug!(%url, "fetching artwork");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "artwork fetch returned non-success status");
            return Err(ImageError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> LookupClient {
        LookupClient::new(ClientConfig {
            base_url: base_url.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_lookup_url_appends_identifier() {
        let client = test_client("https://pokeapi.co/api/v2");
        assert_eq!(
            client.lookup_url("pikachu"),
            "https://pokeapi.co/api/v2/pokemon/pikachu"
        );
        assert_eq!(
            client.lookup_url("25"),
            "https://pokeapi.co/api/v2/pokemon/25"
        );
    }

    #[test]
    fn test_lookup_url_lowercases_and_trims() {
        let client = test_client("https://pokeapi.co/api/v2");
        assert_eq!(
            client.lookup_url("  Pikachu "),
            "https://pokeapi.co/api/v2/pokemon/pikachu"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let client = test_client("https://pokeapi.co/api/v2/");
        assert_eq!(
            client.lookup_url("ditto"),
            "https://pokeapi.co/api/v2/pokemon/ditto"
        );
    }
}
