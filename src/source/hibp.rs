//! Live breach source backed by the Have I Been Pwned v3 API.

use std::time::Duration;

use super::{BreachSource, SourceError, SourceFuture};
use crate::domain::RawBreachEntry;

const DEFAULT_BASE_URL: &str = "https://haveibeenpwned.com/api/v3";

/// HIBP `breachedaccount` client.
///
/// Wire behavior follows the v3 API: 404 means "no breaches on record"
/// (success), 401 means bad credentials, 429 carries a `Retry-After`
/// header. Every request sends the `hibp-api-key` and `user-agent`
/// headers and asks for untruncated responses.
#[derive(Debug, Clone)]
pub struct HibpSource {
    client: reqwest::Client,
    api_key: String,
    user_agent: String,
    base_url: String,
}

impl HibpSource {
    /// Creates a new client with the given credentials and per-request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unavailable`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(api_key: &str, user_agent: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            user_agent: user_agent.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL (test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn fetch(&self, email: &str) -> Result<Vec<RawBreachEntry>, SourceError> {
        if self.api_key.is_empty() {
            return Err(SourceError::Unauthorized);
        }

        let url = format!("{}/breachedaccount/{email}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("truncateResponse", "false")])
            .header("hibp-api-key", &self.api_key)
            .header("user-agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        match response.status().as_u16() {
            // 404 = account not found in any breach
            404 => Ok(Vec::new()),
            401 => Err(SourceError::Unauthorized),
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("2")
                    .to_string();
                Err(SourceError::RateLimited(retry_after))
            }
            status if !response.status().is_success() => {
                Err(SourceError::Unavailable(format!("upstream status {status}")))
            }
            _ => response
                .json::<Vec<RawBreachEntry>>()
                .await
                .map_err(|e| SourceError::Malformed(e.to_string())),
        }
    }
}

impl BreachSource for HibpSource {
    fn lookup<'a>(&'a self, email: &'a str) -> SourceFuture<'a> {
        Box::pin(self.fetch(email))
    }

    fn name(&self) -> &'static str {
        "hibp"
    }
}
