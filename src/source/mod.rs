//! Breach-source lookup: the port consumed by the check orchestrator and
//! its two implementations (live HIBP-style API, simulated catalog).

pub mod hibp;
pub mod simulated;

use std::future::Future;
use std::pin::Pin;

use crate::domain::RawBreachEntry;

pub use hibp::HibpSource;
pub use simulated::SimulatedSource;

/// Boxed future returned by [`BreachSource::lookup`].
pub type SourceFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<RawBreachEntry>, SourceError>> + Send + 'a>>;

/// Failure modes of a breach-source lookup.
///
/// All of these are recoverable from the orchestrator's point of view:
/// any error from the primary source triggers the fallback source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// Network failure, timeout, or unexpected upstream status.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// Upstream rejected the request rate.
    #[error("source rate limited; retry after {0}s")]
    RateLimited(String),

    /// Missing or rejected API credentials.
    #[error("source credentials missing or rejected")]
    Unauthorized,

    /// The response body could not be decoded.
    #[error("malformed source payload: {0}")]
    Malformed(String),
}

/// Secondary port for breach-data providers.
///
/// Uses a `Pin<Box<dyn Future>>` return type (instead of RPITIT) so the
/// trait is dyn-compatible and can be used as `Arc<dyn BreachSource>`.
pub trait BreachSource: Send + Sync {
    /// Returns the raw breach entries on record for `email`.
    ///
    /// An account with no known breaches is `Ok(vec![])`, not an error.
    fn lookup<'a>(&'a self, email: &'a str) -> SourceFuture<'a>;

    /// Short identifier for logs (`"hibp"`, `"simulated"`).
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptySource;

    impl BreachSource for EmptySource {
        fn lookup<'a>(&'a self, _email: &'a str) -> SourceFuture<'a> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn name(&self) -> &'static str {
            "empty"
        }
    }

    #[test]
    fn breach_source_is_dyn_compatible() {
        let source: Box<dyn BreachSource> = Box::new(EmptySource);
        assert_eq!(source.name(), "empty");
    }

    #[tokio::test]
    async fn empty_lookup_is_ok() {
        let source = EmptySource;
        let result = source.lookup("user@example.com").await;
        assert!(matches!(result, Ok(entries) if entries.is_empty()));
    }
}
