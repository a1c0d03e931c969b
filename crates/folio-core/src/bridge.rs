//! Seam for the external text-generation backend.
//!
//! The engine only sees this trait; the live reqwest-backed implementation
//! lives in `folio-bridge`, and tests plug in counting or failing mocks.

use thiserror::Error;

/// Failure taxonomy for a bridge call. All variants are recovered locally by
/// the engine (degrade to fallback text); none reach the end user verbatim.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// No credential configured; the caller must not attempt network I/O.
    #[error("bridge is not configured")]
    Unavailable,
    /// Connection, DNS, or timeout failure from the transport.
    #[error("transport error: {0}")]
    Transport(String),
    /// Backend answered with a non-success HTTP status.
    #[error("backend returned status {0}")]
    Status(u16),
    /// Response arrived but did not contain usable text.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

/// External responder: given raw user text, produce generated text. One
/// request per call, bounded by the transport's deadline, no retry.
#[async_trait::async_trait]
pub trait GenerativeBridge: Send + Sync {
    /// Short identifier for logs and the status endpoint.
    fn name(&self) -> &str;

    /// Generates a reply for `input`. An `Err` fails the whole turn; the
    /// engine substitutes fallback text.
    async fn generate(&self, input: &str) -> Result<String, BridgeError>;
}
