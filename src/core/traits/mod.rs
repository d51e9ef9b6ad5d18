use async_trait::async_trait;

use crate::core::error::ProviderError;
use crate::core::types::{AdapterContext, ProviderId, TranslationRequest};

/// One external translation service.
///
/// An adapter makes exactly one attempt per call and reports every expected failure
/// (missing credential, transport, status, malformed payload) as a `ProviderError`
/// value. The resolver treats any error as "no result" and moves to the next adapter.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Stable provider identifier for ordering, logging and result origin.
    fn id(&self) -> ProviderId;

    /// Attempts a translation and returns the provider's (trimmed) output text.
    async fn translate(
        &self,
        req: &TranslationRequest,
        ctx: &AdapterContext,
    ) -> Result<String, ProviderError>;
}
