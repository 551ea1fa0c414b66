//! The scan capability: analyzers that perform an authenticated request.

use crate::error::ScanError;
use async_trait::async_trait;
use lookout_core::{ApiKeys, IndicatorType};

/// An analyzer that submits an indicator to a remote service and returns the
/// URL of the resulting report.
///
/// Implementations must be thread-safe (Send + Sync); the registry hands out
/// shared references to them from any task.
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Unique analyzer name. Must match the `[api_keys]` config key.
    fn name(&self) -> &str;

    /// Base URL of the service.
    fn endpoint(&self) -> &str;

    /// Indicator types this scanner accepts.
    fn supported_types(&self) -> &[IndicatorType];

    /// Submit `query` and return the report URL to open.
    ///
    /// # Errors
    /// - [`ScanError::ApiKeyMissing`] when `api_keys` has no key for this
    ///   scanner; no request is made in that case
    /// - [`ScanError::UnsupportedType`] when `ty` is not supported
    /// - [`ScanError::RequestFailed`] on transport errors, non-success status
    ///   codes or unparseable responses
    async fn scan(
        &self,
        ty: IndicatorType,
        query: &str,
        api_keys: &ApiKeys,
    ) -> Result<String, ScanError>;

    /// Whether `ty` is in [`Scanner::supported_types`].
    fn supports(&self, ty: IndicatorType) -> bool {
        self.supported_types().contains(&ty)
    }
}
