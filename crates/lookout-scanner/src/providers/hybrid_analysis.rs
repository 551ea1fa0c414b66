//! Hybrid Analysis quick-scan submission.

use super::common::{ensure_supported, post_json, require_key};
use crate::transport::{HttpRequest, HttpTransport};
use async_trait::async_trait;
use lookout_analyzer::{ScanError, Scanner};
use lookout_core::{ApiKeys, IndicatorType};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

const NAME: &str = "HybridAnalysis";
const ENDPOINT: &str = "https://www.hybrid-analysis.com";
const SUPPORTED: &[IndicatorType] = &[IndicatorType::Url];

/// The public API rejects other user agents.
const API_USER_AGENT: &str = "Falcon Sandbox";

/// Submits a URL to Hybrid Analysis quick scan and returns the sample page.
pub struct HybridAnalysisScanner {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
}

impl HybridAnalysisScanner {
    /// Create a scanner that submits through `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            api_url: format!("{ENDPOINT}/api/v2/quick-scan/url"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmissionResponse {
    sha256: String,
}

#[async_trait]
impl Scanner for HybridAnalysisScanner {
    fn name(&self) -> &str {
        NAME
    }

    fn endpoint(&self) -> &str {
        ENDPOINT
    }

    fn supported_types(&self) -> &[IndicatorType] {
        SUPPORTED
    }

    async fn scan(
        &self,
        ty: IndicatorType,
        query: &str,
        api_keys: &ApiKeys,
    ) -> Result<String, ScanError> {
        ensure_supported(NAME, SUPPORTED, ty)?;
        let key = require_key(NAME, api_keys)?;

        debug!(scanner = NAME, ty = %ty, "submitting scan");
        let request = HttpRequest::form(
            self.api_url.as_str(),
            &[("scan_type", "all"), ("url", query)],
        )
        .header("api-key", key)
        .header("user-agent", API_USER_AGENT)
        .header("accept", "application/json");

        let response: SubmissionResponse = post_json(self.transport.as_ref(), NAME, request).await?;
        let report = format!("{ENDPOINT}/sample/{}", response.sha256);

        info!(scanner = NAME, report = %report, "scan submitted");
        Ok(report)
    }
}
