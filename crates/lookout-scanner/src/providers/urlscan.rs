//! urlscan.io scan submission.

use super::common::{ensure_supported, post_json, request_failed, require_key};
use crate::transport::{HttpRequest, HttpTransport};
use async_trait::async_trait;
use lookout_analyzer::{ScanError, Scanner};
use lookout_core::{ApiKeys, IndicatorType};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

const NAME: &str = "urlscan.io";
const ENDPOINT: &str = "https://urlscan.io";
const SUPPORTED: &[IndicatorType] = &[IndicatorType::Ip, IndicatorType::Domain, IndicatorType::Url];

/// Submits a public scan to urlscan.io and returns the result page.
pub struct UrlscanScanner {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
}

impl UrlscanScanner {
    /// Create a scanner that submits through `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            api_url: format!("{ENDPOINT}/api/v1/scan/"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmissionResponse {
    uuid: Option<String>,
    result: Option<String>,
}

impl SubmissionResponse {
    fn report_url(self) -> Option<String> {
        self.result
            .or_else(|| self.uuid.map(|uuid| format!("{ENDPOINT}/result/{uuid}/")))
    }
}

#[async_trait]
impl Scanner for UrlscanScanner {
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
        let request = HttpRequest::json(
            self.api_url.as_str(),
            serde_json::json!({ "url": query, "visibility": "public" }),
        )
        .header("API-Key", key);

        let response: SubmissionResponse = post_json(self.transport.as_ref(), NAME, request).await?;
        let report = response
            .report_url()
            .ok_or_else(|| request_failed(NAME, "response has neither result nor uuid"))?;

        info!(scanner = NAME, report = %report, "scan submitted");
        Ok(report)
    }
}
