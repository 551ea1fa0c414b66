//! `VirusTotal` URL submission.

use super::common::{ensure_supported, post_json, request_failed, require_key};
use crate::transport::{HttpRequest, HttpTransport};
use async_trait::async_trait;
use lookout_analyzer::{ScanError, Scanner};
use lookout_core::{ApiKeys, IndicatorType};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

const NAME: &str = "VirusTotal";
const ENDPOINT: &str = "https://www.virustotal.com";
const SUPPORTED: &[IndicatorType] = &[IndicatorType::Url];

/// Submits a URL to `VirusTotal` and returns its detection page.
pub struct VirusTotalScanner {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
}

impl VirusTotalScanner {
    /// Create a scanner that submits through `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            api_url: format!("{ENDPOINT}/api/v3/urls"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmissionResponse {
    data: AnalysisRef,
}

#[derive(Debug, Deserialize)]
struct AnalysisRef {
    id: String,
}

/// Analysis ids look like `u-<sha256 of url>-<timestamp>`.
fn url_id(analysis_id: &str) -> Option<&str> {
    let rest = analysis_id.strip_prefix("u-")?;
    let (sha256, _timestamp) = rest.split_once('-')?;
    (sha256.len() == 64 && sha256.bytes().all(|b| b.is_ascii_hexdigit())).then_some(sha256)
}

#[async_trait]
impl Scanner for VirusTotalScanner {
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
        let request = HttpRequest::form(self.api_url.as_str(), &[("url", query)])
            .header("x-apikey", key)
            .header("accept", "application/json");

        let response: SubmissionResponse = post_json(self.transport.as_ref(), NAME, request).await?;
        let id = url_id(&response.data.id).ok_or_else(|| {
            request_failed(NAME, format!("unexpected analysis id '{}'", response.data.id))
        })?;
        let report = format!("{ENDPOINT}/gui/url/{id}/detection");

        info!(scanner = NAME, report = %report, "scan submitted");
        Ok(report)
    }
}
