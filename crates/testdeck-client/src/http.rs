//! reqwest-backed implementation of [`TestService`]

use std::time::Duration;

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use testdeck_core::prelude::*;
use testdeck_core::{CatalogNode, ClassDetail, DashboardData, ExecutionResults, ExecutionSummary};
use url::Url;

use crate::protocol::{
    error_message, CatalogTree, MethodCodeResponse, RefreshResponse, RunRequest, RunResponse,
    ServerTimeResponse,
};
use crate::service::TestService;

/// Characters escaped inside a single path segment (RFC 3986 unreserved are kept)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Default request timeout when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP+JSON client for the test execution service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpTestService {
    base_url: String,
    client: Client,
}

impl HttpTestService {
    /// Create a client for the service rooted at `base_url`
    /// (e.g. `http://localhost:8080/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid server URL '{base_url}': {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(Error::config(format!(
                "server URL '{base_url}' cannot be used as a base"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL with percent-encoded path segments.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut raw = self.base_url.clone();
        for segment in segments {
            raw.push('/');
            raw.extend(utf8_percent_encode(segment, PATH_SEGMENT));
        }
        Url::parse(&raw).map_err(|e| Error::invalid_request(format!("bad URL '{raw}': {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        decode_response(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: Option<&RunRequest>,
    ) -> Result<T> {
        debug!("POST {}", url);
        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(transport_error)?;
        decode_response(response).await
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_decode() {
        Error::decode(err.to_string())
    } else {
        Error::transport(err.to_string())
    }
}

async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body, status.canonical_reason());
        warn!("Test service returned {}: {}", status, message);
        return Err(Error::http(status.as_u16(), message));
    }

    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| Error::decode(e.to_string()))
}

impl TestService for HttpTestService {
    async fn catalog_tree(&self) -> Result<Vec<CatalogNode>> {
        let url = self.endpoint(&["catalog", "tree"])?;
        let tree: CatalogTree = self.get_json(url).await?;
        Ok(tree.into_nodes())
    }

    async fn class_detail(&self, class_name: &str) -> Result<ClassDetail> {
        if class_name.trim().is_empty() {
            return Err(Error::invalid_request("class name cannot be blank"));
        }
        let url = self.endpoint(&["catalog", "class", class_name])?;
        self.get_json(url).await
    }

    async fn method_code(&self, unique_id: &str) -> Result<String> {
        if unique_id.trim().is_empty() {
            return Err(Error::invalid_request("uniqueId cannot be blank"));
        }
        let mut url = self.endpoint(&["catalog", "method", "code"])?;
        url.query_pairs_mut().append_pair("uniqueId", unique_id);
        let response: MethodCodeResponse = self.get_json(url).await?;
        Ok(response.code)
    }

    async fn submit_run(&self, class_names: &[String]) -> Result<RunResponse> {
        let url = self.endpoint(&["runs"])?;
        let body = RunRequest {
            class_names: class_names.to_vec(),
        };
        info!("Submitting run for {} class(es)", body.class_names.len());
        self.post_json(url, Some(&body)).await
    }

    async fn executions(&self, limit: usize) -> Result<Vec<ExecutionSummary>> {
        let mut url = self.endpoint(&["runs"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        self.get_json(url).await
    }

    async fn execution_results(&self, execution_id: &str) -> Result<ExecutionResults> {
        let url = self.endpoint(&["runs", execution_id, "results"])?;
        self.get_json(url).await
    }

    async fn dashboard(&self) -> Result<DashboardData> {
        let url = self.endpoint(&["dashboard"])?;
        self.get_json(url).await
    }

    async fn refresh_catalog(&self) -> Result<RefreshResponse> {
        let url = self.endpoint(&["catalog", "refresh"])?;
        info!("Requesting catalog refresh");
        self.post_json(url, None).await
    }

    async fn server_today(&self) -> Result<NaiveDate> {
        let url = self.endpoint(&["server-time"])?;
        let response: ServerTimeResponse = self.get_json(url).await?;
        Ok(response.today)
    }
}
