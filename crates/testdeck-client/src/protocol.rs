//! Wire DTOs of the test execution service
//!
//! Response shapes that only exist on the wire live here; everything the
//! rest of the application reasons about lives in `testdeck_core`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use testdeck_core::CatalogNode;

/// Body of `POST /runs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub class_names: Vec<String>,
}

/// Reply to `POST /runs`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    #[serde(default)]
    pub execution_id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl RunResponse {
    pub fn accepted(execution_id: impl Into<String>) -> Self {
        Self {
            execution_id: Some(execution_id.into()),
            status: "RUNNING".to_string(),
            message: Some("Test execution started".to_string()),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            execution_id: None,
            status: "FAILED".to_string(),
            message: Some(message.into()),
        }
    }

    /// The execution id when the service accepted the run.
    ///
    /// A run is accepted when the status is RUNNING or COMPLETED and an id
    /// was returned.
    pub fn accepted_id(&self) -> Option<&str> {
        let accepted = matches!(self.status.as_str(), "RUNNING" | "COMPLETED");
        match self.execution_id.as_deref() {
            Some(id) if accepted && !id.is_empty() => Some(id),
            _ => None,
        }
    }

    /// Human readable reason for a rejected run
    pub fn rejection_message(&self) -> String {
        match self.message.as_deref() {
            Some(msg) if !msg.is_empty() => format!("Test execution failed: {msg}"),
            _ => format!("Test execution failed (status {})", self.status),
        }
    }
}

/// The catalog tree is served as a single root node; some deployments send
/// a bare list of top-level packages instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CatalogTree {
    Root(CatalogNode),
    Forest(Vec<CatalogNode>),
}

impl CatalogTree {
    pub fn into_nodes(self) -> Vec<CatalogNode> {
        match self {
            CatalogTree::Root(root) => vec![root],
            CatalogTree::Forest(nodes) => nodes,
        }
    }
}

/// Reply to `POST /catalog/refresh`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tree: Option<CatalogTree>,
}

impl RefreshResponse {
    pub fn success() -> Self {
        Self {
            status: "SUCCESS".to_string(),
            message: Some("Test catalog refreshed".to_string()),
            tree: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("SUCCESS")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MethodCodeResponse {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServerTimeResponse {
    pub today: NaiveDate,
}

/// Error body returned alongside non-success HTTP statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Best-effort message for a non-success response body.
pub(crate) fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = parsed.message.or(parsed.error).filter(|m| !m.is_empty()) {
            return msg;
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 200 {
        return trimmed.to_string();
    }
    reason.unwrap_or("request failed").to_string()
}
