//! Failure taxonomy shared by every tool.
//!
//! A tool never surfaces a fault to the host: each [`ToolError`] renders to a
//! structured JSON value through [`ToolError::to_value`]. `NoData` becomes a
//! `{"message": ...}` payload, everything else an `{"error": ...}` payload.

use crate::fred::FredRequest;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Where a failing request was sent, echoed back for diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiRef {
    /// Full World Bank URL.
    Url(String),
    /// FRED endpoint plus query parameters (API key redacted).
    Fred(FredRequest),
}

/// Query fields echoed in a "no data" message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryEcho {
    #[serde(rename = "countryCode")]
    pub country_code: String,
    pub year: i32,
    pub indicator: String,
}

#[derive(Debug, Error)]
pub enum ToolError {
    /// Malformed input, detected before any network call.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response from the upstream API.
    #[error("{service} request failed: HTTP {status}")]
    UpstreamStatus {
        service: &'static str,
        status: u16,
        api: ApiRef,
    },

    /// The request never produced a response (connect error, timeout, body read).
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
        api: ApiRef,
    },

    /// Well-formed response without a usable observation.
    #[error("{message}")]
    NoData {
        message: String,
        echo: Option<QueryEcho>,
        api: Option<ApiRef>,
    },

    /// A value was reported but is not a number.
    #[error("Unable to parse {what} '{raw}' from {service}.")]
    Parse {
        service: &'static str,
        what: &'static str,
        raw: String,
        api: Option<ApiRef>,
    },

    #[error("FRED_API_KEY environment variable is not set.")]
    MissingApiKey,
}

#[derive(Serialize)]
struct ErrorResult<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    api: Option<&'a ApiRef>,
}

#[derive(Serialize)]
struct MessageResult<'a> {
    message: &'a str,
    #[serde(flatten)]
    echo: Option<&'a QueryEcho>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api: Option<&'a ApiRef>,
}

impl ToolError {
    pub fn validation(message: impl Into<String>) -> Self {
        ToolError::Validation(message.into())
    }

    /// Anything other than "no data" counts as an error for the host.
    pub fn is_error(&self) -> bool {
        !matches!(self, ToolError::NoData { .. })
    }

    pub fn api(&self) -> Option<&ApiRef> {
        match self {
            ToolError::UpstreamStatus { api, .. } | ToolError::Transport { api, .. } => Some(api),
            ToolError::NoData { api, .. } | ToolError::Parse { api, .. } => api.as_ref(),
            ToolError::Validation(_) | ToolError::MissingApiKey => None,
        }
    }

    /// Render as the structured ErrorResult / MessageResult payload.
    pub fn to_value(&self) -> Value {
        let rendered = match self {
            ToolError::NoData { message, echo, api } => serde_json::to_value(MessageResult {
                message,
                echo: echo.as_ref(),
                api: api.as_ref(),
            }),
            other => serde_json::to_value(ErrorResult {
                error: other.to_string(),
                api: other.api(),
            }),
        };
        // Both payloads are plain structs of strings and numbers.
        rendered.unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }))
    }
}
