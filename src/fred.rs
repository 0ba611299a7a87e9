//! Client for the FRED `series/observations` endpoint.

use crate::error::{ApiRef, ToolError};
use crate::models::{self, Observation};
use reqwest::header::USER_AGENT;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_OBSERVATIONS_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
const SERVICE: &str = "FRED";
const REDACTED: &str = "***";

/// Query parameters, serialized in the order FRED documents them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FredParams {
    pub series_id: String,
    pub api_key: String,
    pub file_type: String,
    pub sort_order: String,
    pub observation_start: String,
    pub observation_end: String,
}

impl FredParams {
    /// Ascending observations for `series_id`; one calendar year, or 1960..2100 when `year` is `None`.
    pub fn new(series_id: &str, api_key: &str, year: Option<i32>) -> Self {
        let (start, end) = match year {
            Some(y) => (format!("{y}-01-01"), format!("{y}-12-31")),
            None => ("1960-01-01".to_string(), "2100-12-31".to_string()),
        };
        Self {
            series_id: series_id.to_string(),
            api_key: api_key.to_string(),
            file_type: "json".to_string(),
            sort_order: "asc".to_string(),
            observation_start: start,
            observation_end: end,
        }
    }

    pub fn redacted(&self) -> Self {
        Self {
            api_key: REDACTED.to_string(),
            ..self.clone()
        }
    }
}

/// Request description echoed in results. Never carries the real key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FredRequest {
    pub endpoint: String,
    pub params: FredParams,
}

#[derive(Debug, Clone)]
pub struct FredClient {
    pub endpoint: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl FredClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            http,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch observations of `series_id` for the window implied by `year`.
    ///
    /// Returns the observations (possibly empty) together with the redacted request.
    pub async fn observations(
        &self,
        series_id: &str,
        year: Option<i32>,
        agent: &str,
    ) -> Result<(Vec<Observation>, FredRequest), ToolError> {
        let api_key = self.api_key.as_deref().ok_or(ToolError::MissingApiKey)?;
        let params = FredParams::new(series_id, api_key, year);
        let echo = FredRequest {
            endpoint: self.endpoint.clone(),
            params: params.redacted(),
        };
        log::debug!("GET {} series_id={} window={}..{}", self.endpoint, series_id, params.observation_start, params.observation_end);

        // reqwest includes the full URL (and so the key) in its messages.
        let transport = |source: reqwest::Error| ToolError::Transport {
            service: SERVICE,
            source: source.without_url(),
            api: ApiRef::Fred(echo.clone()),
        };

        let resp = self
            .http
            .get(&self.endpoint)
            .header(USER_AGENT, agent)
            .query(&params)
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            log::warn!("{} answered HTTP {} for series {}", SERVICE, status.as_u16(), series_id);
            return Err(ToolError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                api: ApiRef::Fred(echo),
            });
        }

        let bytes = resp.bytes().await.map_err(transport)?;
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Ok((models::observations(&body), echo))
    }
}
