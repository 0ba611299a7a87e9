//! Tools exposed to the agent, plus the immutable registry the host adapter serves.

pub mod employment;
pub mod extended;
pub mod gdp;
pub mod inflation;
pub mod snapshot;

pub use employment::EmploymentTool;
pub use extended::ExtendedEmploymentTool;
pub use gdp::GdpTool;
pub use inflation::InflationTool;
pub use snapshot::SnapshotTool;

use crate::api::{self, WorldBankClient};
use crate::config::Config;
use crate::error::ToolError;
use crate::fred::FredClient;
use crate::mcp::protocol::ToolDescriptor;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Result of a tool call as handed to the host: a JSON payload and whether it is an ErrorResult.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub value: Value,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn from_result<T: Serialize>(result: Result<T, ToolError>) -> Self {
        match result {
            Ok(payload) => match serde_json::to_value(payload) {
                Ok(value) => Self { value, is_error: false },
                Err(e) => Self {
                    value: serde_json::json!({ "error": format!("failed to encode result: {e}") }),
                    is_error: true,
                },
            },
            Err(err) => Self::from_error(&err),
        }
    }

    pub fn from_error(err: &ToolError) -> Self {
        Self {
            value: err.to_value(),
            is_error: err.is_error(),
        }
    }
}

#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn descriptor(&self) -> ToolDescriptor;

    /// Run the tool. Never fails: every outcome is a structured payload.
    async fn call(&self, arguments: Value) -> ToolOutput;
}

/// Upstream clients shared by every tool.
#[derive(Debug, Clone)]
pub struct Sources {
    pub world_bank: WorldBankClient,
    pub fred: FredClient,
}

impl Sources {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = api::http_client(config.timeout())?;
        let fred = FredClient::new(http.clone(), config.fred_url.clone(), config.fred_api_key.clone());
        if !fred.has_api_key() {
            log::warn!("no FRED API key configured; get_us_inflation will report an error");
        }
        Ok(Self {
            world_bank: WorldBankClient::new(http, config.world_bank_url.clone()),
            fred,
        })
    }
}

/// Ordered, immutable set of tools, built once at startup.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    /// Every statistics tool, wired to `sources`.
    pub fn with_sources(sources: Arc<Sources>) -> Self {
        Self::new(vec![
            Arc::new(GdpTool::new(sources.clone())),
            Arc::new(EmploymentTool::new(sources.clone())),
            Arc::new(ExtendedEmploymentTool::new(sources.clone())),
            Arc::new(SnapshotTool::new(sources.clone())),
            Arc::new(InflationTool::new(sources)),
        ])
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_sources(Arc::new(Sources::from_config(config)?)))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.descriptor().name == name)
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Arguments shared by the World Bank tools.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryYearArgs {
    pub country: String,
    #[serde(deserialize_with = "crate::models::de_i64_from_string_or_number")]
    pub year: i64,
}

/// Decode tool arguments; a shape mismatch is a validation failure, not a fault.
pub fn decode_args<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    // Hosts send `null` or omit arguments entirely for zero-argument calls.
    let arguments = if arguments.is_null() {
        Value::Object(Default::default())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::validation(format!("invalid arguments: {e}")))
}

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_integer(description: &str) -> Value {
    serde_json::json!({
        "type": "integer",
        "description": description
    })
}

/// `{country, year}` schema used by the World Bank tools.
pub(crate) fn country_year_schema() -> Value {
    json_schema_object(
        serde_json::json!({
            "country": json_schema_string("ISO 2- or 3-letter country code (e.g., 'US', 'USA', 'KR', 'KOR')."),
            "year": json_schema_integer("Four-digit year between 1960 and 2100.")
        }),
        vec!["country", "year"],
    )
}
