use super::employment::get_employment;
use super::gdp::get_gdp;
use super::{CountryYearArgs, Sources, Tool, ToolOutput, country_year_schema, decode_args};
use crate::api::WorldBankClient;
use crate::error::ToolError;
use crate::mcp::protocol::ToolDescriptor;
use crate::validate;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// GDP and employment side by side. Each section is that tool's own outcome,
/// so a missing employment series does not hide the GDP figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotResult {
    #[serde(rename = "countryCode")]
    pub country_code: String,
    pub year: i32,
    pub gdp: Value,
    pub employment: Value,
}

pub async fn get_economic_snapshot(
    world_bank: &WorldBankClient,
    args: &CountryYearArgs,
) -> Result<SnapshotResult, ToolError> {
    let (country, year) = validate::country_year(&args.country, args.year)?;

    let (gdp, employment) = tokio::join!(get_gdp(world_bank, args), get_employment(world_bank, args));

    Ok(SnapshotResult {
        country_code: country.upper().to_string(),
        year,
        gdp: ToolOutput::from_result(gdp).value,
        employment: ToolOutput::from_result(employment).value,
    })
}

pub struct SnapshotTool {
    sources: Arc<Sources>,
}

impl SnapshotTool {
    pub fn new(sources: Arc<Sources>) -> Self {
        Self { sources }
    }
}

#[async_trait::async_trait]
impl Tool for SnapshotTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_economic_snapshot".to_string(),
            description: "GDP (current US$) and employment by sector for a country and year in one \
                          call. The `gdp` and `employment` sections each hold their own result or \
                          error/message."
                .to_string(),
            input_schema: country_year_schema(),
        }
    }

    async fn call(&self, arguments: Value) -> ToolOutput {
        let result = match decode_args::<CountryYearArgs>(arguments) {
            Ok(args) => get_economic_snapshot(&self.sources.world_bank, &args).await,
            Err(e) => Err(e),
        };
        ToolOutput::from_result(result)
    }
}
