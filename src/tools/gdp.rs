use super::{CountryYearArgs, Sources, Tool, ToolOutput, country_year_schema, decode_args};
use crate::api::{IndicatorQuery, WorldBankClient};
use crate::error::ToolError;
use crate::mcp::protocol::ToolDescriptor;
use crate::validate;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const GDP_INDICATOR: &str = "NY.GDP.MKTP.CD";
const USER_AGENT: &str = "mcp-worldbank-gdp/1.0";
pub(crate) const WORLD_BANK_SOURCE: &str = "World Bank Open Data";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GdpResult {
    pub country: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
    pub year: i32,
    pub indicator: String,
    #[serde(rename = "indicatorName")]
    pub indicator_name: String,
    #[serde(rename = "valueUSD")]
    pub value_usd: f64,
    pub source: &'static str,
    pub api: String,
}

/// GDP (current US$) for one country and year.
pub async fn get_gdp(world_bank: &WorldBankClient, args: &CountryYearArgs) -> Result<GdpResult, ToolError> {
    let (country, year) = validate::country_year(&args.country, args.year)?;
    let query = IndicatorQuery {
        country: &country,
        indicator: GDP_INDICATOR,
        year,
        label: "GDP",
    };
    let record = world_bank.first_record(&query, USER_AGENT).await?;

    Ok(GdpResult {
        country: record.entry.country_name().unwrap_or(country.upper()).to_string(),
        country_code: country.upper().to_string(),
        year,
        indicator: record.entry.indicator_id().unwrap_or(GDP_INDICATOR).to_string(),
        indicator_name: record
            .entry
            .indicator_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("GDP (current US$) - {GDP_INDICATOR}")),
        value_usd: record.value,
        source: WORLD_BANK_SOURCE,
        api: record.api,
    })
}

pub struct GdpTool {
    sources: Arc<Sources>,
}

impl GdpTool {
    pub fn new(sources: Arc<Sources>) -> Self {
        Self { sources }
    }
}

#[async_trait::async_trait]
impl Tool for GdpTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_gdp".to_string(),
            description: "Return the World Bank GDP (current US$) for a given country and year. \
                          Returns country name/code, year, indicator metadata, the GDP value in USD \
                          and the source URL, or a message when no value is published."
                .to_string(),
            input_schema: country_year_schema(),
        }
    }

    async fn call(&self, arguments: Value) -> ToolOutput {
        let result = match decode_args::<CountryYearArgs>(arguments) {
            Ok(args) => get_gdp(&self.sources.world_bank, &args).await,
            Err(e) => Err(e),
        };
        ToolOutput::from_result(result)
    }
}
