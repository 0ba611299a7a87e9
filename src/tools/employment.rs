use super::{CountryYearArgs, Sources, Tool, ToolOutput, country_year_schema, decode_args};
use crate::api::{IndicatorQuery, WorldBankClient};
use crate::error::ToolError;
use crate::mcp::protocol::ToolDescriptor;
use crate::validate;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Fetched in this order; the first failure ends the call.
pub const SECTOR_INDICATORS: [&str; 4] = [
    "SL.EMP.TOTL.SP.ZS", // employment-to-population ratio
    "SL.AGR.EMPL.ZS",    // agriculture
    "SL.IND.EMPL.ZS",    // industry
    "SL.SRV.EMPL.ZS",    // services
];
const USER_AGENT: &str = "mcp-worldbank-employment/1.0";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorRecords {
    pub agriculture: Value,
    pub industry: Value,
    pub services: Value,
}

/// Raw World Bank records, one per indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmploymentResult {
    #[serde(rename = "employment-to-population-ratio")]
    pub employment_to_population_ratio: Value,
    pub employment: SectorRecords,
}

/// Employment-to-population ratio and sector shares, fail-fast.
pub async fn get_employment(
    world_bank: &WorldBankClient,
    args: &CountryYearArgs,
) -> Result<EmploymentResult, ToolError> {
    let (country, year) = validate::country_year(&args.country, args.year)?;

    let country = &country;
    let fetch = move |indicator: &'static str| {
        async move {
            let query = IndicatorQuery {
                country,
                indicator,
                year,
                label: "employment",
            };
            world_bank.first_record(&query, USER_AGENT).await.map(|r| r.raw)
        }
    };

    let ratio = fetch(SECTOR_INDICATORS[0]).await?;
    let agriculture = fetch(SECTOR_INDICATORS[1]).await?;
    let industry = fetch(SECTOR_INDICATORS[2]).await?;
    let services = fetch(SECTOR_INDICATORS[3]).await?;

    Ok(EmploymentResult {
        employment_to_population_ratio: ratio,
        employment: SectorRecords {
            agriculture,
            industry,
            services,
        },
    })
}

pub struct EmploymentTool {
    sources: Arc<Sources>,
}

impl EmploymentTool {
    pub fn new(sources: Arc<Sources>) -> Self {
        Self { sources }
    }
}

#[async_trait::async_trait]
impl Tool for EmploymentTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_employment".to_string(),
            description: "Fetch the employment-to-population ratio and employment share by major \
                          sector (agriculture, industry, services; % of total employment) from the \
                          World Bank for a given country and year. Returns the raw indicator records; \
                          stops at the first indicator without data."
                .to_string(),
            input_schema: country_year_schema(),
        }
    }

    async fn call(&self, arguments: Value) -> ToolOutput {
        let result = match decode_args::<CountryYearArgs>(arguments) {
            Ok(args) => get_employment(&self.sources.world_bank, &args).await,
            Err(e) => Err(e),
        };
        ToolOutput::from_result(result)
    }
}
