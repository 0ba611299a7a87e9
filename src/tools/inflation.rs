use super::{Sources, Tool, ToolOutput, decode_args, json_schema_integer, json_schema_object};
use crate::error::{ApiRef, ToolError};
use crate::fred::{FredClient, FredRequest};
use crate::mcp::protocol::ToolDescriptor;
use crate::models::{Observation, parse_decimal};
use crate::validate;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const SERIES_ID: &str = "FPCPITOTLZGUSA";
const TITLE: &str = "Inflation, consumer prices for the United States";
const UNITS: &str = "Percent (annual % change)";
const SOURCE: &str = "St. Louis Fed (FRED)";
const USER_AGENT: &str = "mcp-fred-us-inflation/1.0";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InflationArgs {
    #[serde(default, deserialize_with = "crate::models::de_opt_i64_from_string_or_number")]
    pub year: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InflationResult {
    #[serde(rename = "seriesId")]
    pub series_id: &'static str,
    pub title: &'static str,
    pub units: &'static str,
    pub date: String,
    pub year: i32,
    pub value: f64,
    pub source: &'static str,
    pub api: FredRequest,
}

fn no_data(message: String) -> ToolError {
    ToolError::NoData {
        message,
        echo: None,
        api: None,
    }
}

/// Pick the observation to report.
///
/// With a year: the first observation (ascending) whose date contains it.
/// Without: the most recent observation that carries a value.
pub fn select_observation(observations: &[Observation], year: Option<i32>) -> Result<&Observation, ToolError> {
    if observations.is_empty() {
        return Err(no_data(match year {
            Some(y) => format!("No observations found for year {y}."),
            None => "No observations available.".to_string(),
        }));
    }

    match year {
        Some(y) => {
            let needle = y.to_string();
            let selected = observations
                .iter()
                .find(|o| o.date.contains(&needle))
                .ok_or_else(|| no_data(format!("No observation found for year {y}.")))?;
            if !selected.has_value() {
                return Err(no_data(format!("No value reported for {y}.")));
            }
            Ok(selected)
        }
        None => observations
            .iter()
            .rev()
            .find(|o| o.has_value())
            .ok_or_else(|| no_data("No non-empty latest observation found.".to_string())),
    }
}

/// Year of a FRED date: `YYYY-MM-DD`, else its leading four digits.
pub fn observation_year(date: &str) -> Option<i32> {
    let date = date.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.year())
        .ok()
        .or_else(|| date.get(..4).and_then(|y| y.parse().ok()))
}

/// US CPI inflation for `year`, or the latest reported year.
pub async fn get_us_inflation(fred: &FredClient, args: &InflationArgs) -> Result<InflationResult, ToolError> {
    let year = validate::optional_year(args.year)?;
    let (observations, request) = fred.observations(SERIES_ID, year, USER_AGENT).await?;
    let selected = select_observation(&observations, year)?;

    let parse_error = |what: &'static str, raw: &str| ToolError::Parse {
        service: "FRED",
        what,
        raw: raw.to_string(),
        api: Some(ApiRef::Fred(request.clone())),
    };

    let value = parse_decimal(&selected.value).ok_or_else(|| parse_error("value", &selected.value))?;
    let observed_year = observation_year(&selected.date).ok_or_else(|| parse_error("date", &selected.date))?;

    Ok(InflationResult {
        series_id: SERIES_ID,
        title: TITLE,
        units: UNITS,
        date: selected.date.clone(),
        year: observed_year,
        value,
        source: SOURCE,
        api: request,
    })
}

pub struct InflationTool {
    sources: Arc<Sources>,
}

impl InflationTool {
    pub fn new(sources: Arc<Sources>) -> Self {
        Self { sources }
    }
}

#[async_trait::async_trait]
impl Tool for InflationTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_us_inflation".to_string(),
            description: "Return the FRED series 'Inflation, consumer prices for the United States' \
                          (FPCPITOTLZGUSA) for a given year, or the latest available observation if \
                          year is omitted."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "year": json_schema_integer("Four-digit year (e.g., 2021). Omit for the latest observation.")
                }),
                vec![],
            ),
        }
    }

    async fn call(&self, arguments: Value) -> ToolOutput {
        let result = match decode_args::<InflationArgs>(arguments) {
            Ok(args) => get_us_inflation(&self.sources.fred, &args).await,
            Err(e) => Err(e),
        };
        ToolOutput::from_result(result)
    }
}
