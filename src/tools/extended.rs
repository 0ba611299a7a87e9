//! Labor-market overview built from fourteen World Bank indicators.
//!
//! Unlike `get_employment`, this tool is best-effort: all fetches run concurrently,
//! every one is awaited, and an indicator that fails is reported as `null` with its
//! error object in `raw` instead of failing the call.

use super::gdp::WORLD_BANK_SOURCE;
use super::{CountryYearArgs, Sources, Tool, ToolOutput, country_year_schema, decode_args};
use crate::api::{IndicatorQuery, Record, WorldBankClient};
use crate::error::ToolError;
use crate::mcp::protocol::ToolDescriptor;
use crate::validate;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

const USER_AGENT: &str = "mcp-worldbank-employment-extended/1.0";

/// Where an indicator's value lands in [`ExtendedEmploymentResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    EmploymentToPopulation,
    Agriculture,
    Industry,
    Services,
    UnemploymentTotal,
    UnemploymentYouth,
    Participation,
    ParticipationFemale,
    ParticipationMale,
    LaborForceTotal,
    Vulnerable,
    SelfEmployed,
    WageAndSalaried,
    ContributingFamily,
}

#[derive(Debug, Clone, Copy)]
pub struct ExtendedIndicator {
    pub code: &'static str,
    pub slot: Slot,
    /// Used in "no value" messages.
    pub label: &'static str,
}

pub static EXTENDED_INDICATORS: [ExtendedIndicator; 14] = [
    ExtendedIndicator { code: "SL.EMP.TOTL.SP.ZS", slot: Slot::EmploymentToPopulation, label: "employment-to-population ratio" },
    ExtendedIndicator { code: "SL.AGR.EMPL.ZS", slot: Slot::Agriculture, label: "agricultural employment" },
    ExtendedIndicator { code: "SL.IND.EMPL.ZS", slot: Slot::Industry, label: "industrial employment" },
    ExtendedIndicator { code: "SL.SRV.EMPL.ZS", slot: Slot::Services, label: "services employment" },
    ExtendedIndicator { code: "SL.UEM.TOTL.ZS", slot: Slot::UnemploymentTotal, label: "unemployment" },
    ExtendedIndicator { code: "SL.UEM.1524.ZS", slot: Slot::UnemploymentYouth, label: "youth unemployment" },
    ExtendedIndicator { code: "SL.TLF.CACT.ZS", slot: Slot::Participation, label: "labor force participation" },
    ExtendedIndicator { code: "SL.TLF.CACT.FE.ZS", slot: Slot::ParticipationFemale, label: "female labor force participation" },
    ExtendedIndicator { code: "SL.TLF.CACT.MA.ZS", slot: Slot::ParticipationMale, label: "male labor force participation" },
    ExtendedIndicator { code: "SL.TLF.TOTL.IN", slot: Slot::LaborForceTotal, label: "labor force" },
    ExtendedIndicator { code: "SL.EMP.VULN.ZS", slot: Slot::Vulnerable, label: "vulnerable employment" },
    ExtendedIndicator { code: "SL.EMP.SELF.ZS", slot: Slot::SelfEmployed, label: "self-employment" },
    ExtendedIndicator { code: "SL.EMP.WORK.ZS", slot: Slot::WageAndSalaried, label: "wage and salaried employment" },
    ExtendedIndicator { code: "SL.FAM.WORK.ZS", slot: Slot::ContributingFamily, label: "contributing family workers" },
];

/// % of total employment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectorShares {
    pub agriculture: Option<f64>,
    pub industry: Option<f64>,
    pub services: Option<f64>,
}

/// % of the labor force (`youth` is ages 15-24).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Unemployment {
    pub total: Option<f64>,
    pub youth: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LaborForce {
    /// % of population ages 15+.
    pub participation_rate: Option<f64>,
    pub participation_rate_female: Option<f64>,
    pub participation_rate_male: Option<f64>,
    /// Headcount.
    pub total: Option<f64>,
}

/// % of total employment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusInEmployment {
    pub vulnerable: Option<f64>,
    pub self_employed: Option<f64>,
    pub wage_and_salaried: Option<f64>,
    pub contributing_family: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedEmploymentResult {
    pub country: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
    pub year: i32,
    pub employment_to_population_ratio: Option<f64>,
    pub employment_percent: SectorShares,
    pub unemployment_percent: Unemployment,
    pub labor_force: LaborForce,
    pub status_in_employment_percent: StatusInEmployment,
    pub source: &'static str,
    /// One entry per indicator in declared order: the upstream record, or the failure object.
    pub raw: Vec<Value>,
}

impl ExtendedEmploymentResult {
    fn slot_mut(&mut self, slot: Slot) -> &mut Option<f64> {
        match slot {
            Slot::EmploymentToPopulation => &mut self.employment_to_population_ratio,
            Slot::Agriculture => &mut self.employment_percent.agriculture,
            Slot::Industry => &mut self.employment_percent.industry,
            Slot::Services => &mut self.employment_percent.services,
            Slot::UnemploymentTotal => &mut self.unemployment_percent.total,
            Slot::UnemploymentYouth => &mut self.unemployment_percent.youth,
            Slot::Participation => &mut self.labor_force.participation_rate,
            Slot::ParticipationFemale => &mut self.labor_force.participation_rate_female,
            Slot::ParticipationMale => &mut self.labor_force.participation_rate_male,
            Slot::LaborForceTotal => &mut self.labor_force.total,
            Slot::Vulnerable => &mut self.status_in_employment_percent.vulnerable,
            Slot::SelfEmployed => &mut self.status_in_employment_percent.self_employed,
            Slot::WageAndSalaried => &mut self.status_in_employment_percent.wage_and_salaried,
            Slot::ContributingFamily => &mut self.status_in_employment_percent.contributing_family,
        }
    }

    /// Number of indicators that produced a value.
    pub fn reported(&self) -> usize {
        self.raw.iter().filter(|r| !is_failure(r)).count()
    }
}

/// True for the failure objects placed in `raw`.
pub fn is_failure(raw: &Value) -> bool {
    raw.get("error").is_some() || raw.get("message").is_some()
}

fn failure_entry(code: &str, err: &ToolError) -> Value {
    let mut value = err.to_value();
    if let Value::Object(map) = &mut value {
        map.insert("indicator".to_string(), Value::String(code.to_string()));
    }
    value
}

/// Fetch all indicators concurrently and map them onto their semantic keys.
///
/// Only argument validation can fail the call.
pub async fn get_employment_extended(
    world_bank: &WorldBankClient,
    args: &CountryYearArgs,
) -> Result<ExtendedEmploymentResult, ToolError> {
    let (country, year) = validate::country_year(&args.country, args.year)?;
    let country = &country;

    let mut pending: FuturesUnordered<_> = EXTENDED_INDICATORS
        .iter()
        .enumerate()
        .map(move |(idx, ind)| async move {
            let query = IndicatorQuery {
                country,
                indicator: ind.code,
                year,
                label: ind.label,
            };
            (idx, world_bank.first_record(&query, USER_AGENT).await)
        })
        .collect();

    // Indexed by position in EXTENDED_INDICATORS; every future is awaited, so no slot stays empty.
    let mut outcomes: Vec<Option<Result<Record, ToolError>>> = EXTENDED_INDICATORS.iter().map(|_| None).collect();
    while let Some((idx, outcome)) = pending.next().await {
        outcomes[idx] = Some(outcome);
    }

    let mut result = ExtendedEmploymentResult {
        country: country.upper().to_string(),
        country_code: country.upper().to_string(),
        year,
        employment_to_population_ratio: None,
        employment_percent: SectorShares::default(),
        unemployment_percent: Unemployment::default(),
        labor_force: LaborForce::default(),
        status_in_employment_percent: StatusInEmployment::default(),
        source: WORLD_BANK_SOURCE,
        raw: Vec::with_capacity(EXTENDED_INDICATORS.len()),
    };
    let mut country_name: Option<String> = None;

    for (ind, outcome) in EXTENDED_INDICATORS.iter().zip(outcomes.into_iter().flatten()) {
        match outcome {
            Ok(record) => {
                if country_name.is_none() {
                    country_name = record.entry.country_name().map(str::to_string);
                }
                *result.slot_mut(ind.slot) = Some(record.value);
                result.raw.push(record.raw);
            }
            Err(err) => {
                log::debug!("{} unavailable for {} {}: {}", ind.code, country.upper(), year, err);
                result.raw.push(failure_entry(ind.code, &err));
            }
        }
    }
    if let Some(name) = country_name {
        result.country = name;
    }

    log::info!(
        "employment_extended {} {}: {}/{} indicators reported",
        country.upper(),
        year,
        result.reported(),
        EXTENDED_INDICATORS.len()
    );
    Ok(result)
}

pub struct ExtendedEmploymentTool {
    sources: Arc<Sources>,
}

impl ExtendedEmploymentTool {
    pub fn new(sources: Arc<Sources>) -> Self {
        Self { sources }
    }
}

#[async_trait::async_trait]
impl Tool for ExtendedEmploymentTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: "get_employment_extended".to_string(),
            description: "Labor-market overview for a country and year from fourteen World Bank \
                          indicators: employment-to-population ratio, sector shares, unemployment \
                          (total, youth), labor force participation (total, female, male), labor \
                          force size and status in employment. Indicators without data are null; \
                          `raw` lists every underlying record or its error."
                .to_string(),
            input_schema: country_year_schema(),
        }
    }

    async fn call(&self, arguments: Value) -> ToolOutput {
        let result = match decode_args::<CountryYearArgs>(arguments) {
            Ok(args) => get_employment_extended(&self.sources.world_bank, &args).await,
            Err(e) => Err(e),
        };
        ToolOutput::from_result(result)
    }
}
