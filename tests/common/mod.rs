#![allow(dead_code)]

use econ_mcp::api::{self, WorldBankClient};
use econ_mcp::fred::FredClient;
use econ_mcp::tools::CountryYearArgs;
use serde_json::{Value, json};
use std::time::Duration;

pub const FRED_PATH: &str = "/fred/series/observations";
pub const FRED_KEY: &str = "test-key";

pub fn world_bank(base: &str) -> WorldBankClient {
    WorldBankClient::new(api::http_client(Duration::from_secs(5)).unwrap(), base)
}

pub fn fred(base: &str, key: Option<&str>) -> FredClient {
    FredClient::new(
        api::http_client(Duration::from_secs(5)).unwrap(),
        format!("{base}{FRED_PATH}"),
        key.map(str::to_string),
    )
}

pub fn args(country: &str, year: i64) -> CountryYearArgs {
    CountryYearArgs {
        country: country.into(),
        year,
    }
}

/// Path of a World Bank lookup, as matched by wiremock.
pub fn wb_path(country: &str, indicator: &str) -> String {
    format!("/country/{country}/indicator/{indicator}")
}

/// `[meta, [record]]` as the World Bank returns it.
pub fn wb_body(indicator: &str, indicator_name: &str, year: i32, value: Value) -> Value {
    json!([
        {"page": 1, "pages": 1, "per_page": 50, "total": 1, "sourceid": "2", "lastupdated": "2024-06-28"},
        [
            {
                "indicator": {"id": indicator, "value": indicator_name},
                "country": {"id": "US", "value": "United States"},
                "countryiso3code": "USA",
                "date": year.to_string(),
                "value": value,
                "unit": "",
                "obs_status": "",
                "decimal": 1
            }
        ]
    ])
}

pub fn wb_empty() -> Value {
    json!([{"page": 0, "pages": 0, "per_page": 50, "total": 0}, []])
}

pub fn fred_body(observations: Value) -> Value {
    json!({
        "realtime_start": "2024-01-01",
        "realtime_end": "2024-01-01",
        "units": "lin",
        "count": observations.as_array().map(|a| a.len()).unwrap_or(0),
        "observations": observations
    })
}
