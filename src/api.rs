/// Asynchronous client for the **World Bank Indicators API (v2)**.
///
/// Only the `country/{code}/indicator/{code}` endpoint is used, always for a single
/// year (`date={year}:{year}`). The first record of the response is the observation.
///
/// ### Notes
/// - The response is `[meta, [records...]]` on success, but the API also answers with
///   `[{"message": ...}]` for unknown codes. Anything not shaped like the former is
///   treated as "no record", never as a fault.
/// - `value` may be a number, a numeric string, or null.
/// - No retries: a single failed attempt is surfaced as-is.
///
/// Typical usage:
/// ```no_run
/// # async fn demo() -> anyhow::Result<()> {
/// use econ_mcp::api::{http_client, IndicatorQuery, WorldBankClient};
/// use std::time::Duration;
///
/// let client = WorldBankClient::new(http_client(Duration::from_secs(20))?, "https://api.worldbank.org/v2");
/// let country = econ_mcp::validate::country("DEU")?;
/// let query = IndicatorQuery { country: &country, indicator: "NY.GDP.MKTP.CD", year: 2020, label: "GDP" };
/// let record = client.first_record(&query, "econ-mcp-gdp/1.0").await?;
/// println!("{}", record.value);
/// # Ok(())
/// # }
/// ```
use crate::error::{ApiRef, QueryEcho, ToolError};
use crate::models::{self, Entry, ValueField};
use crate::validate::CountryCode;
use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::USER_AGENT;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.worldbank.org/v2";
const SERVICE: &str = "World Bank";

/// Build the shared HTTP client. One instance is pooled across all tools.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout) // total request timeout
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(5))
        .user_agent(concat!("econ-mcp/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("build http client")
}

// Allow -, _, . unescaped in codes (common for indicator ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(part: &str) -> String {
    percent_encoding::utf8_percent_encode(part, SAFE).to_string()
}

/// One (country, indicator, year) lookup.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorQuery<'a> {
    pub country: &'a CountryCode,
    pub indicator: &'a str,
    pub year: i32,
    /// Human label used in "no value" messages, e.g. `"GDP"`.
    pub label: &'a str,
}

/// The first observation of a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Record as returned by the API, untouched.
    pub raw: Value,
    pub entry: Entry,
    pub value: f64,
    pub api: String,
}

#[derive(Debug, Clone)]
pub struct WorldBankClient {
    pub base_url: String,
    http: reqwest::Client,
}

impl WorldBankClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// URL for a single-year lookup. This exact string is echoed in every result.
    pub fn indicator_url(&self, country: &str, indicator: &str, year: i32) -> String {
        format!(
            "{}/country/{}/indicator/{}?date={year}:{year}&format=json",
            self.base_url,
            enc(country),
            enc(indicator),
        )
    }

    /// Fetch the first record for `query`; `agent` is sent as the `User-Agent`.
    pub async fn first_record(
        &self,
        query: &IndicatorQuery<'_>,
        agent: &str,
    ) -> std::result::Result<Record, ToolError> {
        let url = self.indicator_url(query.country.as_str(), query.indicator, query.year);
        log::debug!("GET {}", url);

        // The URL is already echoed in `api`.
        let transport = |source: reqwest::Error| ToolError::Transport {
            service: SERVICE,
            source: source.without_url(),
            api: ApiRef::Url(url.clone()),
        };

        let resp = self
            .http
            .get(&url)
            .header(USER_AGENT, agent)
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            log::warn!("{} answered HTTP {} for {}", SERVICE, status.as_u16(), url);
            return Err(ToolError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                api: ApiRef::Url(url),
            });
        }

        let bytes = resp.bytes().await.map_err(transport)?;
        // A body that is not JSON is as good as an empty one.
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        let no_data = || ToolError::NoData {
            message: format!(
                "No {} value found for {} in {}.",
                query.label,
                query.country.upper(),
                query.year
            ),
            echo: Some(QueryEcho {
                country_code: query.country.upper().to_string(),
                year: query.year,
                indicator: query.indicator.to_string(),
            }),
            api: Some(ApiRef::Url(url.clone())),
        };

        let Some(raw) = models::first_record(&body) else {
            return Err(no_data());
        };
        let Ok(entry) = serde_json::from_value::<Entry>(raw.clone()) else {
            return Err(no_data());
        };

        match entry.value_field() {
            ValueField::Number(value) => Ok(Record {
                raw: raw.clone(),
                entry,
                value,
                api: url,
            }),
            ValueField::Missing => Err(no_data()),
            ValueField::Unparseable(raw_value) => Err(ToolError::Parse {
                service: SERVICE,
                what: "value",
                raw: raw_value,
                api: Some(ApiRef::Url(url)),
            }),
        }
    }
}
