//! econ_mcp
//!
//! Macroeconomic statistics (GDP, employment, inflation) as tools for AI agents,
//! fetched live from the World Bank Indicators API and FRED. Pairs with the
//! `econ-mcp` binary, which serves the tools over MCP (JSON-RPC on stdio).
//!
//! ### Tools
//! - `get_gdp`: GDP (current US$) for a country and year
//! - `get_employment`: employment ratio and sector shares, fail-fast
//! - `get_employment_extended`: fourteen labor-market indicators, best-effort
//! - `get_economic_snapshot`: GDP and employment side by side
//! - `get_us_inflation`: US CPI inflation for a year, or the latest one
//!
//! Every tool returns a structured JSON value: the result itself, an
//! `{"error": ...}` object, or a `{"message": ...}` object when no data exists.
//!
//! ### Example
//! ```no_run
//! use econ_mcp::{Config, ToolRegistry};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let registry = ToolRegistry::from_config(&Config::default())?;
//! let gdp = registry.get("get_gdp").expect("registered");
//! let out = gdp.call(serde_json::json!({"country": "DEU", "year": 2020})).await;
//! println!("{}", out.value);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod fred;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod validate;

pub use api::WorldBankClient;
pub use config::Config;
pub use error::ToolError;
pub use fred::FredClient;
pub use mcp::McpServer;
pub use tools::{Tool, ToolOutput, ToolRegistry};
