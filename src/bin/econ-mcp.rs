use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use econ_mcp::McpServer;
use econ_mcp::config::{Config, Overrides};
use econ_mcp::tools::ToolRegistry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "econ-mcp",
    version,
    about = "Serve World Bank & FRED macroeconomic statistics as MCP tools"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// TOML config file (default: <config dir>/econ-mcp/config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log filter for stderr output (e.g. info, debug, econ_mcp=trace). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// FRED API key, required by get_us_inflation.
    #[arg(long, global = true, env = "FRED_API_KEY", hide_env_values = true)]
    fred_api_key: Option<String>,
    /// World Bank API root.
    #[arg(long, global = true, env = "ECON_MCP_WORLD_BANK_URL")]
    world_bank_url: Option<String>,
    /// FRED observations endpoint.
    #[arg(long, global = true, env = "ECON_MCP_FRED_URL")]
    fred_url: Option<String>,
    /// Per-request HTTP timeout in seconds (default 20).
    #[arg(long, global = true, env = "ECON_MCP_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the tools over stdio (default).
    Serve,
    /// Print the tool descriptors as JSON.
    Tools,
    /// Invoke one tool and print its result.
    Call {
        /// Tool name, e.g. get_gdp.
        name: String,
        /// Arguments as a JSON object, e.g. '{"country":"US","year":2020}'.
        #[arg(default_value = "{}")]
        arguments: String,
    },
}

fn init_logging(level: &str) {
    // stdout carries the protocol; logs go to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn load_config(args: &GlobalArgs) -> Result<Config> {
    let config = Config::load(args.config.as_deref())?.with_overrides(Overrides {
        world_bank_url: args.world_bank_url.clone(),
        fred_url: args.fred_url.clone(),
        fred_api_key: args.fred_api_key.clone(),
        timeout_secs: args.timeout_secs,
    });
    log::debug!("{:?}", config);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.global.log_level);

    let config = load_config(&cli.global)?;
    let registry = ToolRegistry::from_config(&config)?;

    match cli.cmd.unwrap_or(Command::Serve) {
        Command::Serve => McpServer::new(registry).run_stdio().await,
        Command::Tools => {
            println!("{}", serde_json::to_string_pretty(&registry.descriptors())?);
            Ok(())
        }
        Command::Call { name, arguments } => {
            let arguments: serde_json::Value =
                serde_json::from_str(&arguments).context("arguments must be a JSON object")?;
            let tool = registry
                .get(&name)
                .ok_or_else(|| anyhow::anyhow!("unknown tool: {}", name))?;
            let output = tool.call(arguments).await;
            println!("{}", serde_json::to_string_pretty(&output.value)?);
            Ok(())
        }
    }
}
