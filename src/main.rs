//! CARAVAN — market arbitrage and trade-route planner
//!
//! Entry point. Loads the scenario from TOML, initialises structured
//! logging, runs every opportunity query plus the route planner, and
//! prints the resulting market report (or JSON with `--json`).

use anyhow::{Context, Result};
use tracing::info;

use caravan::config;
use caravan::engine::{ArbitrageCalculator, RoutePlanner};
use caravan::report::MarketReport;

const BANNER: &str = r#"
  ____    _    ____      ___     ___    _   _
 / ___|  / \  |  _ \    / \ \   / / \  | \ | |
| |     / _ \ | |_) |  / _ \ \ / / _ \ |  \| |
| |___ / ___ \|  _ <  / ___ \ V / ___ \| |\  |
 \____/_/   \_\_| \_\/_/   \_\_/_/   \_\_| \_|

  Market arbitrage & trade-route planner
"#;

const DEFAULT_CONFIG: &str = "config.toml";

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let mut json_output = false;
    let mut config_arg = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json_output = true,
            _ => config_arg = Some(arg),
        }
    }
    let config_path = config_arg
        .or_else(|| std::env::var("CARAVAN_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    init_logging();

    let cfg = config::AppConfig::load(&config_path)?;
    let (world, prices) = cfg.into_world().context("Invalid scenario")?;
    let engine_cfg = cfg.arbitrage_config();

    if !json_output {
        println!("{BANNER}");
    }
    info!(
        config = %config_path,
        items = world.items().len(),
        locations = world.locations().len(),
        coins = world.player().coins,
        position = %world.player().position,
        "CARAVAN starting up"
    );

    let planner = RoutePlanner::new(ArbitrageCalculator::new(&world, &prices, engine_cfg));
    let report = MarketReport::build(&planner, engine_cfg.default_max_stops)
        .context("Market scan failed")?;

    if json_output {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
    } else {
        println!("{report}");
    }

    info!(
        opportunities = report.all_opportunities.len(),
        route_stops = report.route.stops(),
        route_profit = report.route.total_profit,
        "CARAVAN done"
    );

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("caravan=info"));

    let json_logging = std::env::var("CARAVAN_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
