//! Bracket order automation demo - entry point.
//!
//! Drives the order flows against the built-in panel simulator. A real
//! page backend would implement `PageSurface` and replace the simulator
//! in `Application::new`.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use bracket_bot::{AppConfig, Application};
use bracket_contracts::{active_quarterly_now, normalize_symbol, RootSymbol};
use bracket_core::{Price, TradeAction};
use bracket_exec::ActionReport;

/// Bracket order automation demo
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via BRACKET_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SideArg {
    Buy,
    Sell,
}

impl From<SideArg> for TradeAction {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Buy => TradeAction::Buy,
            SideArg::Sell => TradeAction::Sell,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the active quarterly contract for a product root
    Contract {
        /// Product root, e.g. NQ
        root: String,
    },
    /// Expand a symbol the way the order flows would
    Normalize {
        /// Bare root or dated symbol
        symbol: String,
    },
    /// Place a bracket order on the simulated panel
    Place {
        #[arg(long)]
        side: SideArg,
        /// Contracts; defaults to the stored default
        #[arg(long)]
        qty: Option<u32>,
        /// Symbol; defaults to the stored default
        #[arg(long)]
        symbol: Option<String>,
        /// Limit entry price; omit for a market entry
        #[arg(long)]
        entry: Option<Price>,
    },
    /// Cancel all working orders
    CancelAll,
    /// Exit all open positions at market
    Flatten,
    /// Show stored trade defaults, optionally setting keys first
    Defaults {
        /// key=value pairs to store, e.g. bracketTrade_qty=2
        #[arg(long = "set")]
        set: Vec<String>,
    },
    /// Show the current order and position tables
    Status,
}

fn load_app(config_override: Option<String>) -> Result<Application> {
    let config_path = config_override
        .or_else(|| std::env::var("BRACKET_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = AppConfig::load(&config_path)?;
    Ok(Application::new(config)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    bracket_bot::init_logging();
    info!("Starting bracket-bot v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Contract { root } => {
            let root = RootSymbol::parse(&root)?;
            let code = active_quarterly_now();
            println!("{root}{code}");
        }
        Command::Normalize { symbol } => {
            println!("{}", normalize_symbol(&symbol));
        }
        Command::Place {
            side,
            qty,
            symbol,
            entry,
        } => {
            let app = load_app(args.config)?;
            let report = app.place(side.into(), symbol, qty, entry).await?;
            print_report("place", &report);
        }
        Command::CancelAll => {
            let app = load_app(args.config)?;
            let report = app.cancel_all().await?;
            print_report("cancel-all", &report);
        }
        Command::Flatten => {
            let app = load_app(args.config)?;
            let report = app.flatten_all().await?;
            print_report("flatten", &report);
        }
        Command::Defaults { set } => {
            let app = load_app(args.config)?;
            for pair in &set {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| anyhow::anyhow!("expected key=value, got {pair:?}"))?;
                app.settings().set(key, value)?;
            }
            let defaults = app.defaults();
            println!("symbol:            {}", defaults.symbol);
            println!("quantity:          {}", defaults.quantity);
            println!("stop-loss ticks:   {}", defaults.stop_loss_ticks);
            println!("take-profit ticks: {}", defaults.take_profit_ticks);
            println!("tick size:         {}", defaults.tick_size);
        }
        Command::Status => {
            let app = load_app(args.config)?;
            let snapshot = app.snapshot()?;
            println!("orders ({}):", snapshot.orders.len());
            for order in &snapshot.orders {
                let side = order
                    .action
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "?".to_string());
                let qty = order
                    .quantity
                    .map(|q| q.to_string())
                    .unwrap_or_else(|| "?".to_string());
                println!(
                    "  {} {} {} x{} [{}]",
                    order.id, order.symbol, side, qty, order.status
                );
            }
            println!("positions ({} open):", snapshot.open_position_count());
            for position in &snapshot.positions {
                println!("  {} net {}", position.symbol, position.net_quantity);
            }
        }
    }

    Ok(())
}

fn print_report(what: &str, report: &ActionReport) {
    if report.success {
        println!("{what}: confirmed");
    } else if report.errors.is_empty() {
        println!("{what}: no detectable change");
    } else {
        println!("{what}: FAILED");
    }
    for change in &report.changes {
        println!("  + {change}");
    }
    for warning in &report.warnings {
        println!("  ! {warning}");
    }
    for error in &report.errors {
        println!("  x {error}");
    }
}
