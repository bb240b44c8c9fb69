//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_data_adapter::CsvDataAdapter;
use crate::adapters::csv_trade_log::CsvTradeLog;
use crate::adapters::ini_config_adapter::IniConfigAdapter;
use crate::adapters::paper_exchange::PaperExchange;
use crate::domain::backtest::run_backtest;
use crate::domain::error::CandlebotError;
use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::domain::live::{run_live_tick, LiveSettings};
use crate::domain::report::Summary;
use crate::domain::strategy::{StrategyConfig, StrategyKind, StrategyParams};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::trade_log_port::TradeLogPort;

#[derive(Parser, Debug)]
#[command(name = "candlebot", about = "Indicator-driven trading simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over CSV price history
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Directory containing one {SYMBOL}.csv file per symbol
        #[arg(short, long)]
        data: PathBuf,
        /// Backtest a single symbol instead of the configured list
        #[arg(long)]
        symbol: Option<String>,
        /// Append executed trades to this CSV log
        #[arg(short, long)]
        log: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Summarise a trade log
    Report {
        #[arg(short, long)]
        log: PathBuf,
    },
    /// Run one live evaluation tick against the paper exchange
    Live {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        log: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data,
            symbol,
            log,
        } => run_backtest_cmd(&config, &data, symbol.as_deref(), log),
        Command::Validate { config } => run_validate(&config),
        Command::Report { log } => run_report(&log),
        Command::Live { config, data, log } => run_live(&config, &data, log),
    }
}

pub fn load_config(path: &PathBuf) -> Result<IniConfigAdapter, ExitCode> {
    IniConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn run_backtest_cmd(
    config_path: &PathBuf,
    data_path: &PathBuf,
    symbol_override: Option<&str>,
    log_path: Option<PathBuf>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let config = match build_strategy_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = resolve_symbols(symbol_override, &adapter);
    if symbols.is_empty() {
        eprintln!("error: no symbols configured");
        return ExitCode::from(2);
    }

    let data_port = CsvDataAdapter::new(data_path.clone());
    let trade_log = log_path.map(CsvTradeLog::new);

    eprintln!(
        "Running {} backtest for {} symbol(s)",
        config.params.kind(),
        symbols.len()
    );

    let mut completed = 0usize;
    for symbol in &symbols {
        let series = match data_port.load_bars(symbol) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("warning: skipping {} ({})", symbol, e);
                continue;
            }
        };
        eprintln!("{}: {} bars loaded", symbol, series.len());

        let result = run_backtest(&series, &config);
        eprintln!(
            "{}: {} bars evaluated, {} skipped during warmup",
            symbol, result.bars_evaluated, result.bars_skipped
        );

        println!("=== {} ===", symbol);
        for trade in &result.trades {
            println!(
                "{} {} {:.6} @ {:.2} (balance {:.2})",
                trade.timestamp.to_rfc3339(),
                trade.action,
                trade.quantity,
                trade.price,
                trade.balance
            );
        }
        println!("{}", Summary::compute(&result.trades));
        println!("Final Value:       {:.2}", result.final_balance);

        if let Some(ref log) = trade_log {
            for trade in &result.trades {
                if let Err(e) = log.append(trade) {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            }
            eprintln!(
                "{}: {} trades appended to {}",
                symbol,
                result.trades.len(),
                log.path().display()
            );
        }
        completed += 1;
    }

    if completed == 0 {
        eprintln!("error: no symbols with loadable data");
        return ExitCode::from(3);
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let config = match build_strategy_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let settings = build_live_settings(&adapter);

    eprintln!("Strategy:        {}", config.params.kind());
    eprintln!("Order size:      {}", config.order_size);
    eprintln!("Initial balance: {}", config.initial_balance);
    eprintln!("Symbols:         {}", settings.symbols.join(", "));
    eprintln!("Interval:        {}", settings.interval);
    eprintln!("Kline limit:     {}", settings.limit);
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_report(log_path: &PathBuf) -> ExitCode {
    let log = CsvTradeLog::new(log_path.clone());
    let trades = match log.read_all() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Read {} trades from {}", trades.len(), log_path.display());
    println!("{}", Summary::compute(&trades));
    ExitCode::SUCCESS
}

fn run_live(config_path: &PathBuf, data_path: &PathBuf, log_path: Option<PathBuf>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let config = match build_strategy_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let settings = build_live_settings(&adapter);
    if settings.symbols.is_empty() {
        eprintln!("error: no symbols configured");
        return ExitCode::from(2);
    }

    let data_port = CsvDataAdapter::new(data_path.clone());
    let trade_log = CsvTradeLog::new(log_path.unwrap_or_else(|| PathBuf::from("trades.csv")));

    for symbol in &settings.symbols {
        let series = match data_port.load_bars(symbol) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let exchange = PaperExchange::new(series, &settings.quote_asset, config.initial_balance);
        match run_live_tick(&exchange, &trade_log, symbol, &settings, &config) {
            Ok(outcome) => match (outcome.decision, outcome.trade) {
                (Some(decision), Some(trade)) => {
                    println!(
                        "{}: {} {:.6} @ {:.2} (balance {:.2})",
                        symbol, decision, trade.quantity, trade.price, trade.balance
                    );
                }
                (Some(decision), None) => println!("{}: {}", symbol, decision),
                (None, _) => println!("{}: not yet evaluable", symbol),
            },
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    eprintln!("Trades logged to {}", trade_log.path().display());
    ExitCode::SUCCESS
}

/// Build and validate the strategy configuration from `[strategy]` plus the
/// per-strategy section.
pub fn build_strategy_config(adapter: &dyn ConfigPort) -> Result<StrategyConfig, CandlebotError> {
    let kind_str =
        adapter
            .get_string("strategy", "kind")
            .ok_or_else(|| CandlebotError::ConfigMissing {
                section: "strategy".into(),
                key: "kind".into(),
            })?;
    let kind = StrategyKind::parse(&kind_str).ok_or_else(|| CandlebotError::ConfigInvalid {
        section: "strategy".into(),
        key: "kind".into(),
        reason: format!("unknown strategy {:?} (expected RSI, MACD or SMA)", kind_str),
    })?;

    let params = match kind {
        StrategyKind::Rsi => StrategyParams::Rsi {
            period: adapter.get_usize("rsi", "period", 14),
            oversold: adapter.get_f64("rsi", "oversold", 30.0),
            overbought: adapter.get_f64("rsi", "overbought", 70.0),
        },
        StrategyKind::Macd => StrategyParams::Macd {
            fast: adapter.get_usize("macd", "fast_period", DEFAULT_FAST),
            slow: adapter.get_usize("macd", "slow_period", DEFAULT_SLOW),
            signal: adapter.get_usize("macd", "signal_period", DEFAULT_SIGNAL),
        },
        StrategyKind::Sma => StrategyParams::Sma {
            short_window: adapter.get_usize("sma", "short_window", 10),
            long_window: adapter.get_usize("sma", "long_window", 50),
        },
    };

    StrategyConfig::new(
        params,
        adapter.get_f64("strategy", "order_size", 0.01),
        adapter.get_f64("strategy", "initial_balance", 10_000.0),
    )
}

pub fn build_live_settings(adapter: &dyn ConfigPort) -> LiveSettings {
    LiveSettings {
        symbols: resolve_symbols(None, adapter),
        interval: adapter
            .get_string("data", "interval")
            .unwrap_or_else(|| "1h".to_string()),
        limit: adapter.get_usize("data", "limit", 100),
        quote_asset: adapter
            .get_string("data", "quote_asset")
            .unwrap_or_else(|| "USDT".to_string()),
    }
}

pub fn resolve_symbols(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(s) = symbol_override {
        return vec![s.to_uppercase()];
    }

    if let Some(symbols_str) = config.get_string("data", "symbols") {
        return symbols_str
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
    }

    if let Some(symbol) = config.get_string("data", "symbol") {
        let symbol = symbol.trim().to_uppercase();
        if !symbol.is_empty() {
            return vec![symbol];
        }
    }

    vec![]
}
