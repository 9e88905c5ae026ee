//! Fetch one market snapshot and print its rendering.
//!
//! Usage: `snapshot [SYMBOL] [binance|hyperliquid]`

use marketscope_rs::config::EngineConfig;
use marketscope_rs::snapshot::{render, Exchange, MarketEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let symbol = args.next().unwrap_or_else(|| "BTC".to_string());
    let exchange = match args.next().as_deref() {
        Some("hyperliquid") => Exchange::Hyperliquid,
        _ => Exchange::BinanceFutures,
    };

    let engine = MarketEngine::from_config(EngineConfig::from_env())?;
    let snapshot = engine.snapshot(&symbol, exchange).await?;
    println!("{}", render(&snapshot));

    Ok(())
}
