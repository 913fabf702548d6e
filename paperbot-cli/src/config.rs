//! TOML run configuration.

use anyhow::{bail, Context, Result};
use paperbot_core::engine::{SamplePolicy, Strategy};
use paperbot_core::strategies::{BuyAndHold, SmaCrossover};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level run configuration.
///
/// ```toml
/// [backtest]
/// initial_capital = 10000.0
/// commission_rate = 0.005
/// sample_policy = "per_order"
///
/// [instruments]
/// AAPL = "data/aapl.csv"
///
/// [strategy]
/// type = "sma_crossover"
/// symbol = "AAPL"
/// fast = 50
/// slow = 200
/// ```
#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub backtest: BacktestSection,
    /// Symbol → CSV path.
    pub instruments: BTreeMap<String, PathBuf>,
    pub strategy: StrategySection,
}

#[derive(Debug, Deserialize)]
pub struct BacktestSection {
    #[serde(default = "default_capital")]
    pub initial_capital: f64,
    #[serde(default = "default_commission")]
    pub commission_rate: f64,
    #[serde(default)]
    pub sample_policy: SamplePolicy,
}

fn default_capital() -> f64 {
    10_000.0
}

fn default_commission() -> f64 {
    0.005
}

#[derive(Debug, Deserialize)]
pub struct StrategySection {
    #[serde(rename = "type")]
    pub strategy_type: String,
    pub symbol: String,
    pub fast: Option<usize>,
    pub slow: Option<usize>,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config '{}'", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(content).context("parsing run config")?;
        if config.instruments.is_empty() {
            bail!("config lists no instruments");
        }
        if !config.instruments.contains_key(&config.strategy.symbol) {
            bail!(
                "strategy symbol '{}' is not among the instruments",
                config.strategy.symbol
            );
        }
        Ok(config)
    }

    /// Build the configured strategy.
    pub fn build_strategy(&self) -> Result<Box<dyn Strategy>> {
        match self.strategy.strategy_type.as_str() {
            "sma_crossover" => {
                let fast = self.strategy.fast.unwrap_or(50);
                let slow = self.strategy.slow.unwrap_or(200);
                if fast == 0 || slow <= fast {
                    bail!("sma_crossover needs 0 < fast < slow (got fast={fast}, slow={slow})");
                }
                Ok(Box::new(SmaCrossover::new(
                    self.strategy.symbol.clone(),
                    fast,
                    slow,
                )))
            }
            "buy_and_hold" => Ok(Box::new(BuyAndHold::new(self.strategy.symbol.clone()))),
            other => bail!("unknown strategy '{other}'. Valid: sma_crossover, buy_and_hold"),
        }
    }
}
