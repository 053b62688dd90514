//! Service configuration.
//!
//! Everything comes from environment variables, each with a default, so the binary runs
//! with no setup at all.

use crate::model::PricingRates;
use crate::simulator::{DEFAULT_ACTIVATION_PROBABILITY, DEFAULT_TICK_INTERVAL};
use rust_decimal::Decimal;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TablesideConfig {
    pub host: String,
    pub port: u16,
    pub tick_interval: Duration,
    /// Chance, per tick, that a subscribed order advances.
    pub activation_probability: f64,
    pub rates: PricingRates,
    pub max_table_number: u32,
    /// Estimate printed on new orders.
    pub estimated_time: String,
    /// Fixes the simulator's random draws when set.
    pub simulator_seed: Option<u64>,
}

impl Default for TablesideConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            tick_interval: DEFAULT_TICK_INTERVAL,
            activation_probability: DEFAULT_ACTIVATION_PROBABILITY,
            rates: PricingRates::default(),
            max_table_number: 50,
            estimated_time: "20-25 minutes".to_owned(),
            simulator_seed: None,
        }
    }
}

impl TablesideConfig {
    /// Load configuration from environment variables.
    ///
    /// - `TABLESIDE_HOST` -- bind address (default `0.0.0.0`)
    /// - `TABLESIDE_PORT` -- bind port (default `8080`)
    /// - `TICK_INTERVAL_MS` -- simulator period in milliseconds (default 5000)
    /// - `ACTIVATION_PROBABILITY` -- per-tick advance chance in `[0, 1]` (default 0.10)
    /// - `TAX_RATE` -- decimal rate (default 0.08)
    /// - `SERVICE_RATE` -- decimal rate (default 0.18)
    /// - `MAX_TABLE_NUMBER` -- highest valid table (default 50)
    /// - `ESTIMATED_TIME` -- estimate shown on new orders (default `20-25 minutes`)
    /// - `SIMULATOR_SEED` -- optional RNG seed
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with variables read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let tick_interval_ms: u64 = parse_or(&lookup, "TICK_INTERVAL_MS", defaults.tick_interval.as_millis() as u64)?;
        if tick_interval_ms == 0 {
            return Err(invalid("TICK_INTERVAL_MS", "must be greater than zero"));
        }

        let activation_probability: f64 =
            parse_or(&lookup, "ACTIVATION_PROBABILITY", defaults.activation_probability)?;
        if !(0.0..=1.0).contains(&activation_probability) {
            return Err(invalid("ACTIVATION_PROBABILITY", "must be between 0 and 1"));
        }

        let tax: Decimal = parse_or(&lookup, "TAX_RATE", defaults.rates.tax)?;
        let service: Decimal = parse_or(&lookup, "SERVICE_RATE", defaults.rates.service)?;
        if tax.is_sign_negative() || service.is_sign_negative() {
            return Err(invalid("TAX_RATE/SERVICE_RATE", "must not be negative"));
        }

        let max_table_number: u32 = parse_or(&lookup, "MAX_TABLE_NUMBER", defaults.max_table_number)?;
        if max_table_number == 0 {
            return Err(invalid("MAX_TABLE_NUMBER", "must be at least 1"));
        }

        let simulator_seed = match lookup("SIMULATOR_SEED") {
            Some(raw) => Some(parse("SIMULATOR_SEED", &raw)?),
            None => None,
        };

        Ok(Self {
            host: lookup("TABLESIDE_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "TABLESIDE_PORT", defaults.port)?,
            tick_interval: Duration::from_millis(tick_interval_ms),
            activation_probability,
            rates: PricingRates { tax, service },
            max_table_number,
            estimated_time: lookup("ESTIMATED_TIME").unwrap_or(defaults.estimated_time),
            simulator_seed,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        name,
        reason: reason.into(),
    }
}

fn parse<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| invalid(name, e.to_string()))
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(raw) => parse(name, &raw),
        None => Ok(default),
    }
}
