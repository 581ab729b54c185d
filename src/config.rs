use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub trending: TrendingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Knobs for the trending recomputation cycle.
///
/// `max_pages` and `cycle_timeout_secs` bound a single cycle so a
/// misbehaving post source cannot wedge the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingConfig {
    pub refresh_interval_secs: u64,
    pub window_hours: i64,
    pub page_size: u32,
    pub top_k: usize,
    pub max_pages: u32,
    pub cycle_timeout_secs: u64,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 3600,
            window_hours: 24,
            page_size: 100,
            top_k: 10,
            max_pages: 1000,
            cycle_timeout_secs: 300,
        }
    }
}

fn env_or_parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("{}: {}", key, e)))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_or_parse("APP_PORT", "8080")?,
                log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .map_err(|_| AppError::Config("DATABASE_URL must be set".to_string()))?,
                max_connections: env_or_parse("DATABASE_MAX_CONNECTIONS", "10")?,
            },
            trending: TrendingConfig {
                refresh_interval_secs: env_or_parse("TREND_REFRESH_INTERVAL_SECS", "3600")?,
                window_hours: env_or_parse("TREND_WINDOW_HOURS", "24")?,
                page_size: env_or_parse("TREND_SCAN_PAGE_SIZE", "100")?,
                top_k: env_or_parse("TREND_TOP_K", "10")?,
                max_pages: env_or_parse("TREND_SCAN_MAX_PAGES", "1000")?,
                cycle_timeout_secs: env_or_parse("TREND_CYCLE_TIMEOUT_SECS", "300")?,
            },
        })
    }
}
