// src/config.rs
use std::net::IpAddr;
use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;

use crate::repository::{TimestampPolicy, DEFAULT_COLLECTION};
use crate::view::format::{CurrencyFormat, MAX_FRACTION_DIGITS};

const DEV_JWT_SECRET: &str = "catalog-admin-dev-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable '{0}'")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub store: StoreBackend,
    pub collection: String,
    pub jwt_secret: String,
    pub login_delay: Duration,
    pub login_display_name: String,
    pub store_name: String,
    pub currency: CurrencyFormat,
    pub timestamp_policy: TimestampPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| get(name).filter(|v| !v.trim().is_empty());
        let invalid = |name: &'static str, reason: String| ConfigError::Invalid { name, reason };

        let host = get("HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse::<IpAddr>()
            .map_err(|e| invalid("HOST", e.to_string()))?;
        let port = get("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| invalid("PORT", e.to_string()))?;

        let store = match get("STORE_BACKEND").as_deref().unwrap_or("memory") {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            other => return Err(invalid("STORE_BACKEND", format!("unknown backend '{other}'"))),
        };

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            DEV_JWT_SECRET.to_string()
        });

        let login_delay = get("LOGIN_DELAY_MS")
            .map(|v| v.parse::<u64>().map_err(|e| invalid("LOGIN_DELAY_MS", e.to_string())))
            .transpose()?
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_secs(1));

        let locale = get("CURRENCY_LOCALE").unwrap_or_else(|| "es-CO".to_string());
        let mut currency = CurrencyFormat::for_locale(&locale)
            .ok_or_else(|| invalid("CURRENCY_LOCALE", format!("no preset for '{locale}'")))?;
        if let Some(raw) = get("CURRENCY_FRACTION_DIGITS") {
            let digits = raw
                .parse::<u8>()
                .ok()
                .filter(|d| *d <= MAX_FRACTION_DIGITS)
                .ok_or_else(|| invalid("CURRENCY_FRACTION_DIGITS", format!("expected 0-{MAX_FRACTION_DIGITS}, got '{raw}'")))?;
            currency = currency.with_fraction_digits(digits);
        }

        let timestamp_policy = match get("CREATED_AT_ON_EDIT").as_deref().unwrap_or("preserve") {
            "preserve" => TimestampPolicy::PreserveOnEdit,
            "reset" => TimestampPolicy::ResetOnEdit,
            other => return Err(invalid("CREATED_AT_ON_EDIT", format!("expected preserve or reset, got '{other}'"))),
        };

        Ok(Self {
            host,
            port,
            store,
            collection: get("PRODUCTS_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            jwt_secret,
            login_delay,
            login_display_name: get("LOGIN_DISPLAY_NAME").unwrap_or_else(|| "Store Admin".to_string()),
            store_name: get("STORE_NAME").unwrap_or_else(|| "Store".to_string()),
            currency,
            timestamp_policy,
        })
    }
}
