// src/config.rs
use crate::{
    error::{AppError, AppResult},
    state::DEFAULT_VIEW_CAPACITY,
};
use std::{env, net::SocketAddr, time::Duration};

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend_url: String,
    pub bind_addr: SocketAddr,
    pub backend_timeout: Duration,
    pub view_capacity: usize, // most student views kept in memory at once
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let backend_url = lookup("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "BACKEND_URL must be an http(s) URL, got '{}'",
                backend_url
            )));
        }

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR: {}", e)))?;

        let timeout_secs = match lookup("BACKEND_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| AppError::Config(format!("BACKEND_TIMEOUT_SECS: {}", e)))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let view_capacity = match lookup("VIEW_CAPACITY") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => return Err(AppError::Config("VIEW_CAPACITY must be at least 1".into())),
                Ok(n) => n,
                Err(e) => return Err(AppError::Config(format!("VIEW_CAPACITY: {}", e))),
            },
            None => DEFAULT_VIEW_CAPACITY,
        };

        Ok(Self {
            backend_url,
            bind_addr,
            backend_timeout: Duration::from_secs(timeout_secs),
            view_capacity,
        })
    }
}
