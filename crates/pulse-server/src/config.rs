//! Environment-driven server configuration.

use std::{env, fmt::Display, str::FromStr};

use pulse_auth::AuthConfig;
use pulse_db::DbConfig;
use tracing::{info, warn};

/// Everything the binary needs, loaded once at startup.
pub struct ServerConfig {
    pub port: u16,
    pub db: DbConfig,
    pub auth: AuthConfig,
    pub stripe_secret_key: String,
}

impl ServerConfig {
    pub fn load() -> Self {
        Self {
            port: try_load("PULSE_PORT", "8888"),
            db: DbConfig {
                url: try_load("SURREAL_URL", "127.0.0.1:8000"),
                namespace: try_load("SURREAL_NS", "pulse"),
                database: try_load("SURREAL_DB", "main"),
                username: try_load("SURREAL_USER", "root"),
                password: try_load("SURREAL_PASS", "root"),
            },
            auth: AuthConfig {
                token_secret: require("ACCESS_TOKEN_SECRET"),
                ..AuthConfig::default()
            },
            stripe_secret_key: require("STRIPE_SECRET_KEY"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn require(key: &str) -> String {
    env::var(key)
        .map_err(|_| {
            warn!("Required environment variable {key} is not set");
        })
        .expect("Environment misconfigured!")
}
