use std::{env, fmt::Display, str::FromStr};

use anyhow::Context;
use tracing::{info, warn};

pub const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
pub const FACEBOOK_GRAPH_URL: &str = "https://graph.facebook.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub session_ttl_days: i64,
    pub google_tokeninfo_url: String,
    pub google_client_id: Option<String>,
    pub facebook_graph_url: String,
    pub otel_endpoint: Option<String>,
    pub otel_service_name: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_ttl_days: i64 = try_load(&lookup, "SESSION_TTL_DAYS", "30")?;
        if session_ttl_days <= 0 {
            anyhow::bail!("SESSION_TTL_DAYS must be positive, got {}", session_ttl_days);
        }

        Ok(Self {
            port: try_load(&lookup, "PORT", "3000")?,
            database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            session_ttl_days,
            google_tokeninfo_url: lookup("GOOGLE_TOKENINFO_URL")
                .unwrap_or_else(|| GOOGLE_TOKENINFO_URL.to_string()),
            google_client_id: lookup("GOOGLE_CLIENT_ID").filter(|v| !v.is_empty()),
            facebook_graph_url: lookup("FACEBOOK_GRAPH_URL")
                .unwrap_or_else(|| FACEBOOK_GRAPH_URL.to_string()),
            otel_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty()),
            otel_service_name: lookup("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| "cocina-server".to_string()),
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        anyhow::anyhow!("Invalid {key} value {raw:?}: {e}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/cocina")]))
                .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.session_ttl_days, 30);
        assert_eq!(config.google_tokeninfo_url, GOOGLE_TOKENINFO_URL);
        assert_eq!(config.facebook_graph_url, FACEBOOK_GRAPH_URL);
        assert_eq!(config.google_client_id, None);
        assert_eq!(config.otel_endpoint, None);
        assert_eq!(config.otel_service_name, "cocina-server");
    }

    #[test]
    fn test_database_url_required() {
        assert!(Config::from_lookup(lookup_from(&[])).is_err());
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/cocina"),
            ("PORT", "eighty"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_session_ttl_must_be_positive() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/cocina"),
            ("SESSION_TTL_DAYS", "0"),
        ]));
        assert!(result.is_err());
    }
}
