use std::{env, fmt::Display, net::IpAddr, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::error::AppError;

pub struct Config {
    pub port: u16,
    pub bind_address: IpAddr,
    pub public_dir: PathBuf,
    pub rate_limit_max: u32,
    pub rate_limit_window: Duration,
    pub trust_proxy: bool,
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn load() -> Result<Self, AppError> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Ignoring unreadable .env file: {e}"),
        }

        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, "PORT", "3000")?,
            bind_address: try_load(&lookup, "BIND_ADDRESS", "0.0.0.0")?,
            public_dir: try_load(&lookup, "PUBLIC_DIR", "public")?,
            rate_limit_max: try_load(&lookup, "RATE_LIMIT_MAX", "100")?,
            rate_limit_window: Duration::from_secs(try_load(
                &lookup,
                "RATE_LIMIT_WINDOW_SECS",
                "900",
            )?),
            trust_proxy: try_load(&lookup, "TRUST_PROXY", "false")?,
        })
    }

    pub fn index_file(&self) -> PathBuf {
        self.public_dir.join("index.html")
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");

            AppError::Config {
                key: key.to_string(),
                message: e.to_string(),
            }
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = from_pairs(&[]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_address.to_string(), "0.0.0.0");
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.index_file(), PathBuf::from("public/index.html"));
        assert_eq!(config.rate_limit_max, 100);
        assert_eq!(config.rate_limit_window, Duration::from_secs(15 * 60));
        assert!(!config.trust_proxy);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = from_pairs(&[
            ("PORT", "8080"),
            ("BIND_ADDRESS", "127.0.0.1"),
            ("PUBLIC_DIR", "/srv/www"),
            ("RATE_LIMIT_MAX", "5"),
            ("RATE_LIMIT_WINDOW_SECS", "60"),
            ("TRUST_PROXY", "true"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address.to_string(), "127.0.0.1");
        assert_eq!(config.public_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.rate_limit_max, 5);
        assert_eq!(config.rate_limit_window, Duration::from_secs(60));
        assert!(config.trust_proxy);
    }

    #[test]
    fn invalid_value_names_the_key() {
        let Err(AppError::Config { key, .. }) = from_pairs(&[("PORT", "eighty")]) else {
            panic!("expected a config error");
        };

        assert_eq!(key, "PORT");
    }
}
