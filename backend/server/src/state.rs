use std::sync::Arc;

use super::{config::Config, error::AppError, rate_limit::RateLimiter};

pub struct AppState {
    pub config: Config,
    pub limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let limiter = RateLimiter::new(config.rate_limit_max, config.rate_limit_window);

        Arc::new(Self { config, limiter })
    }

    pub fn load() -> Result<Arc<Self>, AppError> {
        Ok(Self::new(Config::load()?))
    }
}
