//! # Rate Limiting
//!
//! Fixed window per client, 100 requests every 15 minutes unless configured otherwise.
//!
//! - Client key is the peer IP, or the first `X-Forwarded-For` hop behind a trusted proxy
//! - A window starts at the first request of a client and resets once it has fully elapsed
//! - Every response carries `RateLimit-Limit`, `RateLimit-Remaining` and `RateLimit-Reset`
//! - Rejected requests get `429` with `Retry-After` and never reach the static files
//! - The table holds at most [`MAX_TRACKED_CLIENTS`] windows. Once full, expired windows are
//!   swept at most once per window, and new clients that still do not fit share the `unknown`
//!   bucket
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

use crate::{error::AppError, state::AppState};

pub const MAX_TRACKED_CLIENTS: usize = 10_000;

const UNKNOWN_CLIENT: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_after: Duration,
}

impl Decision {
    fn write_headers(&self, headers: &mut HeaderMap) {
        // Rounded up so a client waiting the advertised time is never early.
        let reset = self.reset_after.as_secs() + u64::from(self.reset_after.subsec_nanos() > 0);

        headers.insert("ratelimit-limit", HeaderValue::from(self.limit));
        headers.insert("ratelimit-remaining", HeaderValue::from(self.remaining));
        headers.insert("ratelimit-reset", HeaderValue::from(reset));
    }
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, Default)]
struct Table {
    windows: HashMap<String, Window>,
    last_sweep: Option<Instant>,
}

impl Table {
    /// Key the request is counted under.
    fn admit<'a>(&mut self, key: &'a str, now: Instant, window: Duration) -> &'a str {
        if key == UNKNOWN_CLIENT || self.windows.contains_key(key) {
            return key;
        }

        if self.is_full() && self.sweep_due(now, window) {
            let before = self.windows.len();
            self.windows
                .retain(|_, entry| now.duration_since(entry.started) < window);
            self.last_sweep = Some(now);
            debug!(swept = before - self.windows.len(), "Swept expired rate limit windows");
        }

        if self.is_full() {
            trace!(client = key, "Rate limit table full, using shared bucket");
            return UNKNOWN_CLIENT;
        }

        key
    }

    fn sweep_due(&self, now: Instant, window: Duration) -> bool {
        match self.last_sweep {
            Some(at) => now.duration_since(at) >= window,
            None => true,
        }
    }

    // One slot stays free for the shared bucket.
    fn is_full(&self) -> bool {
        self.windows.len() + 1 >= MAX_TRACKED_CLIENTS
    }
}

pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    table: Mutex<Table>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            table: Mutex::new(Table::default()),
        }
    }

    pub async fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now()).await
    }

    pub async fn check_at(&self, key: &str, now: Instant) -> Decision {
        let mut table = self.table.lock().await;
        let key = table.admit(key, now, self.window);
        let windows = &mut table.windows;

        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        window.count = window.count.saturating_add(1);

        Decision {
            allowed: window.count <= self.max_requests,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(window.count),
            reset_after: (window.started + self.window).saturating_duration_since(now),
        }
    }

    pub async fn tracked_clients(&self) -> usize {
        self.table.lock().await.windows.len()
    }
}

pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_key(&request, state.config.trust_proxy);
    let decision = state.limiter.check(&client).await;

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        warn!(%client, "Rate limit exceeded");

        AppError::RateLimited {
            retry_after: decision.reset_after,
        }
        .into_response()
    };

    decision.write_headers(response.headers_mut());

    response
}

fn client_key(request: &Request, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|hop| !hop.is_empty());

        if let Some(hop) = forwarded {
            return hop.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(address)| address.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use pretty_assertions::assert_eq;

    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn allows_up_to_the_limit_within_a_window() {
        let limiter = RateLimiter::new(3, WINDOW);
        let start = Instant::now();

        for (secs, expected) in [(0, 2), (1, 1), (2, 0)] {
            let decision = limiter
                .check_at("1.2.3.4", start + Duration::from_secs(secs))
                .await;
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected);
        }

        let rejected = limiter
            .check_at("1.2.3.4", start + Duration::from_secs(10))
            .await;
        assert_eq!(
            rejected,
            Decision {
                allowed: false,
                limit: 3,
                remaining: 0,
                reset_after: Duration::from_secs(50),
            }
        );
    }

    #[tokio::test]
    async fn window_resets_after_it_elapses() {
        let limiter = RateLimiter::new(1, WINDOW);
        let start = Instant::now();

        let almost = start + Duration::from_secs(59);

        assert!(limiter.check_at("a", start).await.allowed);
        assert!(!limiter.check_at("a", almost).await.allowed);
        assert!(limiter.check_at("a", start + WINDOW).await.allowed);
    }

    #[tokio::test]
    async fn clients_are_counted_separately() {
        let limiter = RateLimiter::new(1, WINDOW);
        let now = Instant::now();

        assert!(limiter.check_at("a", now).await.allowed);
        assert!(limiter.check_at("b", now).await.allowed);
        assert!(!limiter.check_at("a", now).await.allowed);
        assert_eq!(limiter.tracked_clients().await, 2);
    }

    #[tokio::test]
    async fn expired_windows_are_swept_when_the_table_is_full() {
        let limiter = RateLimiter::new(1, WINDOW);
        let start = Instant::now();

        for client in 0..MAX_TRACKED_CLIENTS {
            limiter.check_at(&client.to_string(), start).await;
        }
        limiter.check_at("late", start + WINDOW).await;

        assert_eq!(limiter.tracked_clients().await, 1);
    }

    #[tokio::test]
    async fn table_stays_bounded_within_one_window() {
        let limiter = RateLimiter::new(1, WINDOW);
        let start = Instant::now();

        for client in 0..15_000 {
            limiter.check_at(&format!("10.0.{client}"), start).await;
        }
        assert_eq!(limiter.tracked_clients().await, MAX_TRACKED_CLIENTS);

        // Clients that did not fit are counted together.
        assert!(!limiter.check_at("192.0.2.1", start).await.allowed);
        assert!(!limiter.check_at(UNKNOWN_CLIENT, start).await.allowed);
        assert_eq!(limiter.tracked_clients().await, MAX_TRACKED_CLIENTS);
    }

    #[tokio::test]
    async fn full_table_is_swept_at_most_once_per_window() {
        let limiter = RateLimiter::new(1, WINDOW);
        let start = Instant::now();
        let half = WINDOW / 2;

        for client in 0..MAX_TRACKED_CLIENTS / 2 {
            limiter.check_at(&format!("a-{client}"), start).await;
        }
        for client in 0..MAX_TRACKED_CLIENTS {
            limiter.check_at(&format!("b-{client}"), start + half).await;
        }
        assert_eq!(limiter.tracked_clients().await, MAX_TRACKED_CLIENTS);

        // The first half has expired, but the last sweep is less than a window old.
        limiter.check_at("c", start + WINDOW).await;
        assert_eq!(limiter.tracked_clients().await, MAX_TRACKED_CLIENTS);

        limiter.check_at("d", start + WINDOW + half).await;
        assert_eq!(limiter.tracked_clients().await, 1);
    }

    #[test]
    fn forwarded_for_is_used_only_behind_a_trusted_proxy() {
        let mut request = Request::new(Body::empty());
        request
            .headers_mut()
            .insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9, 10.0.0.1"));
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 4000))));

        assert_eq!(client_key(&request, true), "203.0.113.9");
        assert_eq!(client_key(&request, false), "10.0.0.1");
    }

    #[test]
    fn missing_peer_address_falls_back_to_shared_key() {
        let request = Request::new(Body::empty());

        assert_eq!(client_key(&request, true), UNKNOWN_CLIENT);
    }

    #[test]
    fn reset_header_rounds_up() {
        let mut headers = HeaderMap::new();
        Decision {
            allowed: true,
            limit: 100,
            remaining: 99,
            reset_after: Duration::from_millis(899_500),
        }
        .write_headers(&mut headers);

        assert_eq!(headers["ratelimit-limit"], "100");
        assert_eq!(headers["ratelimit-remaining"], "99");
        assert_eq!(headers["ratelimit-reset"], "900");
    }
}
