//! Monotonic instant used to schedule reveal steps.
//!
//! Native builds use tokio's clock so the run loop can sleep on it and tests can
//! pause it. In the browser, `performance.now()` backs it.
#[cfg(not(target_arch = "wasm32"))]
pub use tokio::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
