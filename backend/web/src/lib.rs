//! Browser binding of the portfolio page.
//!
//! Built with `wasm-pack build backend/web --target web --out-dir ../../public/pkg`
//! and loaded by `public/main.js`. On load it registers the homelab diagrams,
//! observes them and wires the menu, cards and modals to a
//! [`page::dispatch::Dispatcher`] backed by the live DOM.
//!
//! The diagrams are already in the served markup, so the page reads fine
//! without scripting. Once a diagram scrolls into view it is cleared and typed
//! out again.
#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod markup;
