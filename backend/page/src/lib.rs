//! Interactive behavior of the portfolio page.
//!
//! The static markup under `public/` is served by `portfolio_server`. Everything
//! the page does after loading lives here, written against the [`surface`]
//! traits so it can run behind the browser binding (`portfolio_web`), the
//! terminal preview or the in-memory surfaces in [`memory`].
//!
//! # Pieces
//!
//! - [`animator`]: ASCII diagrams type themselves out the first time they scroll into view
//! - [`modal`]: homelab and blog cards open a dialog filled from [`content`]
//! - [`menu`]: hamburger toggle for narrow screens
//! - [`dispatch`]: routes typed [`dispatch::PageEvent`]s to the owning piece
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//!
//! use page::{
//!     clock::Instant,
//!     config::AnimatorConfig,
//!     dispatch::{Dispatcher, PageEvent},
//!     memory::{MemoryDocument, MemoryObserver},
//!     surface::{PageContext, RegionId},
//! };
//!
//! let context = PageContext::new(
//!     MemoryDocument::with_regions(["diagram-current"]),
//!     MemoryObserver::default(),
//! );
//! let mut page = Dispatcher::new(context, AnimatorConfig::default());
//!
//! let id = RegionId::new("diagram-current");
//! page.register(id.clone(), "A->B").unwrap();
//! assert!(page.start().is_empty());
//!
//! let now = Instant::now();
//! page.dispatch(PageEvent::RegionVisible { id: id.clone(), visible: true, ratio: 0.5 }, now);
//! page.tick(now + Duration::from_secs(1));
//!
//! assert_eq!(page.animator().revealed(&id), Some("A->B"));
//! ```
pub mod animator;
pub mod clock;
pub mod config;
pub mod content;
pub mod dispatch;
pub mod error;
pub mod memory;
pub mod menu;
pub mod modal;
pub mod session;
pub mod surface;
