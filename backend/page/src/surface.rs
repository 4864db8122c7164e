//! # Surface
//!
//! Everything the page logic is allowed to touch.
//!
//! The components never hold on to page elements themselves. A host builds one
//! [`PageContext`] at startup, owning a [`Document`] (what is displayed) and a
//! [`VisibilityObserver`] (what is watched for scrolling into view), and hands
//! it to whichever component handles the current event.
//!
//! A browser host maps these onto DOM nodes and an intersection observer, the
//! terminal preview prints to stdout, and tests use [`crate::memory`].
use std::{borrow::Borrow, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::modal::{ModalKind, ModalView};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(Arc<str>);

impl RegionId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for RegionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rendering side of the page.
pub trait Document {
    /// Whether `id` is currently displayed.
    fn has_region(&self, id: &RegionId) -> bool;

    /// Replaces the displayed text of `id`.
    fn set_text(&mut self, id: &RegionId, text: &str);

    /// Marks the navigation menu, its toggle button and the header as open or closed.
    fn set_menu_open(&mut self, open: bool);

    fn show_modal(&mut self, view: &ModalView);

    fn hide_modal(&mut self, kind: ModalKind);

    /// Locks or unlocks scrolling of the page body.
    fn set_scroll_locked(&mut self, locked: bool);
}

/// Source of visibility notifications.
///
/// Once a region is observed the host reports every threshold crossing to
/// [`crate::dispatch::PageEvent::RegionVisible`] until it is unobserved.
pub trait VisibilityObserver {
    fn observe(&mut self, id: &RegionId);

    fn unobserve(&mut self, id: &RegionId);
}

pub struct PageContext<D, O> {
    pub document: D,
    pub observer: O,
}

impl<D: Document, O: VisibilityObserver> PageContext<D, O> {
    pub fn new(document: D, observer: O) -> Self {
        Self { document, observer }
    }
}
