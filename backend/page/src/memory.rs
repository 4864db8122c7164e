//! Headless surfaces that record everything written to them.
use std::collections::{BTreeMap, BTreeSet};

use crate::{
    modal::{ModalKind, ModalView},
    surface::{Document, RegionId, VisibilityObserver},
};

#[derive(Debug, Default)]
pub struct MemoryDocument {
    texts: BTreeMap<RegionId, Vec<String>>,
    pub menu_open: bool,
    pub modal: Option<ModalView>,
    pub scroll_locked: bool,
}

impl MemoryDocument {
    pub fn with_regions<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut document = Self::default();
        for id in ids {
            document.add_region(RegionId::new(id));
        }

        document
    }

    pub fn add_region(&mut self, id: RegionId) {
        self.texts.entry(id).or_default();
    }

    pub fn remove_region(&mut self, id: &RegionId) {
        self.texts.remove(id);
    }

    /// Every text written to `id`, oldest first.
    pub fn history(&self, id: &RegionId) -> &[String] {
        self.texts.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Currently displayed text of `id`.
    pub fn text(&self, id: &RegionId) -> Option<&str> {
        self.texts.get(id)?.last().map(String::as_str)
    }
}

impl Document for MemoryDocument {
    fn has_region(&self, id: &RegionId) -> bool {
        self.texts.contains_key(id)
    }

    fn set_text(&mut self, id: &RegionId, text: &str) {
        if let Some(history) = self.texts.get_mut(id) {
            history.push(text.to_owned());
        }
    }

    fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
    }

    fn show_modal(&mut self, view: &ModalView) {
        self.modal = Some(view.clone());
    }

    fn hide_modal(&mut self, kind: ModalKind) {
        if self.modal.as_ref().is_some_and(|view| view.kind() == kind) {
            self.modal = None;
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverCall {
    Observe(RegionId),
    Unobserve(RegionId),
}

#[derive(Debug, Default)]
pub struct MemoryObserver {
    observed: BTreeSet<RegionId>,
    pub log: Vec<ObserverCall>,
}

impl MemoryObserver {
    pub fn is_observed(&self, id: &RegionId) -> bool {
        self.observed.contains(id)
    }

    pub fn observed(&self) -> impl Iterator<Item = &RegionId> {
        self.observed.iter()
    }
}

impl VisibilityObserver for MemoryObserver {
    fn observe(&mut self, id: &RegionId) {
        self.observed.insert(id.clone());
        self.log.push(ObserverCall::Observe(id.clone()));
    }

    fn unobserve(&mut self, id: &RegionId) {
        self.observed.remove(id);
        self.log.push(ObserverCall::Unobserve(id.clone()));
    }
}
