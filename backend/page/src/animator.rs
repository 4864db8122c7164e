//! # Diagram typing effect
//!
//! Each registered region types out its payload once, the first time at least
//! [`AnimatorConfig::threshold`] of it scrolls into view.
//!
//! ## Lifecycle
//!
//! ```text
//! register ──► Pending ──(visible, ratio >= threshold)──► Firing ──(last char)──► Done
//!                 │                                           │
//!              start()                                   unobserved,
//!            observes it                                never re-fires
//! ```
//!
//! - Registering a pending region again replaces its payload, registering a fired one is a no-op
//! - Firing unobserves the region before anything is written, so a region fires at most once
//! - Every step writes the whole revealed prefix, one more character than the last write
//! - Regions never touch each other's text or state
use std::collections::{BTreeMap, btree_map::Entry};

use tracing::{debug, info, trace, warn};

use crate::{
    clock::Instant,
    config::AnimatorConfig,
    error::PageError,
    session::RevealSession,
    surface::{Document, PageContext, RegionId, VisibilityObserver},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    Replaced,
    Ignored,
}

#[derive(Debug)]
enum RegionState {
    Pending { payload: String, observed: bool },
    Firing(RevealSession),
    Done { text: String },
}

#[derive(Debug, Default)]
pub struct Animator {
    config: AnimatorConfig,
    regions: BTreeMap<RegionId, RegionState>,
}

impl Animator {
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            regions: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn register<D: Document>(
        &mut self,
        document: &D,
        id: RegionId,
        payload: impl Into<String>,
    ) -> Result<Registration, PageError> {
        if !document.has_region(&id) {
            warn!(region = %id, "Region not found, it will not animate");
            return Err(PageError::RegionNotFound(id));
        }

        let payload = payload.into();

        match self.regions.entry(id) {
            Entry::Vacant(entry) => {
                debug!(region = %entry.key(), "Registered region");
                entry.insert(RegionState::Pending {
                    payload,
                    observed: false,
                });

                Ok(Registration::Added)
            }
            Entry::Occupied(mut entry) => {
                let RegionState::Pending {
                    payload: current, ..
                } = entry.get_mut()
                else {
                    debug!(region = %entry.key(), "Region already fired, registration ignored");
                    return Ok(Registration::Ignored);
                };

                *current = payload;
                debug!(region = %entry.key(), "Replaced pending payload");

                Ok(Registration::Replaced)
            }
        }
    }

    /// Observes every pending region that is not observed yet.
    ///
    /// Regions that vanished from the document are reported and skipped.
    #[must_use]
    pub fn start<D, O>(&mut self, context: &mut PageContext<D, O>) -> Vec<PageError>
    where
        D: Document,
        O: VisibilityObserver,
    {
        let mut errors = Vec::new();

        for (id, state) in &mut self.regions {
            let RegionState::Pending { observed, .. } = state else {
                continue;
            };

            if *observed {
                continue;
            }

            if !context.document.has_region(id) {
                warn!(region = %id, "Region disappeared before observation");
                errors.push(PageError::RegionNotFound(id.clone()));
                continue;
            }

            context.observer.observe(id);
            *observed = true;
            trace!(region = %id, "Observing region");
        }

        errors
    }

    /// Returns whether this event fired the region.
    pub fn on_visibility_change<D, O>(
        &mut self,
        context: &mut PageContext<D, O>,
        id: &RegionId,
        is_visible: bool,
        ratio: f64,
        now: Instant,
    ) -> bool
    where
        D: Document,
        O: VisibilityObserver,
    {
        if !(is_visible && ratio >= self.config.threshold) {
            trace!(region = %id, ratio, "Below visibility threshold");
            return false;
        }

        match self.fire(context, id, now) {
            Ok(fired) => fired,
            Err(error) => {
                trace!(%error, "Duplicate visibility event ignored");
                false
            }
        }
    }

    fn fire<D, O>(
        &mut self,
        context: &mut PageContext<D, O>,
        id: &RegionId,
        now: Instant,
    ) -> Result<bool, PageError>
    where
        D: Document,
        O: VisibilityObserver,
    {
        let Some(state) = self.regions.get_mut(id) else {
            trace!(region = %id, "Visibility event for unregistered region");
            return Ok(false);
        };

        let payload = match state {
            RegionState::Pending {
                observed: false, ..
            } => return Ok(false),
            RegionState::Pending { payload, .. } => std::mem::take(payload),
            RegionState::Firing(_) | RegionState::Done { .. } => {
                return Err(PageError::AlreadyFired(id.clone()));
            }
        };

        context.observer.unobserve(id);
        context.document.set_text(id, "");

        let session = RevealSession::new(&payload, self.config.char_delay(), now);
        info!(region = %id, chars = session.len(), "Revealing region");

        *state = if session.is_complete() {
            RegionState::Done {
                text: String::new(),
            }
        } else {
            RegionState::Firing(session)
        };

        Ok(true)
    }

    /// Runs every step due at `now` and returns how many characters were revealed.
    pub fn advance<D: Document>(&mut self, document: &mut D, now: Instant) -> usize {
        let mut steps = 0;

        for (id, state) in &mut self.regions {
            let RegionState::Firing(session) = state else {
                continue;
            };

            while let Some(text) = session.step(now) {
                document.set_text(id, text);
                steps += 1;
            }

            if session.is_complete() {
                debug!(region = %id, "Reveal complete");
                let text = session.revealed().to_owned();
                *state = RegionState::Done { text };
            }
        }

        steps
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.regions
            .values()
            .filter_map(|state| match state {
                RegionState::Firing(session) => session.next_due(),
                _ => None,
            })
            .min()
    }

    /// Drops every reveal in flight. Nothing is written to the document afterwards.
    pub fn teardown(&mut self) {
        let mut cancelled = 0;

        for state in self.regions.values_mut() {
            if let RegionState::Firing(session) = state {
                let text = session.revealed().to_owned();
                *state = RegionState::Done { text };
                cancelled += 1;
            }
        }

        if cancelled > 0 {
            debug!(cancelled, "Cancelled reveals on teardown");
        }
    }

    pub fn is_registered(&self, id: &RegionId) -> bool {
        self.regions.contains_key(id)
    }

    pub fn has_fired(&self, id: &RegionId) -> bool {
        matches!(
            self.regions.get(id),
            Some(RegionState::Firing(_) | RegionState::Done { .. })
        )
    }

    /// Text revealed so far, `None` while the region has not fired.
    pub fn revealed(&self, id: &RegionId) -> Option<&str> {
        match self.regions.get(id)? {
            RegionState::Pending { .. } => None,
            RegionState::Firing(session) => Some(session.revealed()),
            RegionState::Done { text } => Some(text),
        }
    }

    /// No reveal is in flight.
    pub fn is_idle(&self) -> bool {
        !self
            .regions
            .values()
            .any(|state| matches!(state, RegionState::Firing(_)))
    }
}
