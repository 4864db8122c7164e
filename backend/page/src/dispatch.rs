//! # Dispatcher
//!
//! Single owner of the page components. Hosts translate their native callbacks
//! (intersection observer entries, clicks) into [`PageEvent`]s and either call
//! [`Dispatcher::dispatch`] and [`Dispatcher::tick`] directly, or, outside the
//! browser, feed a channel into `Dispatcher::run`.
//!
//! The run loop waits on whichever comes first, the next event or the next due
//! reveal step, so there is exactly one pending timer and nothing ever blocks.
//! Closing the channel means the page went away: the loop stops and every
//! reveal in flight is dropped.
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use tokio::{sync::mpsc::Receiver, time::sleep_until};
use tracing::{info, warn};

use crate::{
    animator::{Animator, Registration},
    clock::Instant,
    config::AnimatorConfig,
    content::DIAGRAMS,
    error::PageError,
    menu::MobileMenu,
    modal::{ModalController, ModalKind},
    surface::{Document, PageContext, RegionId, VisibilityObserver},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    RegionVisible {
        id: RegionId,
        visible: bool,
        ratio: f64,
    },
    CardClicked {
        kind: ModalKind,
        id: String,
    },
    /// Close button or a click on the modal backdrop.
    ModalClosed {
        kind: ModalKind,
    },
    MenuToggled,
    NavLinkClicked,
}

pub struct Dispatcher<D, O> {
    context: PageContext<D, O>,
    animator: Animator,
    modals: ModalController,
    menu: MobileMenu,
}

impl<D, O> Dispatcher<D, O>
where
    D: Document,
    O: VisibilityObserver,
{
    pub fn new(context: PageContext<D, O>, config: AnimatorConfig) -> Self {
        Self {
            context,
            animator: Animator::new(config),
            modals: ModalController::default(),
            menu: MobileMenu::default(),
        }
    }

    pub fn context(&self) -> &PageContext<D, O> {
        &self.context
    }

    pub fn into_context(self) -> PageContext<D, O> {
        self.context
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn modals(&self) -> &ModalController {
        &self.modals
    }

    pub fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    pub fn register(
        &mut self,
        id: RegionId,
        payload: impl Into<String>,
    ) -> Result<Registration, PageError> {
        self.animator.register(&self.context.document, id, payload)
    }

    /// Registers every built-in diagram, skipping the ones the document lacks.
    pub fn register_diagrams(&mut self) -> Vec<PageError> {
        DIAGRAMS
            .iter()
            .filter_map(|diagram| {
                self.register(RegionId::new(diagram.region), diagram.text)
                    .err()
            })
            .collect()
    }

    #[must_use]
    pub fn start(&mut self) -> Vec<PageError> {
        self.animator.start(&mut self.context)
    }

    pub fn dispatch(&mut self, event: PageEvent, now: Instant) {
        match event {
            PageEvent::RegionVisible { id, visible, ratio } => {
                self.animator
                    .on_visibility_change(&mut self.context, &id, visible, ratio, now);
            }
            PageEvent::CardClicked { kind, id } => {
                if let Err(error) = self.modals.open_card(&mut self.context, kind, &id) {
                    warn!(%error, "Failed to open modal");
                }
            }
            PageEvent::ModalClosed { kind } => {
                self.modals.close(&mut self.context, kind);
            }
            PageEvent::MenuToggled => self.menu.toggle(&mut self.context),
            PageEvent::NavLinkClicked => self.menu.close(&mut self.context),
        }
    }

    /// Runs the reveal steps due at `now`.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.animator.advance(&mut self.context.document, now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.animator.next_deadline()
    }

    /// The page went away. Reveals in flight stop where they are.
    pub fn teardown(&mut self) {
        self.animator.teardown();
        info!("Page torn down");
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub async fn run(mut self, mut events: Receiver<PageEvent>) -> Self {
        info!("Page event loop started");

        loop {
            let deadline = self.animator.next_deadline();

            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.dispatch(event, Instant::now()),
                    None => break,
                },
                () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.tick(Instant::now());
                }
            }
        }

        self.teardown();

        self
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tokio::{sync::mpsc, time::sleep};

    use super::*;
    use crate::{
        memory::{MemoryDocument, MemoryObserver},
        modal::ModalView,
    };

    fn dispatcher(ids: &[&str]) -> Dispatcher<MemoryDocument, MemoryObserver> {
        Dispatcher::new(
            PageContext::new(MemoryDocument::with_regions(ids), MemoryObserver::default()),
            AnimatorConfig::default(),
        )
    }

    fn visible(id: &str, ratio: f64) -> PageEvent {
        PageEvent::RegionVisible {
            id: RegionId::new(id),
            visible: true,
            ratio,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn run_loop_reveals_at_configured_cadence() {
        let id = RegionId::new("diagram-current");
        let mut page = dispatcher(&["diagram-current"]);
        page.register(id.clone(), "A->B").unwrap();
        assert!(page.start().is_empty());

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(page.run(rx));

        tx.send(visible("diagram-current", 0.5)).await.unwrap();
        sleep(Duration::from_millis(40)).await;
        tx.send(visible("diagram-current", 0.9)).await.unwrap();
        sleep(Duration::from_millis(40)).await;
        drop(tx);

        let page = handle.await.unwrap();
        assert_eq!(
            page.context().document.history(&id),
            ["", "A", "A-", "A->", "A->B"]
        );
        assert!(page.animator().has_fired(&id));
    }

    #[tokio::test(start_paused = true)]
    async fn closing_the_channel_cancels_pending_steps() {
        let id = RegionId::new("diagram-current");
        let mut page = dispatcher(&["diagram-current"]);
        page.register(id.clone(), "A->B").unwrap();
        assert!(page.start().is_empty());

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(page.run(rx));

        tx.send(visible("diagram-current", 0.5)).await.unwrap();
        sleep(Duration::from_millis(20)).await;
        drop(tx);

        let page = handle.await.unwrap();
        assert_eq!(page.context().document.history(&id), ["", "A", "A-"]);
        assert!(page.animator().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_cadence_is_respected() {
        let id = RegionId::new("a");
        let mut page = Dispatcher::new(
            PageContext::new(MemoryDocument::with_regions(["a"]), MemoryObserver::default()),
            AnimatorConfig::default().with_char_delay_ms(100),
        );
        page.register(id.clone(), "abc").unwrap();
        assert!(page.start().is_empty());

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(page.run(rx));

        tx.send(visible("a", 1.0)).await.unwrap();
        sleep(Duration::from_millis(150)).await;
        drop(tx);

        let page = handle.await.unwrap();
        assert_eq!(page.context().document.history(&id), ["", "a"]);
    }

    #[test]
    fn cards_and_menu_are_routed() {
        let mut page = dispatcher(&[]);
        let now = Instant::now();

        page.dispatch(
            PageEvent::CardClicked {
                kind: ModalKind::Homelab,
                id: "phoenix-future".into(),
            },
            now,
        );
        assert_eq!(
            page.context().document.modal.as_ref().map(ModalView::title),
            Some("Phoenix 2.0")
        );

        page.dispatch(
            PageEvent::ModalClosed {
                kind: ModalKind::Homelab,
            },
            now,
        );
        assert_eq!(page.context().document.modal, None);
        assert_eq!(page.modals().open(), None);

        page.dispatch(PageEvent::MenuToggled, now);
        assert!(page.menu().is_open());

        page.dispatch(PageEvent::NavLinkClicked, now);
        assert!(!page.menu().is_open());
        assert!(!page.context().document.menu_open);
    }

    #[test]
    fn teardown_freezes_reveals_in_flight() {
        let id = RegionId::new("diagram-current");
        let mut page = dispatcher(&["diagram-current"]);
        page.register(id.clone(), "A->B").unwrap();
        assert!(page.start().is_empty());

        let t0 = Instant::now();
        page.dispatch(visible("diagram-current", 0.5), t0);
        page.tick(t0 + Duration::from_millis(8));
        assert!(page.next_deadline().is_some());

        page.teardown();

        assert_eq!(page.next_deadline(), None);
        assert_eq!(page.tick(t0 + Duration::from_secs(1)), 0);
        assert_eq!(page.context().document.text(&id), Some("A"));
    }

    #[test]
    fn built_in_diagrams_skip_missing_regions() {
        let mut page = dispatcher(&["diagram-current"]);

        assert_eq!(
            page.register_diagrams(),
            vec![PageError::RegionNotFound(RegionId::new("diagram-future"))]
        );
        assert!(page.animator().is_registered(&RegionId::new("diagram-current")));
    }

    #[test]
    fn events_deserialize_from_host_messages() {
        let event: PageEvent = serde_json::from_str(
            r#"{"type":"region_visible","id":"diagram-current","visible":true,"ratio":0.4}"#,
        )
        .unwrap();
        assert_eq!(event, visible("diagram-current", 0.4));

        let event: PageEvent =
            serde_json::from_str(r#"{"type":"card_clicked","kind":"blog","id":"proxmox-setup"}"#)
                .unwrap();
        assert_eq!(
            event,
            PageEvent::CardClicked {
                kind: ModalKind::Blog,
                id: "proxmox-setup".into(),
            }
        );
    }
}
