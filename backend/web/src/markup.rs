//! Element ids, classes and attributes of `public/index.html` that the binding
//! reads or toggles, and the mapping from DOM callbacks to [`PageEvent`]s.
use page::{dispatch::PageEvent, modal::ModalKind, surface::RegionId};

/// Class that shows the nav menu, the hamburger cross and an open modal.
pub const ACTIVE: &str = "active";
/// Class set on the header while the mobile menu is open.
pub const MENU_OPEN: &str = "menu-open";

pub const HEADER: &str = ".header";
pub const MENU_TOGGLE: &str = "mobile-menu-toggle";
pub const NAV_MENU: &str = "nav-menu";
pub const NAV_LINKS: &str = "#nav-menu a";

pub const HOMELAB_TITLE: &str = "modal-title";
pub const HOMELAB_PURPOSE: &str = "modal-purpose";
pub const HOMELAB_SERVICES: &str = "modal-services";

pub const BLOG_TITLE: &str = "blog-modal-title";
pub const BLOG_META: &str = "blog-modal-meta";
pub const BLOG_CONTENT: &str = "blog-modal-content";
pub const BLOG_LINKS: &str = "blog-modal-links";

pub const GITHUB_LABEL: &str = "View on GitHub";
pub const DOCS_LABEL: &str = "Read Full Documentation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalMarkup {
    /// Id of the dialog, also the backdrop that closes it.
    pub dialog: &'static str,
    pub close_button: &'static str,
    pub cards: &'static str,
    /// Card attribute holding the content table key.
    pub card_key: &'static str,
}

pub const fn modal_markup(kind: ModalKind) -> ModalMarkup {
    match kind {
        ModalKind::Homelab => ModalMarkup {
            dialog: "homelab-modal",
            close_button: ".modal-close",
            cards: ".homelab-card",
            card_key: "data-node",
        },
        ModalKind::Blog => ModalMarkup {
            dialog: "blog-modal",
            close_button: ".blog-modal-close",
            cards: ".blog-card",
            card_key: "data-post",
        },
    }
}

pub const MODAL_KINDS: [ModalKind; 2] = [ModalKind::Homelab, ModalKind::Blog];

/// An intersection observer entry for the element with id `target`.
pub fn visibility_event(target: &str, is_intersecting: bool, ratio: f64) -> PageEvent {
    PageEvent::RegionVisible {
        id: RegionId::new(target),
        visible: is_intersecting,
        ratio,
    }
}

pub fn card_event(kind: ModalKind, key: impl Into<String>) -> PageEvent {
    PageEvent::CardClicked {
        kind,
        id: key.into(),
    }
}
