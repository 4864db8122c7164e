use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    content::{self, BlogPost, HomelabNode},
    error::PageError,
    surface::{Document, PageContext, VisibilityObserver},
};

pub const SERVICES_HEADING: &str = "⚡ Services & Features";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalKind {
    Homelab,
    Blog,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomelabView {
    pub title: &'static str,
    pub purpose: &'static str,
    pub heading: &'static str,
    pub services: &'static [&'static str],
}

impl From<&'static HomelabNode> for HomelabView {
    fn from(node: &'static HomelabNode) -> Self {
        Self {
            title: node.title,
            purpose: node.purpose,
            heading: SERVICES_HEADING,
            services: node.services,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogView {
    pub title: &'static str,
    pub badge: &'static str,
    /// Long form, e.g. "January 15, 2025".
    pub date: String,
    pub tags: &'static [&'static str],
    pub content: &'static str,
    pub github: &'static str,
    pub docs: Option<&'static str>,
}

impl TryFrom<&'static BlogPost> for BlogView {
    type Error = PageError;

    fn try_from(post: &'static BlogPost) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(post.date, "%Y-%m-%d").map_err(|source| {
            PageError::InvalidDate {
                post: post.id.to_owned(),
                source,
            }
        })?;

        Ok(Self {
            title: post.title,
            badge: post.badge,
            date: date.format("%B %-d, %Y").to_string(),
            tags: post.tags,
            content: post.content,
            github: post.github,
            docs: (post.docs != "#").then_some(post.docs),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalView {
    Homelab(HomelabView),
    Blog(BlogView),
}

impl ModalView {
    pub fn kind(&self) -> ModalKind {
        match self {
            ModalView::Homelab(_) => ModalKind::Homelab,
            ModalView::Blog(_) => ModalKind::Blog,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ModalView::Homelab(view) => view.title,
            ModalView::Blog(view) => view.title,
        }
    }
}

/// Homelab and blog dialogs. At most one is open at a time.
#[derive(Debug, Default)]
pub struct ModalController {
    open: Option<ModalKind>,
}

impl ModalController {
    pub fn open(&self) -> Option<ModalKind> {
        self.open
    }

    /// Returns `Ok(false)` for cards with no entry in the content tables.
    pub fn open_card<D, O>(
        &mut self,
        context: &mut PageContext<D, O>,
        kind: ModalKind,
        id: &str,
    ) -> Result<bool, PageError>
    where
        D: Document,
        O: VisibilityObserver,
    {
        let view = match kind {
            ModalKind::Homelab => content::homelab_node(id)
                .map(HomelabView::from)
                .map(ModalView::Homelab),
            ModalKind::Blog => content::blog_post(id)
                .map(BlogView::try_from)
                .transpose()?
                .map(ModalView::Blog),
        };

        let Some(view) = view else {
            debug!(?kind, id, "No content for card");
            return Ok(false);
        };

        if let Some(previous) = self.open.take() {
            context.document.hide_modal(previous);
        }

        debug!(?kind, id, "Opening modal");
        context.document.show_modal(&view);
        context.document.set_scroll_locked(true);
        self.open = Some(kind);

        Ok(true)
    }

    pub fn close<D, O>(&mut self, context: &mut PageContext<D, O>, kind: ModalKind) -> bool
    where
        D: Document,
        O: VisibilityObserver,
    {
        if self.open != Some(kind) {
            return false;
        }

        context.document.hide_modal(kind);
        context.document.set_scroll_locked(false);
        self.open = None;

        true
    }
}
