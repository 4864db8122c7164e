use tracing::trace;

use crate::surface::{Document, PageContext, VisibilityObserver};

/// Navigation menu on narrow screens.
#[derive(Debug, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open<D, O>(&mut self, context: &mut PageContext<D, O>)
    where
        D: Document,
        O: VisibilityObserver,
    {
        self.set(context, true);
    }

    pub fn close<D, O>(&mut self, context: &mut PageContext<D, O>)
    where
        D: Document,
        O: VisibilityObserver,
    {
        self.set(context, false);
    }

    pub fn toggle<D, O>(&mut self, context: &mut PageContext<D, O>)
    where
        D: Document,
        O: VisibilityObserver,
    {
        self.set(context, !self.open);
    }

    fn set<D, O>(&mut self, context: &mut PageContext<D, O>, open: bool)
    where
        D: Document,
        O: VisibilityObserver,
    {
        trace!(open, "Mobile menu");
        self.open = open;
        context.document.set_menu_open(open);
        context.document.set_scroll_locked(open);
    }
}
