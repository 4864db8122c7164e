//! DOM surfaces and the event wiring that feeds them.
//!
//! The dispatcher lives in a thread local. Intersection entries and clicks are
//! turned into [`PageEvent`]s, and while a reveal is in flight an animation
//! frame loop runs the steps that came due.
use std::{
    cell::{Cell, RefCell},
    fmt::Display,
};

use js_sys::{Array, Object};
use page::{
    clock::Instant,
    config::AnimatorConfig,
    dispatch::{Dispatcher, PageEvent},
    modal::{BlogView, HomelabView, ModalKind, ModalView},
    surface::{Document, PageContext, RegionId, VisibilityObserver},
};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::markup::{
    ACTIVE, BLOG_CONTENT, BLOG_LINKS, BLOG_META, BLOG_TITLE, DOCS_LABEL, GITHUB_LABEL, HEADER,
    HOMELAB_PURPOSE, HOMELAB_SERVICES, HOMELAB_TITLE, MENU_OPEN, MENU_TOGGLE, MODAL_KINDS,
    NAV_LINKS, NAV_MENU, card_event, modal_markup, visibility_event,
};

type Page = Dispatcher<BrowserDocument, BrowserObserver>;

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    static FRAME: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
    static FRAME_PENDING: Cell<bool> = const { Cell::new(false) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let config = AnimatorConfig::default();

    let observer = BrowserObserver::new(document.clone(), config.threshold)?;
    let mut page = Dispatcher::new(
        PageContext::new(BrowserDocument::new(document.clone()), observer),
        config,
    );

    for error in page.register_diagrams() {
        warn(error);
    }
    for error in page.start() {
        warn(error);
    }
    PAGE.with(|cell| *cell.borrow_mut() = Some(page));

    bind(&document)?;
    listen(&window, "pagehide", |_| {
        with_page(Page::teardown);
    })?;

    Ok(())
}

pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn write_text(&self, id: &str, text: &str) {
        if let Some(element) = self.element(id) {
            element.set_text_content(Some(text));
        }
    }

    fn create(&self, tag: &str, class: Option<&str>, text: &str) -> Result<Element, JsValue> {
        let element = self.document.create_element(tag)?;
        if let Some(class) = class {
            element.set_class_name(class);
        }
        if !text.is_empty() {
            element.set_text_content(Some(text));
        }

        Ok(element)
    }

    fn link(&self, href: &str, class: &str, label: &str) -> Result<Element, JsValue> {
        let link = self.create("a", Some(class), label)?;
        link.set_attribute("href", href)?;
        link.set_attribute("target", "_blank")?;
        link.set_attribute("rel", "noopener")?;

        Ok(link)
    }

    fn fill_homelab(&self, view: &HomelabView) -> Result<(), JsValue> {
        self.write_text(HOMELAB_TITLE, view.title);
        self.write_text(HOMELAB_PURPOSE, view.purpose);

        let Some(services) = self.element(HOMELAB_SERVICES) else {
            return Ok(());
        };

        let list = self.create("ul", None, "")?;
        for service in view.services {
            list.append_child(&self.create("li", None, service)?)?;
        }

        services.set_text_content(None);
        services.append_child(&self.create("h4", None, view.heading)?)?;
        services.append_child(&list)?;

        Ok(())
    }

    fn fill_blog(&self, view: &BlogView) -> Result<(), JsValue> {
        self.write_text(BLOG_TITLE, view.title);

        if let Some(meta) = self.element(BLOG_META) {
            let info = self.create("div", Some("blog-meta-info"), "")?;
            info.append_child(&self.create("span", Some("blog-date"), &view.date)?)?;

            let tags = self.create("div", Some("blog-modal-tags"), "")?;
            for tag in view.tags {
                tags.append_child(&self.create("span", None, tag)?)?;
            }
            info.append_child(&tags)?;

            meta.set_text_content(None);
            meta.append_child(&info)?;
        }

        if let Some(content) = self.element(BLOG_CONTENT) {
            content.set_inner_html(view.content);
        }

        if let Some(links) = self.element(BLOG_LINKS) {
            let actions = self.create("div", Some("blog-action-links"), "")?;
            actions.append_child(&self.link(view.github, "blog-link github-link", GITHUB_LABEL)?)?;
            if let Some(docs) = view.docs {
                actions.append_child(&self.link(docs, "blog-link docs-link", DOCS_LABEL)?)?;
            }

            links.set_text_content(None);
            links.append_child(&actions)?;
        }

        Ok(())
    }
}

impl Document for BrowserDocument {
    fn has_region(&self, id: &RegionId) -> bool {
        self.element(id.as_str()).is_some()
    }

    fn set_text(&mut self, id: &RegionId, text: &str) {
        self.write_text(id.as_str(), text);
    }

    fn set_menu_open(&mut self, open: bool) {
        for id in [NAV_MENU, MENU_TOGGLE] {
            if let Some(element) = self.element(id) {
                set_class(&element, ACTIVE, open);
            }
        }

        match self.document.query_selector(HEADER) {
            Ok(Some(header)) => set_class(&header, MENU_OPEN, open),
            Ok(None) => {}
            Err(error) => warn(format_args!("Failed to find header: {error:?}")),
        }
    }

    fn show_modal(&mut self, view: &ModalView) {
        let filled = match view {
            ModalView::Homelab(view) => self.fill_homelab(view),
            ModalView::Blog(view) => self.fill_blog(view),
        };
        if let Err(error) = filled {
            warn(format_args!("Failed to fill {}: {error:?}", view.title()));
        }

        if let Some(dialog) = self.element(modal_markup(view.kind()).dialog) {
            set_class(&dialog, ACTIVE, true);
        }
    }

    fn hide_modal(&mut self, kind: ModalKind) {
        if let Some(dialog) = self.element(modal_markup(kind).dialog) {
            set_class(&dialog, ACTIVE, false);
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        let Some(body) = self.document.body() else {
            return;
        };

        let overflow = if locked { "hidden" } else { "" };
        if let Err(error) = body.style().set_property("overflow", overflow) {
            warn(format_args!("Failed to set scroll lock: {error:?}"));
        }
    }
}

pub struct BrowserObserver {
    document: web_sys::Document,
    observer: IntersectionObserver,
}

impl BrowserObserver {
    pub fn new(document: web_sys::Document, threshold: f64) -> Result<Self, JsValue> {
        Ok(Self {
            document,
            observer: visibility_observer(threshold)?,
        })
    }
}

impl VisibilityObserver for BrowserObserver {
    fn observe(&mut self, id: &RegionId) {
        if let Some(element) = self.document.get_element_by_id(id.as_str()) {
            self.observer.observe(&element);
        }
    }

    fn unobserve(&mut self, id: &RegionId) {
        if let Some(element) = self.document.get_element_by_id(id.as_str()) {
            self.observer.unobserve(&element);
        }
    }
}

fn visibility_observer(threshold: f64) -> Result<IntersectionObserver, JsValue> {
    let callback = Closure::<dyn FnMut(Array)>::new(|entries: Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };

            dispatch(visibility_event(
                &entry.target().id(),
                entry.is_intersecting(),
                entry.intersection_ratio(),
            ));
        }
    });

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    Ok(observer)
}

fn bind(document: &web_sys::Document) -> Result<(), JsValue> {
    if let Some(toggle) = document.get_element_by_id(MENU_TOGGLE) {
        listen(&toggle, "click", |_| dispatch(PageEvent::MenuToggled))?;
    }
    for link in elements(document, NAV_LINKS)? {
        listen(&link, "click", |_| dispatch(PageEvent::NavLinkClicked))?;
    }

    for kind in MODAL_KINDS {
        let ids = modal_markup(kind);

        for card in elements(document, ids.cards)? {
            let Some(key) = card.get_attribute(ids.card_key) else {
                continue;
            };
            listen(&card, "click", move |_| dispatch(card_event(kind, key.as_str())))?;
        }

        for button in elements(document, ids.close_button)? {
            listen(&button, "click", move |_| {
                dispatch(PageEvent::ModalClosed { kind });
            })?;
        }

        // Clicks on the backdrop, not on the dialog content.
        if let Some(dialog) = document.get_element_by_id(ids.dialog) {
            let backdrop = dialog.clone();
            listen(&dialog, "click", move |event: Event| {
                if event
                    .target()
                    .is_some_and(|target| Object::is(&target, &backdrop))
                {
                    dispatch(PageEvent::ModalClosed { kind });
                }
            })?;
        }
    }

    Ok(())
}

fn dispatch(event: PageEvent) {
    with_page(|page| page.dispatch(event, Instant::now()));
    schedule_frame();
}

fn with_page<R>(f: impl FnOnce(&mut Page) -> R) -> Option<R> {
    PAGE.with(|cell| {
        let mut page = cell.try_borrow_mut().ok()?;
        page.as_mut().map(f)
    })
}

/// Requests an animation frame if a reveal step is pending and none is requested yet.
fn schedule_frame() {
    if FRAME_PENDING.get() || with_page(|page| page.next_deadline()).flatten().is_none() {
        return;
    }

    let Some(window) = web_sys::window() else {
        return;
    };

    FRAME.with(|frame| {
        let mut frame = frame.borrow_mut();
        let callback = frame.get_or_insert_with(|| Closure::new(on_frame));

        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(_) => FRAME_PENDING.set(true),
            Err(error) => warn(format_args!("Failed to request animation frame: {error:?}")),
        }
    });
}

fn on_frame() {
    FRAME_PENDING.set(false);
    with_page(|page| page.tick(Instant::now()));
    schedule_frame();
}

fn elements(document: &web_sys::Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;

    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(error) = element.class_list().toggle_with_force(class, on) {
        warn(format_args!("Failed to toggle {class}: {error:?}"));
    }
}

fn warn(message: impl Display) {
    web_sys::console::warn_1(&JsValue::from_str(&message.to_string()));
}
