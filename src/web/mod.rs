//! Browser entry point (wasm32 only).
//!
//! Implements every port over `web-sys` and wires DOM events to the three
//! controllers once the document is ready.
//!
//! - `dom`: [`WebDom`]
//! - `storage`: [`LocalStorage`]
//! - `fetch`: [`BrowserFetch`]
//! - `timer`: [`BrowserSleeper`], [`BrowserScheduler`]

pub mod dom;
pub mod fetch;
pub mod storage;
pub mod timer;

pub use dom::WebDom;
pub use fetch::BrowserFetch;
pub use storage::LocalStorage;
pub use timer::{BrowserScheduler, BrowserSleeper};

use crate::app::ListController;
use crate::dom::Dom;
use crate::drag::{DragController, PointerInteraction, ZoneEvent};
use crate::nav::spy::THRESHOLD;
use crate::nav::{has_navigation, NavController, SectionVisibility};
use crate::observability::{init_tracing, ConsoleSink};
use crate::schedule::Debouncer;
use crate::{resolve_theme, Config, Theme};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, EventTarget, HtmlInputElement, HtmlSelectElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
};

type Shared<T> = Rc<RefCell<T>>;

/// Best-effort text for a thrown JS value.
pub(crate) fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Module start: boots immediately if the DOM is parsed, otherwise on
/// `DOMContentLoaded`.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let dom = WebDom::new(window, document.clone());

    if document.ready_state() == "loading" {
        let callback = Closure::once_into_js(move || boot(&dom));
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
    } else {
        boot(&dom);
    }
    Ok(())
}

fn boot(dom: &WebDom) {
    let config = dom
        .query(None, ".blog-list")
        .map(|container| Config::from_dataset(&dataset(&container)))
        .unwrap_or_default();
    init_tracing(&config, Arc::new(ConsoleSink));
    tracing::info!(api_url = %config.api_url, "blogfront starting");

    let theme = resolve_theme(&config);

    for container in dom.query_all(None, ".blog-list") {
        start_list(dom, container, &config, &theme);
    }
    start_drag(dom, &theme);
    if has_navigation(dom) {
        start_nav(dom, &config, &theme);
    } else {
        tracing::debug!("no navigation on page");
    }
}

/// `data-*` attributes of `element`, keyed the way `dataset` exposes them.
fn dataset(element: &Element) -> BTreeMap<String, String> {
    element
        .get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| {
            let key = camel_case(name.strip_prefix("data-")?);
            let value = element.get_attribute(&name)?;
            Some((key, value))
        })
        .collect()
}

fn camel_case(kebab: &str) -> String {
    let mut out = String::with_capacity(kebab.len());
    let mut upper = false;
    for c in kebab.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn listen<F>(target: &EventTarget, kind: &str, handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        tracing::warn!(kind, error = %js_error_message(&e), "failed to add listener");
    }
    closure.forget();
}

fn start_list(dom: &WebDom, container: Element, config: &Config, theme: &Theme) {
    let controller = Rc::new(RefCell::new(ListController::new(
        dom.clone(),
        container,
        config.view_options(),
        config.load_request(),
        theme.clone(),
    )));
    let window = dom.window().clone();
    let debounce_ms = config.search_debounce_ms;

    wasm_bindgen_futures::spawn_local(async move {
        controller.borrow_mut().begin();
        let request = controller.borrow().request().clone();
        let result = request
            .run(
                LocalStorage::new(&window),
                &BrowserFetch::new(window.clone()),
                &BrowserSleeper,
            )
            .await;

        if controller.borrow_mut().complete(result) {
            bind_list_controls(&controller, debounce_ms);
        }
    });
}

fn bind_list_controls(controller: &Shared<ListController<WebDom>>, debounce_ms: u32) {
    let Some(controls) = controller.borrow().controls().cloned() else {
        return;
    };

    if let Some(sort) = &controls.sort {
        let controller = Rc::clone(controller);
        listen(sort, "change", move |event| {
            if let Some(value) = select_value(&event) {
                controller.borrow_mut().on_sort_change(&value);
            }
        });
    }

    if let Some(filter) = &controls.filter {
        let controller = Rc::clone(controller);
        listen(filter, "change", move |event| {
            if let Some(value) = select_value(&event) {
                controller.borrow_mut().on_filter_change(&value);
            }
        });
    }

    if let Some(search) = &controls.search {
        let controller = Rc::clone(controller);
        let mut debouncer = Debouncer::new(BrowserScheduler, debounce_ms);
        listen(search, "input", move |event| {
            let Some(value) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
            else {
                return;
            };
            let controller = Rc::clone(&controller);
            debouncer.call(move || controller.borrow_mut().on_search_input(&value));
        });
    }
}

fn select_value(event: &web_sys::Event) -> Option<String> {
    event
        .target()
        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
        .map(|select| select.value())
}

fn start_drag(dom: &WebDom, theme: &Theme) {
    let drag = Rc::new(RefCell::new(DragController::new(dom.clone(), theme.drag.clone())));
    let (items, zones) = drag.borrow_mut().bind();
    if items == 0 && zones == 0 {
        return;
    }

    let items = drag.borrow().items().to_vec();
    for item in items {
        for kind in ["dragstart", "dragend", "touchstart", "touchend"] {
            let drag = Rc::clone(&drag);
            let node = item.clone();
            listen(&item, kind, move |_| {
                if let Some(interaction) = PointerInteraction::from_item_event(kind) {
                    drag.borrow_mut().on_item(&node, interaction);
                }
            });
        }
    }

    let zones = drag.borrow().zones().to_vec();
    for zone in zones {
        for kind in ["dragover", "dragleave", "drop", "touchend"] {
            let drag = Rc::clone(&drag);
            let node = zone.clone();
            listen(&zone, kind, move |event| {
                if matches!(kind, "dragover" | "drop") {
                    event.prevent_default();
                }
                if let Some(zone_event) = ZoneEvent::from_zone_event(kind) {
                    drag.borrow_mut().on_zone(&node, zone_event);
                }
            });
        }
    }
}

fn start_nav(dom: &WebDom, config: &Config, theme: &Theme) {
    let nav = Rc::new(RefCell::new(NavController::new(
        dom.clone(),
        theme,
        config.header_offset_px,
    )));

    let links = nav.borrow().links().to_vec();
    for link in links {
        let click_nav = Rc::clone(&nav);
        let node = link.clone();
        listen(&link, "click", move |event| {
            if click_nav.borrow_mut().on_link_click(&node) {
                event.prevent_default();
            }
        });

        let key_nav = Rc::clone(&nav);
        listen(&link, "keydown", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                if key_nav.borrow_mut().on_link_keydown(&key) {
                    event.prevent_default();
                }
            }
        });
    }

    if let Some(toggle) = nav.borrow().toggle().cloned() {
        let nav = Rc::clone(&nav);
        listen(&toggle, "click", move |_| nav.borrow_mut().on_toggle());
    }

    {
        let nav = Rc::clone(&nav);
        listen(dom.document(), "keydown", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                nav.borrow_mut().on_document_keydown(&key);
            }
        });
    }

    if let Err(e) = observe_sections(&nav) {
        tracing::warn!(error = %js_error_message(&e), "scroll spy unavailable");
    }
}

fn observe_sections(nav: &Shared<NavController<WebDom>>) -> Result<(), JsValue> {
    let sections = nav.borrow().sections().to_vec();
    if sections.is_empty() {
        return Ok(());
    }

    let spy_nav = Rc::clone(nav);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let batch: Vec<SectionVisibility> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| SectionVisibility {
                    id: entry.target().id(),
                    is_intersecting: entry.is_intersecting(),
                })
                .collect();
            spy_nav.borrow_mut().on_visibility_changes(&batch);
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(&nav.borrow().root_margin().to_css());
    options.set_threshold(&JsValue::from_f64(THRESHOLD));

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for section in &sections {
        observer.observe(section);
    }
    callback.forget();
    Ok(())
}
