use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, Event, HtmlAnchorElement, HtmlElement, Node, ScrollBehavior, ScrollToOptions};
use yew::NodeRef;

use crate::error::SiteError;
use crate::navigation::scroll_target;

const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 720.0);

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

fn pixels(value: Result<JsValue, JsValue>, fallback: f64) -> f64 {
    value.ok().and_then(|value| value.as_f64()).unwrap_or(fallback)
}

pub fn viewport_size() -> (f64, f64) {
    match window() {
        Some(win) => (
            pixels(win.inner_width(), FALLBACK_VIEWPORT.0),
            pixels(win.inner_height(), FALLBACK_VIEWPORT.1),
        ),
        None => FALLBACK_VIEWPORT,
    }
}

fn media_matches(query: &str) -> bool {
    window()
        .and_then(|win| win.match_media(query).ok().flatten())
        .is_some_and(|list| list.matches())
}

pub fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

pub fn location_href() -> Option<String> {
    window()?.location().href().ok()
}

pub fn set_body_overflow(value: &str) {
    if let Some(body) = body() {
        let _ = body.style().set_property("overflow", value);
    }
}

/// Smooth-scrolls so the section sits just below the fixed header.
pub fn scroll_to_section(section_id: &str, header_offset: f64) -> bool {
    let Some(win) = window() else {
        return false;
    };
    let Some(section) = document()
        .and_then(|d| d.get_element_by_id(section_id))
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return false;
    };

    let options = ScrollToOptions::new();
    options.set_top(scroll_target(f64::from(section.offset_top()), header_offset));
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
    true
}

pub fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// True when the event was dispatched on the referenced element itself rather
/// than one of its children.
pub fn is_event_on(event: &Event, node: &NodeRef) -> bool {
    let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
    target.is_some() && target == node.get()
}

pub fn has_property(target: &JsValue, name: &str) -> bool {
    Reflect::get(target, &JsValue::from_str(name))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}

/// Saves `href` under `filename` through a temporary download link.
pub fn trigger_download(href: &str, filename: &str) -> Result<(), SiteError> {
    let document = document().ok_or_else(|| SiteError::MissingElement("document".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| SiteError::MissingElement("body".to_string()))?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(JsValue::from)?;
    anchor.set_href(href);
    anchor.set_download(filename);
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Ok(())
}

pub fn alert(message: &str) {
    if let Some(win) = window() {
        let _ = win.alert_with_message(message);
    }
}
