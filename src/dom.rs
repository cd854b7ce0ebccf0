//! DOM plumbing shared by the page controllers. Element identifiers are
//! fixed integration points with the page markup, so a failed lookup is
//! a broken page and panics with the element name.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Storage, Window};

use crate::markup::{self, SafeHtml};

pub fn window() -> Window {
    web_sys::window().expect("could not get window")
}

pub fn document() -> Document {
    window().document().expect("could not get document")
}

pub fn element(id: &str) -> Element {
    document()
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("missing element #{id}"))
}

pub fn session_storage() -> Storage {
    window()
        .session_storage()
        .expect("could not access session storage")
        .expect("session storage unavailable")
}

/// Styling applied to an inline message region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    fn class(self) -> &'static str {
        match self {
            MessageKind::Success => "success-message",
            MessageKind::Error => "error-message",
        }
    }
}

/// Replaces a message region with a single message block. Replacing, not
/// appending, keeps exactly one message visible after any attempt.
pub fn set_message(region: &Element, kind: MessageKind, text: &str) {
    set_html(region, &markup::message_block(kind.class(), text));
}

pub fn clear(region: &Element) {
    region.set_inner_html("");
}

pub fn set_html(target: &Element, html: &SafeHtml) {
    target.set_inner_html(html.as_str());
}

pub fn set_hidden(el: &Element, hidden: bool) {
    el.class_list()
        .toggle_with_force("hidden", hidden)
        .expect("could not toggle hidden class");
}

/// Locale-aware "May 1, 2024" form of the backend's timestamp string.
/// `None` (legacy rows without a timestamp) renders as an empty string.
pub fn format_story_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let date = js_sys::Date::new(&JsValue::from_str(raw));
    let options = js_sys::Object::new();
    for (key, value) in [("year", "numeric"), ("month", "short"), ("day", "numeric")] {
        js_sys::Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value))
            .expect("could not build date format options");
    }
    String::from(date.to_locale_date_string("default", &options))
}
