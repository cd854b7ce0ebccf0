//! Story submission page: serialize the form, POST it as multipart data,
//! report the outcome inline.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, FormData, HtmlElement, HtmlFormElement};

use crate::api::Api;
use crate::dom::{self, MessageKind};
use crate::log;

pub const FORM_ID: &str = "add-story-form";
pub const MESSAGE_REGION_ID: &str = "add-message";

pub const PUBLISHING_TEXT: &str = "Publishing your story...";
pub const PUBLISHED_TEXT: &str = "Story published successfully! 🎉";
pub const PUBLISH_FAILED_TEXT: &str = "Unable to publish story";

pub fn init(api: Api) {
    let api = Rc::new(api);
    let form = dom::element(FORM_ID);

    let onsubmit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let api = api.clone();
        spawn_local(async move {
            handle_submit(&api).await;
        });
    });

    form.dyn_ref::<HtmlElement>()
        .expect("submission form is not an html element")
        .set_onsubmit(Some(onsubmit.as_ref().unchecked_ref()));
    onsubmit.forget();
}

async fn handle_submit(api: &Api) {
    let message = dom::element(MESSAGE_REGION_ID);
    let form: HtmlFormElement = dom::element(FORM_ID)
        .dyn_into()
        .expect("submission form is not a form element");

    dom::set_message(&message, MessageKind::Success, PUBLISHING_TEXT);

    let data = FormData::new_with_form(&form).expect("could not read submission form fields");
    match api.create_story(&data).await {
        Ok(()) => {
            form.reset();
            dom::set_message(&message, MessageKind::Success, PUBLISHED_TEXT);
        }
        Err(err) => {
            log(&format!("story submission failed: {err}"));
            dom::set_message(
                &message,
                MessageKind::Error,
                &err.user_message(PUBLISH_FAILED_TEXT),
            );
        }
    }
}
