pub mod admin;
pub mod api;
pub mod dom;
pub mod error;
pub mod home;
pub mod markup;
pub mod story;
pub mod submit;
pub mod view_model;

use wasm_bindgen::prelude::*;

use crate::api::Api;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(contents: &str);
}

fn init_hooks() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

/// Entry point for the public listing page.
#[wasm_bindgen]
pub fn bootstrap_home() {
    init_hooks();
    home::init(Api::from_window());
}

/// Entry point for the story submission page.
#[wasm_bindgen]
pub fn bootstrap_submit() {
    init_hooks();
    submit::init(Api::from_window());
}

/// Entry point for the admin moderation page.
#[wasm_bindgen]
pub fn bootstrap_admin() {
    init_hooks();
    admin::init(Api::from_window());
}
