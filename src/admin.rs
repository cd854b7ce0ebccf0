//! Admin moderation page. Login state is an explicit tagged union so
//! every transition is matched exhaustively instead of being implied by
//! panel visibility.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement};

use crate::api::Api;
use crate::dom::{self, MessageKind};
use crate::log;
use crate::markup::SafeHtml;
use crate::story::{AdminCredentials, Story};

pub const LOGIN_FORM_ID: &str = "admin-login-form";
pub const USERNAME_INPUT_ID: &str = "admin_username";
pub const PASSWORD_INPUT_ID: &str = "admin_password";
pub const MESSAGE_REGION_ID: &str = "admin-message";
pub const STORIES_CONTAINER_ID: &str = "admin-stories";
pub const LOGIN_PANEL_ID: &str = "admin-login";
pub const ADMIN_PANEL_ID: &str = "admin-panel";
pub const LOGOUT_BUTTON_ID: &str = "logout-btn";

pub const CREDENTIALS_STORAGE_KEY: &str = "adminCredentials";

pub const LOGIN_OK_TEXT: &str = "Login successful.";
pub const LOGIN_FAILED_TEXT: &str = "Invalid credentials";
pub const LOADING_TEXT: &str = "Loading stories...";
pub const EMPTY_TEXT: &str = "No stories submitted yet.";
pub const LOAD_FAILED_TEXT: &str = "Unable to load stories right now.";
pub const LOGGED_OUT_TEXT: &str = "No stories to show.";
pub const CONFIRM_DELETE_TEXT: &str = "Delete this story permanently?";
pub const DELETE_FAILED_TEXT: &str = "Unable to delete story";

/// The admin page's whole state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminState {
    LoggedOut,
    LoggedIn(AdminCredentials),
}

impl AdminState {
    /// Rebuilds the state from the session-stored JSON pair, if any.
    /// Anything unparseable falls back to `LoggedOut`.
    pub fn restore(stored: Option<&str>) -> Self {
        stored
            .and_then(|raw| serde_json::from_str::<AdminCredentials>(raw).ok())
            .map(AdminState::LoggedIn)
            .unwrap_or(AdminState::LoggedOut)
    }

    pub fn credentials(&self) -> Option<&AdminCredentials> {
        match self {
            AdminState::LoggedIn(credentials) => Some(credentials),
            AdminState::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials().is_some()
    }
}

/// What a delete attempt amounted to; side effects (confirm prompt,
/// list reload, alert) have already happened by the time this returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No credential pair held, no request was made.
    NotAuthorized,
    /// The user declined the confirmation prompt.
    Cancelled,
    Deleted,
    Failed,
}

pub struct AdminController {
    api: Api,
    state: RefCell<AdminState>,
}

pub fn init(api: Api) {
    let stored = dom::session_storage()
        .get_item(CREDENTIALS_STORAGE_KEY)
        .expect("could not read session storage");
    let controller = AdminController::new(api, AdminState::restore(stored.as_deref()));

    wire_login_form(&controller);
    wire_logout_button(&controller);

    if controller.state.borrow().is_logged_in() {
        toggle_panels(true);
        let controller = controller.clone();
        spawn_local(async move {
            controller.load_stories().await;
        });
    }
}

impl AdminController {
    pub fn new(api: Api, state: AdminState) -> Rc<Self> {
        Rc::new(AdminController {
            api,
            state: RefCell::new(state),
        })
    }

    async fn handle_login(self: &Rc<Self>) {
        let message = dom::element(MESSAGE_REGION_ID);
        dom::clear(&message);

        let credentials = AdminCredentials {
            username: input_value(USERNAME_INPUT_ID).trim().to_owned(),
            password: input_value(PASSWORD_INPUT_ID),
        };

        match self.api.verify_admin(&credentials).await {
            Ok(()) => {
                dom::session_storage()
                    .set_item(
                        CREDENTIALS_STORAGE_KEY,
                        &serde_json::to_string(&credentials)
                            .expect("could not encode credentials as JSON"),
                    )
                    .expect("could not persist admin credentials");
                *self.state.borrow_mut() = AdminState::LoggedIn(credentials);
                toggle_panels(true);
                dom::set_message(&message, MessageKind::Success, LOGIN_OK_TEXT);
                self.load_stories().await;
            }
            Err(err) => {
                log(&format!("admin login failed: {err}"));
                dom::set_message(
                    &message,
                    MessageKind::Error,
                    &err.user_message(LOGIN_FAILED_TEXT),
                );
            }
        }
    }

    fn logout(&self) {
        *self.state.borrow_mut() = AdminState::LoggedOut;
        dom::session_storage()
            .remove_item(CREDENTIALS_STORAGE_KEY)
            .expect("could not clear stored admin credentials");

        toggle_panels(false);
        dom::element(LOGIN_FORM_ID)
            .dyn_ref::<HtmlFormElement>()
            .expect("admin login form is not a form element")
            .reset();
        dom::clear(&dom::element(MESSAGE_REGION_ID));
        dom::set_html(
            &dom::element(STORIES_CONTAINER_ID),
            &crate::markup::placeholder(LOGGED_OUT_TEXT),
        );
    }

    pub async fn load_stories(self: &Rc<Self>) {
        let container = dom::element(STORIES_CONTAINER_ID);
        dom::set_html(&container, &crate::markup::placeholder(LOADING_TEXT));

        match self.api.list_stories().await {
            Ok(stories) if stories.is_empty() => {
                dom::set_html(&container, &crate::markup::placeholder(EMPTY_TEXT));
            }
            Ok(stories) => self.render_stories(&container, &stories),
            Err(err) => {
                log(&format!("loading admin stories failed: {err}"));
                dom::set_html(&container, &crate::markup::placeholder(LOAD_FAILED_TEXT));
            }
        }
    }

    pub fn render_stories(self: &Rc<Self>, container: &Element, stories: &[Story]) {
        container.set_inner_html("");
        for story in stories {
            let date = dom::format_story_date(story.created_at.as_deref());
            let article = dom::document()
                .create_element("article")
                .expect("could not create story article");
            dom::set_html(&article, &story_article_markup(story, &date));

            let delete_control = article
                .query_selector("button")
                .expect("could not query delete control")
                .expect("story article is missing its delete control");
            let controller = self.clone();
            let story_id = story.id;
            let onclick = Closure::<dyn FnMut()>::new(move || {
                let controller = controller.clone();
                spawn_local(async move {
                    controller.delete_story(story_id).await;
                });
            });
            delete_control
                .dyn_ref::<HtmlElement>()
                .expect("delete control is not an html element")
                .set_onclick(Some(onclick.as_ref().unchecked_ref()));
            onclick.forget();

            container
                .append_child(&article)
                .expect("could not append story article");
        }
    }

    /// Deletes one story after re-confirming with the user. Requires a
    /// held credential pair; without one this is a silent no-op.
    pub async fn delete_story(self: &Rc<Self>, story_id: u64) -> DeleteOutcome {
        let credentials = match self.state.borrow().credentials() {
            Some(credentials) => credentials.clone(),
            None => return DeleteOutcome::NotAuthorized,
        };

        let confirmed = dom::window()
            .confirm_with_message(CONFIRM_DELETE_TEXT)
            .unwrap_or(false);
        if !confirmed {
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_story(story_id, &credentials).await {
            Ok(()) => {
                self.load_stories().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                log(&format!("deleting story {story_id} failed: {err}"));
                dom::window()
                    .alert_with_message(&err.user_message(DELETE_FAILED_TEXT))
                    .ok();
                DeleteOutcome::Failed
            }
        }
    }
}

pub fn toggle_panels(logged_in: bool) {
    dom::set_hidden(&dom::element(LOGIN_PANEL_ID), logged_in);
    dom::set_hidden(&dom::element(ADMIN_PANEL_ID), !logged_in);
}

fn wire_login_form(controller: &Rc<AdminController>) {
    let controller = controller.clone();
    let onsubmit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let controller = controller.clone();
        spawn_local(async move {
            controller.handle_login().await;
        });
    });
    dom::element(LOGIN_FORM_ID)
        .dyn_ref::<HtmlElement>()
        .expect("admin login form is not an html element")
        .set_onsubmit(Some(onsubmit.as_ref().unchecked_ref()));
    onsubmit.forget();
}

fn wire_logout_button(controller: &Rc<AdminController>) {
    let controller = controller.clone();
    let onclick = Closure::<dyn FnMut()>::new(move || {
        controller.logout();
    });
    dom::element(LOGOUT_BUTTON_ID)
        .dyn_ref::<HtmlElement>()
        .expect("logout control is not an html element")
        .set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();
}

fn input_value(id: &str) -> String {
    dom::element(id)
        .dyn_ref::<HtmlInputElement>()
        .unwrap_or_else(|| panic!("#{id} is not an input element"))
        .value()
}

/// One moderation row: meta line, title, description and the delete
/// control. All story text is escaped.
pub fn story_article_markup(story: &Story, formatted_date: &str) -> SafeHtml {
    let mut out = SafeHtml::from_static("<p class=\"story-meta\">");
    out.push_escaped(&crate::view_model::meta_line(
        &story.author_name,
        formatted_date,
    ));
    out.push_static("</p><h3>");
    out.push_escaped(&story.title);
    out.push_static("</h3><p>");
    out.push_escaped(&story.description);
    out.push_static("</p><div class=\"actions\"><button type=\"button\">🗑 Delete</button></div>");
    out
}
