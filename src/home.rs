//! Public listing page: fetch every story once per page load, render a
//! card per story from the page's `<template>`, and serve a full-content
//! modal out of the in-memory cache.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DocumentFragment, Element, Event, HtmlElement, HtmlTemplateElement};

use crate::api::Api;
use crate::dom;
use crate::log;
use crate::markup::SafeHtml;
use crate::story::Story;
use crate::view_model::{count_label, StoryCard};

pub const STORIES_CONTAINER_ID: &str = "stories-container";
pub const STORY_COUNT_ID: &str = "story-count";
pub const CARD_TEMPLATE_ID: &str = "story-card-template";
pub const MODAL_ID: &str = "story-modal";
pub const MODAL_CONTENT_ID: &str = "modal-story-content";

pub const LOADING_TEXT: &str = "Loading stories...";
pub const EMPTY_TEXT: &str = "No stories yet. Be the first to share!";
pub const LOAD_FAILED_TEXT: &str = "Something went wrong. Please refresh.";

pub struct HomeController {
    api: Api,
    cache: RefCell<Vec<Story>>,
}

pub fn init(api: Api) {
    let controller = HomeController::new(api);
    wire_modal_dismissal();

    spawn_local(async move {
        controller.load().await;
    });
}

impl HomeController {
    pub fn new(api: Api) -> Rc<Self> {
        Rc::new(HomeController {
            api,
            cache: RefCell::new(Vec::new()),
        })
    }

    /// One full fetch-and-render pass. On failure the cache keeps its
    /// previous contents and the count keeps its last value.
    pub async fn load(self: &Rc<Self>) {
        let container = dom::element(STORIES_CONTAINER_ID);
        dom::set_html(&container, &crate::markup::loading_panel(LOADING_TEXT));

        match self.api.list_stories().await {
            Ok(stories) => self.apply_stories(stories),
            Err(err) => {
                log(&format!("loading stories failed: {err}"));
                dom::set_html(&container, &crate::markup::loading_panel(LOAD_FAILED_TEXT));
            }
        }
    }

    /// Replaces the cache wholesale and re-renders count, cards or the
    /// empty state.
    pub fn apply_stories(self: &Rc<Self>, stories: Vec<Story>) {
        let container = dom::element(STORIES_CONTAINER_ID);
        dom::element(STORY_COUNT_ID).set_text_content(Some(&count_label(stories.len())));

        *self.cache.borrow_mut() = stories;
        if self.cache.borrow().is_empty() {
            dom::set_html(&container, &crate::markup::loading_panel(EMPTY_TEXT));
        } else {
            self.render_cards(&container);
        }
    }

    fn render_cards(self: &Rc<Self>, container: &Element) {
        container.set_inner_html("");
        let template: HtmlTemplateElement = dom::element(CARD_TEMPLATE_ID)
            .dyn_into()
            .expect("story card template is not a template element");

        for story in self.cache.borrow().iter() {
            let date = dom::format_story_date(story.created_at.as_deref());
            let card = StoryCard::from_story(story, &date);

            let fragment: DocumentFragment = template
                .content()
                .clone_node_with_deep(true)
                .expect("could not clone story card template")
                .dyn_into()
                .expect("cloned template content is not a fragment");

            fill_card(&fragment, &card);
            self.wire_read_more(&fragment, card.id);
            container
                .append_child(&fragment)
                .expect("could not append story card");
        }
    }

    fn wire_read_more(self: &Rc<Self>, fragment: &DocumentFragment, story_id: u64) {
        let button = card_slot(fragment, ".read-more");
        let controller = self.clone();
        let onclick = Closure::<dyn FnMut()>::new(move || {
            controller.show_full_story(story_id);
        });
        button
            .dyn_ref::<HtmlElement>()
            .expect("read-more control is not an html element")
            .set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    /// Fills the modal from the cache, no refetch. An id the cache does
    /// not hold is a no-op.
    pub fn show_full_story(&self, story_id: u64) {
        let cache = self.cache.borrow();
        let Some(story) = cache.iter().find(|story| story.id == story_id) else {
            return;
        };
        let date = dom::format_story_date(story.created_at.as_deref());
        dom::set_html(&dom::element(MODAL_CONTENT_ID), &modal_markup(story, &date));
        dom::element(MODAL_ID)
            .class_list()
            .add_1("open")
            .expect("could not open story modal");
    }
}

/// Removing the class on an already-closed modal is a no-op, so closing
/// is idempotent.
pub fn close_modal() {
    dom::element(MODAL_ID)
        .class_list()
        .remove_1("open")
        .expect("could not close story modal");
}

fn wire_modal_dismissal() {
    let modal = dom::element(MODAL_ID);

    let close_control = modal
        .query_selector(".close-modal")
        .expect("could not query modal close control")
        .expect("missing modal close control");
    let onclick = Closure::<dyn FnMut()>::new(close_modal);
    close_control
        .dyn_ref::<HtmlElement>()
        .expect("modal close control is not an html element")
        .set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();

    // Clicking the backdrop, but not the content inside it, dismisses.
    let backdrop = modal.clone();
    let on_backdrop_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let target = event.target();
        let hit_backdrop = target
            .as_ref()
            .and_then(|t| t.dyn_ref::<Element>())
            .is_some_and(|el| *el == backdrop);
        if hit_backdrop {
            close_modal();
        }
    });
    modal
        .dyn_ref::<HtmlElement>()
        .expect("story modal is not an html element")
        .set_onclick(Some(on_backdrop_click.as_ref().unchecked_ref()));
    on_backdrop_click.forget();
}

fn card_slot(fragment: &DocumentFragment, selector: &str) -> Element {
    fragment
        .query_selector(selector)
        .expect("could not query story card template")
        .unwrap_or_else(|| panic!("story card template is missing {selector}"))
}

fn fill_card(fragment: &DocumentFragment, card: &StoryCard) {
    let image_slot = card_slot(fragment, ".story-image");
    match &card.photo_url {
        Some(url) => {
            let img = dom::document()
                .create_element("img")
                .expect("could not create story image");
            img.set_attribute("src", url).expect("could not set story image source");
            img.set_attribute("alt", &card.title)
                .expect("could not set story image alt text");
            img.set_attribute("class", "story-image")
                .expect("could not set story image class");
            image_slot
                .replace_with_with_node_1(&img)
                .expect("could not place story image");
        }
        None => image_slot.set_text_content(Some(&card.initial)),
    }

    card_slot(fragment, "h3").set_text_content(Some(&card.title));
    card_slot(fragment, ".story-meta").set_text_content(Some(&card.meta_line));
    card_slot(fragment, ".story-description").set_text_content(Some(&card.preview));
}

/// Full-content markup for the modal. Every story field passes through
/// escaping, including the photo URL used in the `src` attribute.
pub fn modal_markup(story: &Story, formatted_date: &str) -> SafeHtml {
    let mut out = SafeHtml::new();
    if let Some(url) = &story.photo_url {
        out.push_static("<img src=\"");
        out.push_escaped(url);
        out.push_static("\" alt=\"");
        out.push_escaped(&story.title);
        out.push_static("\">");
    }
    out.push_static("<h2>");
    out.push_escaped(&story.title);
    out.push_static("</h2><p class=\"story-meta\">");
    out.push_escaped(&crate::view_model::meta_line(
        &story.author_name,
        formatted_date,
    ));
    out.push_static("</p><p style=\"white-space: pre-wrap;\">");
    out.push_escaped(&story.content);
    out.push_static("</p>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(photo_url: Option<&str>) -> Story {
        Story {
            id: 1,
            title: "<b>Bold</b> title".into(),
            description: "desc".into(),
            content: "line one\nline <two>".into(),
            author_name: "A & B".into(),
            photo_url: photo_url.map(str::to_owned),
            created_at: Some("2024-05-01 10:00:00".into()),
        }
    }

    #[test]
    fn modal_markup_escapes_every_story_field() {
        let html = modal_markup(&story(None), "May 1, 2024");
        let text = html.as_str();
        assert!(text.contains("<h2>&lt;b&gt;Bold&lt;/b&gt; title</h2>"));
        assert!(text.contains("By A &amp; B • May 1, 2024"));
        assert!(text.contains("line one\nline &lt;two&gt;"));
        assert!(!text.contains("<b>"));
    }

    #[test]
    fn modal_markup_includes_image_only_when_photo_present() {
        let without = modal_markup(&story(None), "May 1, 2024");
        assert!(!without.as_str().contains("<img"));

        let with = modal_markup(&story(Some("/uploads/p.jpg\" onerror=\"x()")), "May 1, 2024");
        assert!(with.as_str().starts_with("<img src=\"/uploads/p.jpg&quot; onerror=&quot;x()\""));
    }

    #[test]
    fn modal_markup_preserves_whitespace_styling() {
        let html = modal_markup(&story(None), "May 1, 2024");
        assert!(html.as_str().contains("white-space: pre-wrap"));
    }
}
