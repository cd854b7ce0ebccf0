//! Browser-side behavior tests. Each test rebuilds the fixture markup it
//! needs, mirroring the integration points the real pages provide.

use wasm_bindgen_test::*;

use storyshare_frontend::admin::{self, AdminController, AdminState, DeleteOutcome};
use storyshare_frontend::api::Api;
use storyshare_frontend::dom::{self, MessageKind};
use storyshare_frontend::home::{self, HomeController};
use storyshare_frontend::story::Story;
use storyshare_frontend::submit;

wasm_bindgen_test_configure!(run_in_browser);

fn set_body(html: &str) {
    dom::document()
        .body()
        .expect("test document has no body")
        .set_inner_html(html);
}

fn api() -> Api {
    Api::new("http://localhost/api".to_owned())
}

fn story(id: u64, title: &str) -> Story {
    Story {
        id,
        title: title.to_owned(),
        description: format!("description of {title}"),
        content: format!("content of {title}"),
        author_name: "Ann".to_owned(),
        photo_url: None,
        created_at: Some("2024-05-01 10:00:00".to_owned()),
    }
}

fn home_fixture() -> String {
    format!(
        r#"
        <span id="{count}"></span>
        <div id="{container}"></div>
        <template id="{template}">
            <div class="story-card">
                <div class="story-image"></div>
                <h3></h3>
                <p class="story-meta"></p>
                <p class="story-description"></p>
                <button class="read-more">Read more</button>
            </div>
        </template>
        <div id="{modal}">
            <span class="close-modal"></span>
            <div id="{modal_content}"></div>
        </div>
        "#,
        count = home::STORY_COUNT_ID,
        container = home::STORIES_CONTAINER_ID,
        template = home::CARD_TEMPLATE_ID,
        modal = home::MODAL_ID,
        modal_content = home::MODAL_CONTENT_ID,
    )
}

fn admin_fixture() -> String {
    format!(
        r#"
        <section id="{login_panel}">
            <form id="{login_form}">
                <input id="{username}" value="">
                <input id="{password}" value="">
            </form>
        </section>
        <section id="{admin_panel}" class="hidden">
            <button id="{logout}"></button>
            <div id="{stories}"></div>
        </section>
        <div id="{message}"></div>
        "#,
        login_panel = admin::LOGIN_PANEL_ID,
        login_form = admin::LOGIN_FORM_ID,
        username = admin::USERNAME_INPUT_ID,
        password = admin::PASSWORD_INPUT_ID,
        admin_panel = admin::ADMIN_PANEL_ID,
        logout = admin::LOGOUT_BUTTON_ID,
        stories = admin::STORIES_CONTAINER_ID,
        message = admin::MESSAGE_REGION_ID,
    )
}

#[wasm_bindgen_test]
fn message_region_holds_exactly_one_message() {
    set_body(&format!("<div id=\"{}\"></div>", submit::MESSAGE_REGION_ID));
    let region = dom::element(submit::MESSAGE_REGION_ID);

    dom::set_message(&region, MessageKind::Success, submit::PUBLISHING_TEXT);
    dom::set_message(&region, MessageKind::Error, "Unable to publish story");
    dom::set_message(&region, MessageKind::Success, submit::PUBLISHED_TEXT);

    assert_eq!(region.child_element_count(), 1);
    let child = region.first_element_child().unwrap();
    assert_eq!(child.class_name(), "success-message");
    assert_eq!(child.text_content().unwrap(), submit::PUBLISHED_TEXT);
}

#[wasm_bindgen_test]
fn listing_renders_one_card_per_story_with_escaped_text() {
    set_body(&home_fixture());
    let controller = HomeController::new(api());

    controller.apply_stories(vec![story(1, "<b>X</b>"), story(2, "Second"), story(3, "Third")]);

    let container = dom::element(home::STORIES_CONTAINER_ID);
    let cards = container.query_selector_all(".story-card").unwrap();
    assert_eq!(cards.length(), 3);

    let first_title = container.query_selector("h3").unwrap().unwrap();
    assert_eq!(first_title.text_content().unwrap(), "<b>X</b>");
    assert!(first_title.inner_html().contains("&lt;b&gt;"));
    assert!(container.query_selector("b").unwrap().is_none());

    assert_eq!(
        dom::element(home::STORY_COUNT_ID).text_content().unwrap(),
        "3+"
    );
}

#[wasm_bindgen_test]
fn listing_shows_placeholder_initial_when_story_has_no_photo() {
    set_body(&home_fixture());
    let controller = HomeController::new(api());

    controller.apply_stories(vec![story(1, "quiet evening")]);

    let container = dom::element(home::STORIES_CONTAINER_ID);
    let image_slot = container.query_selector(".story-image").unwrap().unwrap();
    assert_eq!(image_slot.tag_name(), "DIV");
    assert_eq!(image_slot.text_content().unwrap(), "Q");
}

#[wasm_bindgen_test]
fn listing_uses_img_tag_when_photo_present() {
    set_body(&home_fixture());
    let controller = HomeController::new(api());

    let mut with_photo = story(1, "Pictured");
    with_photo.photo_url = Some("/uploads/p.jpg".to_owned());
    controller.apply_stories(vec![with_photo]);

    let container = dom::element(home::STORIES_CONTAINER_ID);
    let image = container.query_selector(".story-image").unwrap().unwrap();
    assert_eq!(image.tag_name(), "IMG");
    assert_eq!(image.get_attribute("src").unwrap(), "/uploads/p.jpg");
    assert_eq!(image.get_attribute("alt").unwrap(), "Pictured");
}

#[wasm_bindgen_test]
fn empty_listing_shows_empty_state_and_zero_count() {
    set_body(&home_fixture());
    let controller = HomeController::new(api());

    controller.apply_stories(Vec::new());

    let container = dom::element(home::STORIES_CONTAINER_ID);
    assert!(container
        .text_content()
        .unwrap()
        .contains(home::EMPTY_TEXT));
    assert_eq!(
        dom::element(home::STORY_COUNT_ID).text_content().unwrap(),
        "0+"
    );
}

#[wasm_bindgen_test]
fn modal_opens_from_cache_and_double_close_stays_closed() {
    set_body(&home_fixture());
    let controller = HomeController::new(api());
    controller.apply_stories(vec![story(5, "Modal story")]);

    controller.show_full_story(5);
    let modal = dom::element(home::MODAL_ID);
    assert!(modal.class_list().contains("open"));
    assert!(dom::element(home::MODAL_CONTENT_ID)
        .text_content()
        .unwrap()
        .contains("Modal story"));

    home::close_modal();
    home::close_modal();
    assert!(!modal.class_list().contains("open"));
}

#[wasm_bindgen_test]
fn unknown_story_id_leaves_modal_closed() {
    set_body(&home_fixture());
    let controller = HomeController::new(api());
    controller.apply_stories(vec![story(1, "Only story")]);

    controller.show_full_story(999);

    assert!(!dom::element(home::MODAL_ID).class_list().contains("open"));
}

#[wasm_bindgen_test]
fn panel_toggle_swaps_login_and_admin_visibility() {
    set_body(&admin_fixture());

    admin::toggle_panels(true);
    assert!(dom::element(admin::LOGIN_PANEL_ID).class_list().contains("hidden"));
    assert!(!dom::element(admin::ADMIN_PANEL_ID).class_list().contains("hidden"));

    admin::toggle_panels(false);
    assert!(!dom::element(admin::LOGIN_PANEL_ID).class_list().contains("hidden"));
    assert!(dom::element(admin::ADMIN_PANEL_ID).class_list().contains("hidden"));
}

#[wasm_bindgen_test]
fn admin_list_renders_escaped_articles_with_delete_controls() {
    set_body(&admin_fixture());
    let controller = AdminController::new(
        api(),
        AdminState::LoggedIn(storyshare_frontend::story::AdminCredentials {
            username: "root".into(),
            password: "pw".into(),
        }),
    );

    let container = dom::element(admin::STORIES_CONTAINER_ID);
    controller.render_stories(&container, &[story(1, "<i>sly</i>"), story(2, "Plain")]);

    let articles = container.query_selector_all("article").unwrap();
    assert_eq!(articles.length(), 2);
    let title = container.query_selector("h3").unwrap().unwrap();
    assert_eq!(title.text_content().unwrap(), "<i>sly</i>");
    assert!(container.query_selector("i").unwrap().is_none());
    assert_eq!(container.query_selector_all("button").unwrap().length(), 2);
}

#[wasm_bindgen_test]
async fn delete_without_login_makes_no_request() {
    set_body(&admin_fixture());
    // The api base is unreachable on purpose: if the guard failed, the
    // outcome would be Failed rather than NotAuthorized.
    let controller = AdminController::new(api(), AdminState::LoggedOut);

    let outcome = controller.delete_story(1).await;

    assert_eq!(outcome, DeleteOutcome::NotAuthorized);
}
