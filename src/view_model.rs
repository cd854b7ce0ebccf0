//! Pure view models sitting between `Story` records and the DOM.
//! Everything here is plain string work so it stays testable off-browser;
//! date formatting happens in `dom` and is passed in already rendered.

use crate::story::Story;

/// Longest description preview shown on a card before truncation.
pub const PREVIEW_CHARS: usize = 160;

/// Everything a public listing card displays for one story.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoryCard {
    pub id: u64,
    pub title: String,
    pub photo_url: Option<String>,
    /// Placeholder glyph shown when there is no photo.
    pub initial: String,
    pub meta_line: String,
    pub preview: String,
}

impl StoryCard {
    pub fn from_story(story: &Story, formatted_date: &str) -> Self {
        StoryCard {
            id: story.id,
            title: story.title.clone(),
            photo_url: story.photo_url.clone(),
            initial: initial_letter(&story.title),
            meta_line: meta_line(&story.author_name, formatted_date),
            preview: preview(&story.description),
        }
    }
}

pub fn meta_line(author: &str, formatted_date: &str) -> String {
    format!("By {author} • {formatted_date}")
}

/// Uppercased first character of the title, "?" for an empty title.
pub fn initial_letter(title: &str) -> String {
    match title.chars().next() {
        Some(ch) => ch.to_uppercase().collect(),
        None => "?".to_owned(),
    }
}

pub fn preview(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

/// The visible story counter, "{n}+".
pub fn count_label(count: usize) -> String {
    format!("{count}+")
}
