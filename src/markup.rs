use std::fmt;

/// An HTML fragment that is safe to assign to `inner_html`.
///
/// The only ways to get story-provided text into one of these are
/// [`SafeHtml::escape`] and [`SafeHtml::push_escaped`], so untrusted
/// strings cannot reach the DOM as live markup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SafeHtml(String);

impl SafeHtml {
    pub fn new() -> Self {
        SafeHtml(String::new())
    }

    /// Escapes untrusted text into a fragment.
    pub fn escape(text: &str) -> Self {
        let mut out = SafeHtml::new();
        out.push_escaped(text);
        out
    }

    /// Admits a compile-time literal verbatim. Structural tags only;
    /// anything derived from story data must go through `escape`.
    pub fn from_static(fragment: &'static str) -> Self {
        SafeHtml(fragment.to_owned())
    }

    pub fn push_escaped(&mut self, text: &str) -> &mut Self {
        for ch in text.chars() {
            match ch {
                '&' => self.0.push_str("&amp;"),
                '<' => self.0.push_str("&lt;"),
                '>' => self.0.push_str("&gt;"),
                '"' => self.0.push_str("&quot;"),
                '\'' => self.0.push_str("&#39;"),
                other => self.0.push(other),
            }
        }
        self
    }

    pub fn push_static(&mut self, fragment: &'static str) -> &mut Self {
        self.0.push_str(fragment);
        self
    }

    pub fn push(&mut self, other: &SafeHtml) -> &mut Self {
        self.0.push_str(&other.0);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `<div class="{class}">{text}</div>`, the shape every message region
/// is replaced with (never appended to).
pub fn message_block(class: &'static str, text: &str) -> SafeHtml {
    let mut out = SafeHtml::from_static("<div class=\"");
    out.push_static(class).push_static("\">");
    out.push_escaped(text);
    out.push_static("</div>");
    out
}

/// `<p class="placeholder">{text}</p>` used by the admin story list.
pub fn placeholder(text: &str) -> SafeHtml {
    let mut out = SafeHtml::from_static("<p class=\"placeholder\">");
    out.push_escaped(text);
    out.push_static("</p>");
    out
}

/// Spinner panel shown while the public listing loads, and for its
/// empty and error states.
pub fn loading_panel(text: &str) -> SafeHtml {
    let mut out =
        SafeHtml::from_static("<div class=\"loading-panel\"><div class=\"spinner\"></div><p>");
    out.push_escaped(text);
    out.push_static("</p></div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup_characters() {
        let html = SafeHtml::escape("<b>X</b> & \"quotes\" 'too'");
        assert_eq!(
            html.as_str(),
            "&lt;b&gt;X&lt;/b&gt; &amp; &quot;quotes&quot; &#39;too&#39;"
        );
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(SafeHtml::escape("Just a story.").as_str(), "Just a story.");
    }

    #[test]
    fn fragments_compose_without_double_escaping() {
        let mut out = SafeHtml::from_static("<h2>");
        out.push(&SafeHtml::escape("a < b"));
        out.push_static("</h2>");
        assert_eq!(out.as_str(), "<h2>a &lt; b</h2>");
    }

    #[test]
    fn message_block_escapes_its_text() {
        let html = message_block("error-message", "<script>boom()</script>");
        assert_eq!(
            html.as_str(),
            "<div class=\"error-message\">&lt;script&gt;boom()&lt;/script&gt;</div>"
        );
    }

    #[test]
    fn placeholder_wraps_text() {
        assert_eq!(
            placeholder("No stories to show.").as_str(),
            "<p class=\"placeholder\">No stories to show.</p>"
        );
    }
}
