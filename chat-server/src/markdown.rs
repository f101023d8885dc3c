//! Markdown rendering for assistant replies
//!
//! Replies are CommonMark with GitHub extensions, rendered by pulldown-cmark.
//! Raw HTML the model emits is passed through the parser, so the rendered
//! output is cleaned with ammonia's allowlist before it reaches the page.
//! Fenced code keeps its `language-*` class so highlight.js can pick it up
//! in the browser.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};

static SANITIZER: Lazy<ammonia::Builder<'static>> = Lazy::new(|| {
    let mut builder = ammonia::Builder::default();
    builder
        .add_tags(["input"])
        .add_tag_attributes("code", ["class"])
        .add_tag_attributes("input", ["type", "checked", "disabled"]);
    builder
});

/// Reply markdown as sanitized HTML.
pub fn render_reply(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut rendered = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut rendered, parser);
    sanitize_html(&rendered)
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Keep only allowlisted tags, attributes and URL schemes. Script and style
/// content is dropped along with the tags.
pub fn sanitize_html(html: &str) -> String {
    SANITIZER.clean(html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_paragraph() {
        assert_eq!(render_reply("Hello, world!").trim(), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_code_block_keeps_language_class() {
        let html = render_reply("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_code_block_content_is_escaped() {
        let html = render_reply("```html\n<b>not bold</b>\n```");
        assert!(html.contains("&lt;b&gt;not bold&lt;/b&gt;"));
    }

    #[test]
    fn test_tables_and_strikethrough() {
        let html = render_reply("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_task_list_checkbox_survives() {
        let html = render_reply("- [x] done");
        assert!(html.contains("<input"));
        assert!(html.contains(r#"type="checkbox""#));
    }

    #[test]
    fn test_script_removed() {
        let html = render_reply("hi <script>alert('x')</script> there");
        assert!(!html.to_lowercase().contains("<script"));
        assert!(!html.contains("alert"));
    }

    #[test]
    fn test_event_handlers_and_js_urls_removed() {
        let dirty = r#"<img src="x.png" onerror="steal()"><a href="javascript:evil()">x</a>"#;
        let clean = sanitize_html(dirty);
        assert!(!clean.contains("onerror"));
        assert!(!clean.contains("javascript:"));
        assert!(clean.contains(r#"src="x.png""#));
        assert!(clean.contains(">x</a>"));
    }

    #[test]
    fn test_unquoted_js_url_removed() {
        let html = render_reply("<a href=javascript:alert(1)>x</a>");
        assert!(!html.contains("javascript"));
        assert!(!html.contains("alert"));
        assert!(html.contains(">x</a>"));
    }

    #[test]
    fn test_entity_encoded_js_url_removed() {
        let html = render_reply(r#"<a href="&#106;avascript:alert(1)">x</a>"#);
        assert!(!html.contains("avascript"));
        assert!(!html.contains("alert"));
    }

    #[test]
    fn test_http_links_kept() {
        let html = render_reply("[docs](https://doc.rust-lang.org/)");
        assert!(html.contains(r#"href="https://doc.rust-lang.org/""#));
    }

    #[test]
    fn test_iframe_and_embed_removed() {
        let clean = sanitize_html(r#"<iframe src="https://x"></iframe><embed src="a.swf">ok"#);
        assert!(!clean.contains("iframe"));
        assert!(!clean.contains("embed"));
        assert!(clean.contains("ok"));
    }
}
