//! Server-side rendering of the chat page.
//!
//! The markup satisfies the page contract in `shared_types`: every id, class
//! and `data-action` the WASM controller looks up is taken from there.

use std::fmt::Write;

use shared_types::{
    escape_html, PageAction, PageElement, Sender, Transcript, ACTION_ATTRIBUTE, AVATAR_CLASS,
    BUBBLE_CLASS, CHAT_ROUTE, MARKDOWN_CONTENT_CLASS, QUESTION_ATTRIBUTE, USER_MESSAGE_FIELD,
};

use crate::markdown::render_reply;

pub const SUGGESTIONS: [&str; 4] = [
    "Explain ownership and borrowing in Rust",
    "Write a function that reverses a linked list",
    "What is the difference between TCP and UDP?",
    "Suggest a name for my new CLI tool",
];

const HIGHLIGHT_JS: &str = "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0";
const CONTROLLER_MODULE: &str = "/static/pkg/chat_ui.js";

const STYLES: &str = r#"
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
:root{--bg:#0f172a;--panel:#111827;--text:#e5e7eb;--muted:#94a3b8;--user:#2563eb;--bot:#1f2937;--border:#1e293b}
:root[data-theme="light"]{--bg:#f8fafc;--panel:#ffffff;--text:#0f172a;--muted:#475569;--user:#3b82f6;--bot:#e2e8f0;--border:#cbd5e1}
html,body{height:100%;background:var(--bg);color:var(--text);font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif}
body{display:flex}
.sidebar{width:280px;background:var(--panel);border-right:1px solid var(--border);padding:20px;display:flex;flex-direction:column;gap:10px}
.sidebar h2{font-size:14px;color:var(--muted);text-transform:uppercase}
.suggestion{background:none;border:1px solid var(--border);color:var(--text);padding:10px;border-radius:8px;text-align:left;cursor:pointer}
.sidebar-overlay{display:none}
.main{flex:1;display:flex;flex-direction:column;min-width:0}
.header{display:flex;align-items:center;gap:12px;padding:12px 20px;border-bottom:1px solid var(--border)}
.header h1{flex:1;font-size:18px}
.header button{background:none;border:none;font-size:20px;cursor:pointer;color:var(--text)}
.menu-btn{display:none}
.chat-box{flex:1;overflow-y:auto;padding:20px;display:flex;flex-direction:column;gap:14px}
.welcome{margin:auto;text-align:center;color:var(--muted);display:flex;flex-direction:column;gap:12px}
.message{display:flex;gap:10px;max-width:820px;width:100%;margin:0 auto}
.user-msg{flex-direction:row-reverse}
.avatar{font-size:22px}
.bubble{position:relative;padding:12px 16px;border-radius:12px;background:var(--bot);white-space:pre-wrap;overflow-wrap:anywhere;max-width:100%}
.user-msg .bubble{background:var(--user);color:#fff}
.markdown-content{white-space:normal}
.markdown-content pre{overflow-x:auto;margin:8px 0}
.copy-btn{position:absolute;top:6px;right:6px;background:none;border:none;cursor:pointer;opacity:.6}
.loading{padding:0 20px 10px;color:var(--muted)}
#chatForm{display:flex;gap:10px;padding:14px 20px;border-top:1px solid var(--border)}
#userInput{flex:1;resize:none;padding:12px;border-radius:10px;border:1px solid var(--border);background:var(--panel);color:var(--text);font:inherit}
#sendBtn{padding:0 18px;border-radius:10px;border:none;background:var(--user);color:#fff;cursor:pointer}
.toast{position:fixed;bottom:90px;left:50%;transform:translateX(-50%);background:#16a34a;color:#fff;padding:8px 16px;border-radius:8px;opacity:0;pointer-events:none;transition:opacity .2s}
.toast.show{opacity:1}
@media (max-width:900px){
.sidebar{position:fixed;inset:0 auto 0 0;z-index:20;transform:translateX(-100%);transition:transform .2s}
.sidebar.open{transform:none}
.sidebar-overlay{position:fixed;inset:0;background:rgba(0,0,0,.5);z-index:10}
.sidebar-overlay.show{display:block}
.menu-btn{display:block}
}
"#;

/// Full HTML document for a transcript. An empty transcript renders the
/// welcome placeholder.
pub fn render_page(transcript: &Transcript) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>AI Chat</title>\n");
    let _ = writeln!(
        out,
        r#"<link rel="stylesheet" href="{HIGHLIGHT_JS}/styles/github-dark.min.css">"#
    );
    let _ = writeln!(out, r#"<script src="{HIGHLIGHT_JS}/highlight.min.js"></script>"#);
    let _ = writeln!(out, "<style>{STYLES}</style>");
    out.push_str("</head>\n<body>\n");

    render_sidebar(&mut out);

    out.push_str("<main class=\"main\">\n");
    render_header(&mut out);
    let _ = writeln!(
        out,
        r#"<div id="{}" class="chat-box">"#,
        id(PageElement::ChatBox)
    );
    if transcript.is_empty() {
        render_welcome(&mut out);
    } else {
        for message in &transcript.messages {
            render_message(&mut out, message.sender, &message.text);
        }
    }
    out.push_str("</div>\n");
    let _ = writeln!(
        out,
        r#"<div id="{}" class="loading" style="display:none">Thinking&hellip;</div>"#,
        id(PageElement::Loading)
    );
    render_form(&mut out);
    out.push_str("</main>\n");

    let _ = writeln!(
        out,
        r#"<div id="{}" class="toast">Copied to clipboard</div>"#,
        id(PageElement::CopyToast)
    );
    let _ = writeln!(
        out,
        r#"<script type="module">import init from "{CONTROLLER_MODULE}"; init();</script>"#
    );
    out.push_str("</body>\n</html>\n");
    out
}

fn id(element: PageElement) -> &'static str {
    element.id().unwrap_or_default()
}

fn class(element: PageElement) -> &'static str {
    element.class_name().unwrap_or_default()
}

fn action(action: PageAction) -> String {
    format!(r#"{ACTION_ATTRIBUTE}="{}""#, action.as_str())
}

fn render_suggestion(out: &mut String, text: &str) {
    let text = escape_html(text);
    let _ = writeln!(
        out,
        r#"<button type="button" class="suggestion" {} {QUESTION_ATTRIBUTE}="{text}">{text}</button>"#,
        action(PageAction::Fill)
    );
}

fn render_sidebar(out: &mut String) {
    let _ = writeln!(
        out,
        r#"<aside id="{}" class="sidebar">"#,
        id(PageElement::Sidebar)
    );
    out.push_str("<h2>Try asking</h2>\n");
    for suggestion in SUGGESTIONS {
        render_suggestion(out, suggestion);
    }
    out.push_str("</aside>\n");
}

fn render_header(out: &mut String) {
    out.push_str("<header class=\"header\">\n");
    let _ = writeln!(
        out,
        r#"<button type="button" class="menu-btn" {}>&#9776;</button>"#,
        action(PageAction::ToggleSidebar)
    );
    out.push_str("<h1>AI Chat</h1>\n");
    let _ = writeln!(
        out,
        r#"<button type="button" class="{}" {} title="Toggle theme">{}</button>"#,
        class(PageElement::ThemeButton),
        action(PageAction::ToggleTheme),
        shared_types::Theme::Dark.glyph()
    );
    out.push_str("</header>\n");
}

fn render_welcome(out: &mut String) {
    let _ = writeln!(out, r#"<div class="{}">"#, class(PageElement::Welcome));
    out.push_str("<h2>How can I help you today?</h2>\n");
    out.push_str("<p>Ask anything, or pick a suggestion.</p>\n");
    for suggestion in SUGGESTIONS.iter().take(2) {
        render_suggestion(out, suggestion);
    }
    out.push_str("</div>\n");
}

fn render_message(out: &mut String, sender: Sender, text: &str) {
    let _ = write!(
        out,
        r#"<div class="{}"><div class="{AVATAR_CLASS}">{}</div><div class="{BUBBLE_CLASS}">"#,
        sender.message_class(),
        sender.avatar()
    );
    match sender {
        Sender::User => out.push_str(&escape_html(text)),
        Sender::Assistant => {
            let _ = write!(
                out,
                r#"<div class="{MARKDOWN_CONTENT_CLASS}">{}</div><button type="button" class="copy-btn" {} title="Copy">&#128203;</button>"#,
                render_reply(text),
                action(PageAction::Copy)
            );
        }
    }
    out.push_str("</div></div>\n");
}

fn render_form(out: &mut String) {
    let _ = writeln!(
        out,
        r#"<form id="{}" action="{CHAT_ROUTE}" method="post">"#,
        id(PageElement::ChatForm)
    );
    let _ = writeln!(
        out,
        r#"<textarea id="{}" name="{USER_MESSAGE_FIELD}" rows="1" placeholder="Type a message&hellip;" required></textarea>"#,
        id(PageElement::UserInput)
    );
    let _ = writeln!(
        out,
        r#"<button id="{}" type="submit">&#10148;</button>"#,
        id(PageElement::SendButton)
    );
    out.push_str("</form>\n");
}
