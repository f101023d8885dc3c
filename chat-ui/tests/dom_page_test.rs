//! DOM adapter tests, run in a real browser
//!
//! Run with: wasm-pack test --headless --firefox chat-ui

#![cfg(target_arch = "wasm32")]

use chat_ui::{DomPage, Mutation, Page, PageError};
use shared_types::{PageElement, OPEN_CLASS, SHOW_CLASS, THEME_ATTRIBUTE};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r#"
<aside id="sidebar"></aside>
<button class="theme-btn">x</button>
<div id="chatBox">
  <div class="welcome">hi</div>
  <div class="message bot-msg">
    <div class="bubble">
      <div class="markdown-content">code here</div>
      <button id="copyControl" data-action="copy">copy</button>
    </div>
  </div>
</div>
<div id="loading" style="display:none"></div>
<form id="chatForm" action="/chat" method="post">
  <textarea id="userInput" name="user_message"></textarea>
  <button id="sendBtn" type="submit">send</button>
</form>
<div id="copyToast"></div>
"#;

fn mount() -> DomPage {
    let page = DomPage::from_window().unwrap();
    page.document()
        .body()
        .unwrap()
        .set_inner_html(FIXTURE);
    page
}

#[wasm_bindgen_test]
fn theme_attribute_set_and_removed() {
    let page = mount();
    page.apply(&Mutation::SetAttribute {
        target: PageElement::Root,
        name: THEME_ATTRIBUTE,
        value: Some("light".to_string()),
    })
    .unwrap();
    let root = page.document().document_element().unwrap();
    assert_eq!(root.get_attribute(THEME_ATTRIBUTE).as_deref(), Some("light"));
    assert_eq!(
        page.get_attribute(PageElement::Root, THEME_ATTRIBUTE).unwrap().as_deref(),
        Some("light")
    );

    page.apply(&Mutation::SetAttribute {
        target: PageElement::Root,
        name: THEME_ATTRIBUTE,
        value: None,
    })
    .unwrap();
    assert!(!root.has_attribute(THEME_ATTRIBUTE));
    assert_eq!(page.get_attribute(PageElement::Root, THEME_ATTRIBUTE).unwrap(), None);
}

#[wasm_bindgen_test]
fn overlay_created_once_and_classes_forced() {
    let page = mount();
    page.apply(&Mutation::CreateOverlay).unwrap();
    page.apply(&Mutation::CreateOverlay).unwrap();
    let overlays = page
        .document()
        .query_selector_all(PageElement::SidebarOverlay.selector())
        .unwrap();
    assert_eq!(overlays.length(), 1);

    page.apply(&Mutation::SetClass {
        target: PageElement::SidebarOverlay,
        class: SHOW_CLASS,
        present: true,
    })
    .unwrap();
    assert!(page.has_class(PageElement::SidebarOverlay, SHOW_CLASS).unwrap());
    assert!(!page.has_class(PageElement::Sidebar, OPEN_CLASS).unwrap());
}

#[wasm_bindgen_test]
fn appended_markup_renders_literal_text() {
    let page = mount();
    page.apply(&Mutation::Append {
        parent: PageElement::ChatBox,
        class_name: "message user-msg",
        html: chat_ui::handlers::user_message_markup("Hello <b>world</b>"),
    })
    .unwrap();

    let bubble = page
        .document()
        .query_selector("#chatBox .user-msg .bubble")
        .unwrap()
        .unwrap();
    assert_eq!(bubble.text_content().as_deref(), Some("Hello <b>world</b>"));
    assert!(bubble.query_selector("b").unwrap().is_none());
}

#[wasm_bindgen_test]
fn bubble_text_prefers_markdown_content() {
    let page = mount();
    let control = page.document().get_element_by_id("copyControl").unwrap();
    let text = page.bubble_text(&control).unwrap();
    assert_eq!(text.markdown.as_deref(), Some("code here"));

    let outside = page.document().get_element_by_id("loading").unwrap();
    assert_eq!(
        page.bubble_text(&outside).unwrap_err(),
        PageError::MissingAncestor("bubble")
    );
}

#[wasm_bindgen_test]
fn input_value_and_focus() {
    let page = mount();
    page.apply(&Mutation::SetValue {
        target: PageElement::UserInput,
        value: "typed".to_string(),
    })
    .unwrap();
    page.apply(&Mutation::Focus(PageElement::UserInput)).unwrap();

    assert_eq!(page.value(PageElement::UserInput).unwrap(), "typed");
    assert!(page.is_focused(PageElement::UserInput).unwrap());

    let input = page
        .document()
        .get_element_by_id("userInput")
        .unwrap()
        .dyn_into::<web_sys::HtmlTextAreaElement>()
        .unwrap();
    assert_eq!(input.value(), "typed");
}

#[wasm_bindgen_test]
fn remove_welcome_is_idempotent() {
    let page = mount();
    page.apply(&Mutation::Remove(PageElement::Welcome)).unwrap();
    page.apply(&Mutation::Remove(PageElement::Welcome)).unwrap();
    assert!(!page.exists(PageElement::Welcome).unwrap());
}
