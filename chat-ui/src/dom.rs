//! [`Page`] over the live browser document.

use shared_types::{PageElement, BUBBLE_CLASS, MARKDOWN_CONTENT_CLASS};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
};

use crate::interop::highlight_all;
use crate::mutation::Mutation;
use crate::page::{BubbleText, Page, PageError};

#[derive(Debug, Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn from_window() -> Result<Self, PageError> {
        let document = web_sys::window()
            .ok_or(PageError::Unavailable("window"))?
            .document()
            .ok_or(PageError::Unavailable("document"))?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn find(&self, element: PageElement) -> Result<Option<Element>, PageError> {
        match element {
            PageElement::Root => Ok(self.document.document_element()),
            _ => self
                .document
                .query_selector(element.selector())
                .map_err(PageError::from_js),
        }
    }

    fn require(&self, element: PageElement) -> Result<Element, PageError> {
        self.find(element)?
            .ok_or(PageError::MissingElement(element))
    }

    fn require_html(&self, element: PageElement) -> Result<HtmlElement, PageError> {
        self.require(element)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| PageError::Unavailable("HTML element"))
    }

    /// Resolve the bubble enclosing a copy control.
    pub fn bubble_text(&self, control: &Element) -> Result<BubbleText, PageError> {
        let bubble = control
            .closest(&format!(".{BUBBLE_CLASS}"))
            .map_err(PageError::from_js)?
            .ok_or(PageError::MissingAncestor(BUBBLE_CLASS))?;
        let markdown = bubble
            .query_selector(&format!(".{MARKDOWN_CONTENT_CLASS}"))
            .map_err(PageError::from_js)?
            .map(|content| rendered_text(&content));
        Ok(BubbleText {
            markdown,
            full: rendered_text(&bubble),
        })
    }
}

fn rendered_text(element: &Element) -> String {
    match element.dyn_ref::<HtmlElement>() {
        Some(html) => html.inner_text(),
        None => element.text_content().unwrap_or_default(),
    }
}

fn field_value(field: &Element) -> Result<String, PageError> {
    if let Some(textarea) = field.dyn_ref::<HtmlTextAreaElement>() {
        Ok(textarea.value())
    } else if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        Ok(input.value())
    } else {
        Err(PageError::Unavailable("form field"))
    }
}

fn set_field_value(field: &Element, value: &str) -> Result<(), PageError> {
    if let Some(textarea) = field.dyn_ref::<HtmlTextAreaElement>() {
        textarea.set_value(value);
        Ok(())
    } else if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
        Ok(())
    } else {
        Err(PageError::Unavailable("form field"))
    }
}

impl Page for DomPage {
    fn exists(&self, element: PageElement) -> Result<bool, PageError> {
        Ok(self.find(element)?.is_some())
    }

    fn has_class(&self, element: PageElement, class: &str) -> Result<bool, PageError> {
        Ok(self.require(element)?.class_list().contains(class))
    }

    fn get_attribute(
        &self,
        element: PageElement,
        name: &str,
    ) -> Result<Option<String>, PageError> {
        Ok(self.require(element)?.get_attribute(name))
    }

    fn value(&self, element: PageElement) -> Result<String, PageError> {
        field_value(&self.require(element)?)
    }

    fn is_focused(&self, element: PageElement) -> Result<bool, PageError> {
        let Some(active) = self.document.active_element() else {
            return Ok(false);
        };
        Ok(self
            .find(element)?
            .is_some_and(|target| target.is_same_node(Some(&*active))))
    }

    fn apply(&self, mutation: &Mutation) -> Result<(), PageError> {
        match mutation {
            Mutation::ScrollToBottom(target) => {
                let element = self.require(*target)?;
                element.set_scroll_top(element.scroll_height());
            }
            Mutation::Focus(target) => {
                self.require_html(*target)?
                    .focus()
                    .map_err(PageError::from_js)?;
            }
            Mutation::HighlightCode => highlight_all(),
            Mutation::SetAttribute {
                target,
                name,
                value,
            } => {
                let element = self.require(*target)?;
                match value {
                    Some(value) => element
                        .set_attribute(name, value)
                        .map_err(PageError::from_js)?,
                    None => element
                        .remove_attribute(name)
                        .map_err(PageError::from_js)?,
                }
            }
            Mutation::SetText { target, text } => {
                self.require(*target)?.set_text_content(Some(text.as_str()));
            }
            Mutation::SetStyle {
                target,
                property,
                value,
            } => {
                self.require_html(*target)?
                    .style()
                    .set_property(property, value)
                    .map_err(PageError::from_js)?;
            }
            Mutation::SetDisabled { target, disabled } => {
                let element = self.require(*target)?;
                let result = if *disabled {
                    element.set_attribute("disabled", "")
                } else {
                    element.remove_attribute("disabled")
                };
                result.map_err(PageError::from_js)?;
            }
            Mutation::SetValue { target, value } => {
                set_field_value(&self.require(*target)?, value)?;
            }
            Mutation::SetClass {
                target,
                class,
                present,
            } => {
                self.require(*target)?
                    .class_list()
                    .toggle_with_force(class, *present)
                    .map_err(PageError::from_js)?;
            }
            Mutation::Remove(target) => {
                if let Some(element) = self.find(*target)? {
                    element.remove();
                }
            }
            Mutation::Append {
                parent,
                class_name,
                html,
            } => {
                let parent = self.require(*parent)?;
                let node = self
                    .document
                    .create_element("div")
                    .map_err(PageError::from_js)?;
                node.set_class_name(class_name);
                node.set_inner_html(html);
                parent.append_child(&node).map_err(PageError::from_js)?;
            }
            Mutation::CreateOverlay => {
                if self.find(PageElement::SidebarOverlay)?.is_none() {
                    let body = self
                        .document
                        .body()
                        .ok_or(PageError::Unavailable("document body"))?;
                    let overlay = self
                        .document
                        .create_element("div")
                        .map_err(PageError::from_js)?;
                    if let Some(class_name) = PageElement::SidebarOverlay.class_name() {
                        overlay.set_class_name(class_name);
                    }
                    body.append_child(&overlay).map_err(PageError::from_js)?;
                }
            }
            Mutation::Submit(target) => {
                self.require(*target)?
                    .dyn_into::<HtmlFormElement>()
                    .map_err(|_| PageError::Unavailable("form element"))?
                    .submit()
                    .map_err(PageError::from_js)?;
            }
        }
        Ok(())
    }
}
