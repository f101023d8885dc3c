//! A rendering-engine-free [`Page`] that keeps just enough document state
//! to observe what the controller did.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};

use shared_types::{PageElement, BUBBLE_CLASS};

use crate::mutation::Mutation;
use crate::page::{Page, PageError};

/// A `<div>` appended through [`Mutation::Append`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendedNode {
    pub parent: PageElement,
    pub class_name: String,
    pub html: String,
}

impl AppendedNode {
    /// Text a browser would render for the node's `.bubble`.
    ///
    /// Bubble content comes from escaped text, so it holds no tags and ends
    /// at the bubble's closing tag.
    pub fn bubble_text(&self) -> Option<String> {
        let open = format!(r#"class="{BUBBLE_CLASS}">"#);
        let start = self.html.find(&open)? + open.len();
        let rest = &self.html[start..];
        let end = rest.find('<').unwrap_or(rest.len());
        Some(decode_entities(&rest[..end]))
    }
}

fn decode_entities(markup: &str) -> String {
    markup
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

#[derive(Debug, Default)]
struct Document {
    present: HashSet<PageElement>,
    classes: HashMap<PageElement, BTreeSet<String>>,
    attributes: HashMap<(PageElement, &'static str), String>,
    texts: HashMap<PageElement, String>,
    styles: HashMap<(PageElement, &'static str), String>,
    disabled: HashSet<PageElement>,
    values: HashMap<PageElement, String>,
    focused: Option<PageElement>,
    appended: Vec<AppendedNode>,
    scrolls: usize,
    highlights: usize,
    overlays_created: usize,
    submissions: usize,
}

impl Document {
    fn require(&self, element: PageElement) -> Result<(), PageError> {
        if self.present.contains(&element) {
            Ok(())
        } else {
            Err(PageError::MissingElement(element))
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryPage {
    doc: RefCell<Document>,
}

impl MemoryPage {
    /// A freshly served page: every required element plus the welcome
    /// placeholder, theme button showing the dark glyph.
    pub fn new() -> Self {
        let page = Self::default();
        {
            let mut doc = page.doc.borrow_mut();
            doc.present.insert(PageElement::Root);
            doc.present.extend(PageElement::REQUIRED);
            doc.present.insert(PageElement::Welcome);
            doc.texts.insert(
                PageElement::ThemeButton,
                shared_types::Theme::Dark.glyph().to_string(),
            );
        }
        page
    }

    /// Drop an element, as a template that omits it would.
    pub fn without(self, element: PageElement) -> Self {
        self.doc.borrow_mut().present.remove(&element);
        self
    }

    /// Type into a field and leave focus on it.
    pub fn type_into(&self, element: PageElement, text: &str) {
        let mut doc = self.doc.borrow_mut();
        doc.values.insert(element, text.to_string());
        doc.focused = Some(element);
    }

    pub fn blur(&self) {
        self.doc.borrow_mut().focused = None;
    }

    pub fn focused(&self) -> Option<PageElement> {
        self.doc.borrow().focused
    }

    pub fn attribute(&self, element: PageElement, name: &str) -> Option<String> {
        self.doc
            .borrow()
            .attributes
            .iter()
            .find(|((el, attr), _)| *el == element && *attr == name)
            .map(|(_, value)| value.clone())
    }

    pub fn text(&self, element: PageElement) -> Option<String> {
        self.doc.borrow().texts.get(&element).cloned()
    }

    pub fn style(&self, element: PageElement, property: &str) -> Option<String> {
        self.doc
            .borrow()
            .styles
            .iter()
            .find(|((el, prop), _)| *el == element && *prop == property)
            .map(|(_, value)| value.clone())
    }

    pub fn is_disabled(&self, element: PageElement) -> bool {
        self.doc.borrow().disabled.contains(&element)
    }

    pub fn appended(&self) -> Vec<AppendedNode> {
        self.doc.borrow().appended.clone()
    }

    pub fn scrolls(&self) -> usize {
        self.doc.borrow().scrolls
    }

    pub fn highlights(&self) -> usize {
        self.doc.borrow().highlights
    }

    pub fn overlays_created(&self) -> usize {
        self.doc.borrow().overlays_created
    }

    pub fn submissions(&self) -> usize {
        self.doc.borrow().submissions
    }
}

impl Page for MemoryPage {
    fn exists(&self, element: PageElement) -> Result<bool, PageError> {
        Ok(self.doc.borrow().present.contains(&element))
    }

    fn has_class(&self, element: PageElement, class: &str) -> Result<bool, PageError> {
        let doc = self.doc.borrow();
        doc.require(element)?;
        Ok(doc
            .classes
            .get(&element)
            .is_some_and(|classes| classes.contains(class)))
    }

    fn get_attribute(
        &self,
        element: PageElement,
        name: &str,
    ) -> Result<Option<String>, PageError> {
        self.doc.borrow().require(element)?;
        Ok(self.attribute(element, name))
    }

    fn value(&self, element: PageElement) -> Result<String, PageError> {
        let doc = self.doc.borrow();
        doc.require(element)?;
        Ok(doc.values.get(&element).cloned().unwrap_or_default())
    }

    fn is_focused(&self, element: PageElement) -> Result<bool, PageError> {
        Ok(self.doc.borrow().focused == Some(element))
    }

    fn apply(&self, mutation: &Mutation) -> Result<(), PageError> {
        let mut doc = self.doc.borrow_mut();
        if let Some(target) = mutation.target() {
            if !matches!(mutation, Mutation::Remove(_)) {
                doc.require(target)?;
            }
        }

        match mutation {
            Mutation::ScrollToBottom(_) => doc.scrolls += 1,
            Mutation::Focus(target) => doc.focused = Some(*target),
            Mutation::HighlightCode => doc.highlights += 1,
            Mutation::SetAttribute {
                target,
                name,
                value,
            } => match value {
                Some(value) => {
                    doc.attributes.insert((*target, *name), value.clone());
                }
                None => {
                    doc.attributes.remove(&(*target, *name));
                }
            },
            Mutation::SetText { target, text } => {
                doc.texts.insert(*target, text.clone());
            }
            Mutation::SetStyle {
                target,
                property,
                value,
            } => {
                doc.styles.insert((*target, *property), value.to_string());
            }
            Mutation::SetDisabled { target, disabled } => {
                if *disabled {
                    doc.disabled.insert(*target);
                } else {
                    doc.disabled.remove(target);
                }
            }
            Mutation::SetValue { target, value } => {
                doc.values.insert(*target, value.clone());
            }
            Mutation::SetClass {
                target,
                class,
                present,
            } => {
                let classes = doc.classes.entry(*target).or_default();
                if *present {
                    classes.insert(class.to_string());
                } else {
                    classes.remove(*class);
                }
            }
            Mutation::Remove(target) => {
                doc.present.remove(target);
            }
            Mutation::Append {
                parent,
                class_name,
                html,
            } => doc.appended.push(AppendedNode {
                parent: *parent,
                class_name: class_name.to_string(),
                html: html.clone(),
            }),
            Mutation::CreateOverlay => {
                if doc.present.insert(PageElement::SidebarOverlay) {
                    doc.overlays_created += 1;
                }
            }
            Mutation::Submit(_) => doc.submissions += 1,
        }
        Ok(())
    }
}
