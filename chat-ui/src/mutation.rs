//! Declarative page mutations.
//!
//! Handlers never touch the document themselves; they describe what should
//! change and a [`Page`](crate::page::Page) applies it.

use shared_types::PageElement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Set the element's scroll offset to its full content height.
    ScrollToBottom(PageElement),
    Focus(PageElement),
    /// Run syntax highlighting over every code block in the page.
    HighlightCode,
    /// Set an attribute, or remove it when `value` is `None`.
    SetAttribute {
        target: PageElement,
        name: &'static str,
        value: Option<String>,
    },
    SetText {
        target: PageElement,
        text: String,
    },
    SetStyle {
        target: PageElement,
        property: &'static str,
        value: &'static str,
    },
    SetDisabled {
        target: PageElement,
        disabled: bool,
    },
    /// Replace the value of a form field.
    SetValue {
        target: PageElement,
        value: String,
    },
    /// Force a class on or off.
    SetClass {
        target: PageElement,
        class: &'static str,
        present: bool,
    },
    /// Remove the element if it is present.
    Remove(PageElement),
    /// Append a `<div class="{class_name}">` holding `html` to `parent`.
    Append {
        parent: PageElement,
        class_name: &'static str,
        html: String,
    },
    /// Create the sidebar overlay under `<body>` unless it already exists.
    CreateOverlay,
    /// Submit the form natively, navigating away from the page.
    Submit(PageElement),
}

impl Mutation {
    /// The element the mutation requires, if any.
    pub fn target(&self) -> Option<PageElement> {
        match self {
            Mutation::ScrollToBottom(target)
            | Mutation::Focus(target)
            | Mutation::Remove(target)
            | Mutation::Submit(target)
            | Mutation::SetAttribute { target, .. }
            | Mutation::SetText { target, .. }
            | Mutation::SetStyle { target, .. }
            | Mutation::SetDisabled { target, .. }
            | Mutation::SetValue { target, .. }
            | Mutation::SetClass { target, .. } => Some(*target),
            Mutation::Append { parent, .. } => Some(*parent),
            Mutation::HighlightCode | Mutation::CreateOverlay => None,
        }
    }
}
