use shared_types::PageElement;
use wasm_bindgen::JsValue;

use crate::mutation::Mutation;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("page element {0} is missing")]
    MissingElement(PageElement),

    #[error("control is not inside a {0} element")]
    MissingAncestor(&'static str),

    #[error("{0} is unavailable")]
    Unavailable(&'static str),

    #[error("JavaScript error: {0}")]
    Js(String),
}

impl PageError {
    pub fn from_js(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Text a copy action can take from a message bubble.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BubbleText {
    /// Rendered text of the bubble's `.markdown-content`, when it has one.
    pub markdown: Option<String>,
    /// Rendered text of the whole bubble.
    pub full: String,
}

/// A rendered chat page: the reads handlers need plus a mutation sink.
pub trait Page {
    fn exists(&self, element: PageElement) -> Result<bool, PageError>;

    fn has_class(&self, element: PageElement, class: &str) -> Result<bool, PageError>;

    fn get_attribute(&self, element: PageElement, name: &str)
        -> Result<Option<String>, PageError>;

    /// Current value of a form field.
    fn value(&self, element: PageElement) -> Result<String, PageError>;

    fn is_focused(&self, element: PageElement) -> Result<bool, PageError>;

    fn apply(&self, mutation: &Mutation) -> Result<(), PageError>;

    /// Apply in order, stopping at the first failure.
    fn apply_all(&self, mutations: &[Mutation]) -> Result<(), PageError> {
        for mutation in mutations {
            self.apply(mutation)?;
        }
        Ok(())
    }
}
