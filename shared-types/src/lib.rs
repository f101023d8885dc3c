//! Shared types between the page server and the page controller
//!
//! These types are used by both:
//! - the axum server that renders the chat page (native Rust)
//! - the page controller that drives it in the browser (WASM)
//!
//! Every element id, class and data attribute the controller touches is
//! declared here, so the template and the controller cannot drift apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Theme
// ============================================================================

/// Storage key holding the persisted theme flag.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Attribute on the document root that switches the stylesheet to light mode.
pub const THEME_ATTRIBUTE: &str = "data-theme";

pub const MOON_GLYPH: &str = "\u{1F319}";
pub const SUN_GLYPH: &str = "\u{2600}\u{FE0F}";

/// Display mode selector, persisted across reloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Interpret a stored value. Anything other than `"light"` is dark.
    pub fn parse(stored: Option<&str>) -> Self {
        match stored {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Glyph shown on the theme button while this theme is active.
    pub fn glyph(self) -> &'static str {
        match self {
            Theme::Dark => MOON_GLYPH,
            Theme::Light => SUN_GLYPH,
        }
    }

    /// Value of [`THEME_ATTRIBUTE`] on the root element; `None` means absent.
    pub fn root_marker(self) -> Option<&'static str> {
        match self {
            Theme::Dark => None,
            Theme::Light => Some("light"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Page contract
// ============================================================================

pub const BUBBLE_CLASS: &str = "bubble";
pub const MARKDOWN_CONTENT_CLASS: &str = "markdown-content";
pub const AVATAR_CLASS: &str = "avatar";
pub const USER_MESSAGE_CLASS: &str = "message user-msg";
pub const ASSISTANT_MESSAGE_CLASS: &str = "message bot-msg";

/// Class toggled on the sidebar while it is open.
pub const OPEN_CLASS: &str = "open";
/// Class toggled on the overlay and the copy toast while they are visible.
pub const SHOW_CLASS: &str = "show";

/// How long the "copied" toast stays visible.
pub const COPY_TOAST_DURATION_MS: u32 = 2000;

/// Elements the page controller relies on.
///
/// The server template must render every variant except
/// [`PageElement::SidebarOverlay`], which the controller creates lazily,
/// and [`PageElement::Welcome`], which is only present on an empty transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageElement {
    /// The document root (`<html>`), carrier of [`THEME_ATTRIBUTE`].
    Root,
    UserInput,
    ChatBox,
    Loading,
    SendButton,
    CopyToast,
    ChatForm,
    Sidebar,
    SidebarOverlay,
    ThemeButton,
    Welcome,
}

impl PageElement {
    /// Elements a rendered page must contain for the controller to work.
    pub const REQUIRED: [PageElement; 8] = [
        PageElement::UserInput,
        PageElement::ChatBox,
        PageElement::Loading,
        PageElement::SendButton,
        PageElement::CopyToast,
        PageElement::ChatForm,
        PageElement::Sidebar,
        PageElement::ThemeButton,
    ];

    pub fn id(self) -> Option<&'static str> {
        match self {
            PageElement::UserInput => Some("userInput"),
            PageElement::ChatBox => Some("chatBox"),
            PageElement::Loading => Some("loading"),
            PageElement::SendButton => Some("sendBtn"),
            PageElement::CopyToast => Some("copyToast"),
            PageElement::ChatForm => Some("chatForm"),
            PageElement::Sidebar => Some("sidebar"),
            PageElement::Root
            | PageElement::SidebarOverlay
            | PageElement::ThemeButton
            | PageElement::Welcome => None,
        }
    }

    pub fn class_name(self) -> Option<&'static str> {
        match self {
            PageElement::SidebarOverlay => Some("sidebar-overlay"),
            PageElement::ThemeButton => Some("theme-btn"),
            PageElement::Welcome => Some("welcome"),
            _ => None,
        }
    }

    /// CSS selector locating the element in a rendered document.
    pub fn selector(self) -> &'static str {
        match self {
            PageElement::Root => ":root",
            PageElement::UserInput => "#userInput",
            PageElement::ChatBox => "#chatBox",
            PageElement::Loading => "#loading",
            PageElement::SendButton => "#sendBtn",
            PageElement::CopyToast => "#copyToast",
            PageElement::ChatForm => "#chatForm",
            PageElement::Sidebar => "#sidebar",
            PageElement::SidebarOverlay => ".sidebar-overlay",
            PageElement::ThemeButton => ".theme-btn",
            PageElement::Welcome => "#chatBox .welcome",
        }
    }
}

impl fmt::Display for PageElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Attribute naming the action a clickable control triggers.
pub const ACTION_ATTRIBUTE: &str = "data-action";
/// Attribute carrying the suggestion text of a [`PageAction::Fill`] control.
pub const QUESTION_ATTRIBUTE: &str = "data-question";

/// Click actions declared on controls via [`ACTION_ATTRIBUTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageAction {
    Copy,
    ToggleTheme,
    ToggleSidebar,
    Fill,
}

impl PageAction {
    pub fn as_str(self) -> &'static str {
        match self {
            PageAction::Copy => "copy",
            PageAction::ToggleTheme => "toggle-theme",
            PageAction::ToggleSidebar => "toggle-sidebar",
            PageAction::Fill => "fill",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown page action '{}'", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for PageAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "copy" => Ok(PageAction::Copy),
            "toggle-theme" => Ok(PageAction::ToggleTheme),
            "toggle-sidebar" => Ok(PageAction::ToggleSidebar),
            "fill" => Ok(PageAction::Fill),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

// ============================================================================
// Chat form / transcript
// ============================================================================

pub const CHAT_ROUTE: &str = "/chat";
pub const USER_MESSAGE_FIELD: &str = "user_message";

/// Body of the `#chatForm` post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatForm {
    pub user_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn avatar(self) -> &'static str {
        match self {
            Sender::User => "\u{1F464}",
            Sender::Assistant => "\u{1F916}",
        }
    }

    pub fn message_class(self) -> &'static str {
        match self {
            Sender::User => USER_MESSAGE_CLASS,
            Sender::Assistant => ASSISTANT_MESSAGE_CLASS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

/// Messages rendered into one page response. Empty means the welcome screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn exchange(user_message: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(user_message), ChatMessage::assistant(reply)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// ============================================================================
// Escaping
// ============================================================================

/// Escape text for insertion into markup, in element content or attribute
/// values alike.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// ============================================================================
// Tests
// ============================================================================
