//! Page behavior as pure functions from what the page currently shows to
//! the mutations it should undergo.

use shared_types::{
    escape_html, PageElement, Sender, Theme, AVATAR_CLASS, BUBBLE_CLASS, OPEN_CLASS, SHOW_CLASS,
    THEME_ATTRIBUTE, USER_MESSAGE_CLASS,
};

use crate::mutation::Mutation;
use crate::page::BubbleText;

/// A key-down as far as the submit shortcut cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, shift: bool) -> Self {
        Self {
            key: key.into(),
            shift,
        }
    }

    /// Enter without Shift. Shift+Enter belongs to the browser.
    pub fn is_plain_enter(&self) -> bool {
        self.key == "Enter" && !self.shift
    }
}

pub fn scroll_to_bottom() -> Mutation {
    Mutation::ScrollToBottom(PageElement::ChatBox)
}

/// Root marker and button glyph for `theme`.
pub fn theme_mutations(theme: Theme) -> Vec<Mutation> {
    vec![
        Mutation::SetAttribute {
            target: PageElement::Root,
            name: THEME_ATTRIBUTE,
            value: theme.root_marker().map(str::to_string),
        },
        Mutation::SetText {
            target: PageElement::ThemeButton,
            text: theme.glyph().to_string(),
        },
    ]
}

pub fn bootstrap(theme: Theme) -> Vec<Mutation> {
    let mut mutations = vec![
        scroll_to_bottom(),
        Mutation::Focus(PageElement::UserInput),
        Mutation::HighlightCode,
    ];
    mutations.extend(theme_mutations(theme));
    mutations
}

/// Inner markup of an optimistically appended user message.
pub fn user_message_markup(text: &str) -> String {
    format!(
        r#"<div class="{AVATAR_CLASS}">{}</div><div class="{BUBBLE_CLASS}">{}</div>"#,
        Sender::User.avatar(),
        escape_html(text)
    )
}

pub fn show_loading(input_text: &str, has_welcome: bool) -> Vec<Mutation> {
    let mut mutations = vec![
        Mutation::SetStyle {
            target: PageElement::Loading,
            property: "display",
            value: "block",
        },
        Mutation::SetDisabled {
            target: PageElement::SendButton,
            disabled: true,
        },
        Mutation::SetStyle {
            target: PageElement::SendButton,
            property: "opacity",
            value: "0.5",
        },
    ];
    if has_welcome {
        mutations.push(Mutation::Remove(PageElement::Welcome));
    }
    mutations.push(Mutation::Append {
        parent: PageElement::ChatBox,
        class_name: USER_MESSAGE_CLASS,
        html: user_message_markup(input_text),
    });
    mutations.push(scroll_to_bottom());
    mutations
}

pub fn should_submit(key: &KeyPress, input_focused: bool, input_value: &str) -> bool {
    key.is_plain_enter() && input_focused && !input_value.trim().is_empty()
}

/// Native form submission followed by the optimistic append.
pub fn submit(input_text: &str, has_welcome: bool) -> Vec<Mutation> {
    let mut mutations = vec![Mutation::Submit(PageElement::ChatForm)];
    mutations.extend(show_loading(input_text, has_welcome));
    mutations
}

/// Prefer the rendered markdown over the bubble's full text.
pub fn copy_text(bubble: &BubbleText) -> &str {
    bubble.markdown.as_deref().unwrap_or(&bubble.full)
}

pub fn toast(visible: bool) -> Mutation {
    Mutation::SetClass {
        target: PageElement::CopyToast,
        class: SHOW_CLASS,
        present: visible,
    }
}

/// Flip the sidebar, forcing the overlay to the same state.
pub fn toggle_sidebar(sidebar_open: bool, overlay_exists: bool) -> Vec<Mutation> {
    let open = !sidebar_open;
    let mut mutations = Vec::with_capacity(3);
    if !overlay_exists {
        mutations.push(Mutation::CreateOverlay);
    }
    mutations.push(Mutation::SetClass {
        target: PageElement::Sidebar,
        class: OPEN_CLASS,
        present: open,
    });
    mutations.push(Mutation::SetClass {
        target: PageElement::SidebarOverlay,
        class: SHOW_CLASS,
        present: open,
    });
    mutations
}

pub fn fill_question(text: &str) -> Vec<Mutation> {
    vec![
        Mutation::SetValue {
            target: PageElement::UserInput,
            value: text.to_string(),
        },
        Mutation::Focus(PageElement::UserInput),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_light_theme_sets_marker() {
        let mutations = bootstrap(Theme::Light);
        assert_eq!(mutations[0], scroll_to_bottom());
        assert!(mutations.contains(&Mutation::Focus(PageElement::UserInput)));
        assert!(mutations.contains(&Mutation::HighlightCode));
        assert!(mutations.contains(&Mutation::SetAttribute {
            target: PageElement::Root,
            name: THEME_ATTRIBUTE,
            value: Some("light".to_string()),
        }));
    }

    #[test]
    fn test_dark_theme_removes_marker() {
        let mutations = theme_mutations(Theme::Dark);
        assert_eq!(
            mutations[0],
            Mutation::SetAttribute {
                target: PageElement::Root,
                name: THEME_ATTRIBUTE,
                value: None,
            }
        );
        assert_eq!(
            mutations[1],
            Mutation::SetText {
                target: PageElement::ThemeButton,
                text: Theme::Dark.glyph().to_string(),
            }
        );
    }

    #[test]
    fn test_user_markup_is_escaped() {
        let html = user_message_markup("Hello <b>world</b>");
        assert!(html.contains("Hello &lt;b&gt;world&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_show_loading_order() {
        let mutations = show_loading("hi", true);
        assert!(matches!(
            mutations[0],
            Mutation::SetStyle {
                target: PageElement::Loading,
                property: "display",
                value: "block"
            }
        ));
        assert_eq!(
            mutations[1],
            Mutation::SetDisabled {
                target: PageElement::SendButton,
                disabled: true
            }
        );
        assert_eq!(mutations[3], Mutation::Remove(PageElement::Welcome));
        assert!(matches!(mutations[4], Mutation::Append { .. }));
        assert_eq!(mutations.last(), Some(&scroll_to_bottom()));
    }

    #[test]
    fn test_show_loading_without_welcome_skips_removal() {
        let mutations = show_loading("hi", false);
        assert!(!mutations.contains(&Mutation::Remove(PageElement::Welcome)));
    }

    #[test]
    fn test_should_submit_rules() {
        let enter = KeyPress::new("Enter", false);
        assert!(should_submit(&enter, true, "hello"));
        assert!(!should_submit(&enter, false, "hello"));
        assert!(!should_submit(&enter, true, "   \n "));
        assert!(!should_submit(&KeyPress::new("Enter", true), true, "hello"));
        assert!(!should_submit(&KeyPress::new("a", false), true, "hello"));
    }

    #[test]
    fn test_submit_precedes_loading() {
        let mutations = submit("hi", false);
        assert_eq!(mutations[0], Mutation::Submit(PageElement::ChatForm));
        assert_eq!(mutations.len(), 1 + show_loading("hi", false).len());
    }

    #[test]
    fn test_copy_text_prefers_markdown() {
        let bubble = BubbleText {
            markdown: Some("code here".to_string()),
            full: "code here\nCopy".to_string(),
        };
        assert_eq!(copy_text(&bubble), "code here");

        let plain = BubbleText {
            markdown: None,
            full: "just text".to_string(),
        };
        assert_eq!(copy_text(&plain), "just text");
    }

    #[test]
    fn test_toggle_sidebar_creates_overlay_once() {
        let first = toggle_sidebar(false, false);
        assert_eq!(first[0], Mutation::CreateOverlay);

        let second = toggle_sidebar(true, true);
        assert!(!second.contains(&Mutation::CreateOverlay));
    }

    #[test]
    fn test_toggle_sidebar_keeps_overlay_in_lockstep() {
        for sidebar_open in [false, true] {
            let mutations = toggle_sidebar(sidebar_open, true);
            let states: Vec<bool> = mutations
                .iter()
                .filter_map(|mutation| match mutation {
                    Mutation::SetClass { present, .. } => Some(*present),
                    _ => None,
                })
                .collect();
            assert_eq!(states, vec![!sidebar_open, !sidebar_open]);
        }
    }

    #[test]
    fn test_fill_question_sets_value_then_focus() {
        assert_eq!(
            fill_question("What is Rust?"),
            vec![
                Mutation::SetValue {
                    target: PageElement::UserInput,
                    value: "What is Rust?".to_string(),
                },
                Mutation::Focus(PageElement::UserInput),
            ]
        );
    }
}
