//! The interactive page controller.
//!
//! Each public method is one user-facing behavior. It reads what it needs
//! from the [`Page`], asks [`handlers`] for the mutations and applies them.
//! A failure aborts only the behavior that hit it.

use std::cell::RefCell;
use std::rc::Rc;

use shared_types::{PageElement, Theme, COPY_TOAST_DURATION_MS, OPEN_CLASS, THEME_ATTRIBUTE};

use crate::handlers::{self, KeyPress};
use crate::page::{BubbleText, Page, PageError};
use crate::services::{Clipboard, Timers};
use crate::storage::KeyValueStore;
use crate::theme::ThemeController;

pub struct PageController<P> {
    page: Rc<P>,
    theme: RefCell<ThemeController<Box<dyn KeyValueStore>>>,
    clipboard: Box<dyn Clipboard>,
    timers: Box<dyn Timers>,
}

impl<P: Page + 'static> PageController<P> {
    pub fn new(
        page: P,
        store: Box<dyn KeyValueStore>,
        clipboard: Box<dyn Clipboard>,
        timers: Box<dyn Timers>,
    ) -> Self {
        Self {
            page: Rc::new(page),
            theme: RefCell::new(ThemeController::load(store)),
            clipboard,
            timers,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn theme(&self) -> Theme {
        self.theme.borrow().get()
    }

    /// Initial load: reveal the newest message, focus the input, highlight
    /// code and restore the persisted theme.
    pub fn bootstrap(&self) -> Result<(), PageError> {
        let theme = self.theme();
        log::debug!("Bootstrapping chat page with {theme} theme");
        self.page.apply_all(&handlers::bootstrap(theme))
    }

    pub fn scroll_to_bottom(&self) -> Result<(), PageError> {
        self.page.apply(&handlers::scroll_to_bottom())
    }

    /// Loading state plus the optimistic user bubble.
    pub fn show_loading(&self) -> Result<(), PageError> {
        let text = self.page.value(PageElement::UserInput)?;
        let has_welcome = self.page.exists(PageElement::Welcome)?;
        self.page.apply_all(&handlers::show_loading(&text, has_welcome))
    }

    /// Enter-to-submit. Returns whether the form was submitted.
    pub fn handle_key(&self, key: &KeyPress) -> Result<bool, PageError> {
        // An absent input is never focused, so a page without one ignores Enter.
        if !key.is_plain_enter() || !self.page.is_focused(PageElement::UserInput)? {
            return Ok(false);
        }
        let text = self.page.value(PageElement::UserInput)?;
        if !handlers::should_submit(key, true, &text) {
            return Ok(false);
        }
        let has_welcome = self.page.exists(PageElement::Welcome)?;
        self.page.apply_all(&handlers::submit(&text, has_welcome))?;
        Ok(true)
    }

    /// Copy a bubble's text, then flash the toast.
    ///
    /// A rejected clipboard write is returned before anything on the page
    /// changes.
    pub async fn copy_message(&self, bubble: &BubbleText) -> Result<(), PageError> {
        let text = handlers::copy_text(bubble).to_string();
        self.clipboard.write_text(&text).await?;

        self.page.apply(&handlers::toast(true))?;
        let page = Rc::clone(&self.page);
        self.timers.after(
            COPY_TOAST_DURATION_MS,
            Box::new(move || {
                if let Err(err) = page.apply(&handlers::toast(false)) {
                    log::warn!("Failed to hide copy toast: {err}");
                }
            }),
        );
        Ok(())
    }

    /// Flip between dark and light, starting from what the document root
    /// currently shows. The flag is persisted only once the page reflects it.
    pub fn toggle_theme(&self) -> Result<Theme, PageError> {
        let shown = self.page.get_attribute(PageElement::Root, THEME_ATTRIBUTE)?;
        let next = Theme::parse(shown.as_deref()).toggled();
        self.page.apply_all(&handlers::theme_mutations(next))?;
        let theme = self.theme.borrow_mut().set(next);
        log::debug!("Theme switched to {theme}");
        Ok(theme)
    }

    pub fn toggle_sidebar(&self) -> Result<(), PageError> {
        let open = self.page.has_class(PageElement::Sidebar, OPEN_CLASS)?;
        let overlay_exists = self.page.exists(PageElement::SidebarOverlay)?;
        self.page.apply_all(&handlers::toggle_sidebar(open, overlay_exists))
    }

    pub fn fill_question(&self, text: &str) -> Result<(), PageError> {
        self.page.apply_all(&handlers::fill_question(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPage;
    use crate::services::{ManualTimers, RecordingClipboard};
    use crate::storage::MemoryStore;
    use shared_types::SHOW_CLASS;

    fn controller(page: MemoryPage) -> PageController<MemoryPage> {
        PageController::new(
            page,
            Box::new(MemoryStore::default()),
            Box::new(RecordingClipboard::default()),
            Box::new(ManualTimers::default()),
        )
    }

    #[test]
    fn test_toggle_theme_without_button_keeps_flag() {
        let controller = controller(MemoryPage::new().without(PageElement::ThemeButton));
        let err = controller.toggle_theme().unwrap_err();
        assert_eq!(err, PageError::MissingElement(PageElement::ThemeButton));
        assert_eq!(controller.theme(), Theme::Dark);
    }

    #[test]
    fn test_plain_enter_without_input_is_ignored() {
        let controller = controller(MemoryPage::new().without(PageElement::UserInput));
        assert_eq!(controller.handle_key(&KeyPress::new("Enter", false)), Ok(false));
        assert_eq!(controller.page().submissions(), 0);
    }

    #[test]
    fn test_toggle_sidebar_without_sidebar_creates_nothing() {
        let controller = controller(MemoryPage::new().without(PageElement::Sidebar));
        assert!(controller.toggle_sidebar().is_err());
        assert_eq!(controller.page().overlays_created(), 0);
    }

    #[test]
    fn test_handle_key_ignores_other_keys_without_reading_page() {
        let controller = controller(MemoryPage::new().without(PageElement::UserInput));
        assert_eq!(controller.handle_key(&KeyPress::new("a", false)), Ok(false));
        assert_eq!(controller.handle_key(&KeyPress::new("Enter", true)), Ok(false));
    }

    #[test]
    fn test_show_loading_from_send_button() {
        let controller = controller(MemoryPage::new());
        controller
            .page()
            .type_into(PageElement::UserInput, "clicked send");
        controller.show_loading().unwrap();

        let page = controller.page();
        assert_eq!(page.submissions(), 0);
        assert_eq!(page.appended().len(), 1);
        assert!(!page.exists(PageElement::Welcome).unwrap());
        assert!(!page.has_class(PageElement::CopyToast, SHOW_CLASS).unwrap());
    }
}
