use shared_types::{Theme, THEME_STORAGE_KEY};

use crate::storage::KeyValueStore;

/// Owns the theme flag and keeps it in step with its backing store.
#[derive(Debug)]
pub struct ThemeController<S> {
    store: S,
    current: Theme,
}

impl<S: KeyValueStore> ThemeController<S> {
    /// Read the persisted flag once, defaulting to dark.
    pub fn load(store: S) -> Self {
        let current = Theme::parse(store.get_item(THEME_STORAGE_KEY).as_deref());
        Self { store, current }
    }

    pub fn get(&self) -> Theme {
        self.current
    }

    /// Replace the flag and persist it.
    pub fn set(&mut self, theme: Theme) -> Theme {
        self.current = theme;
        self.store.set_item(THEME_STORAGE_KEY, theme.as_str());
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_load_defaults_to_dark_without_writing() {
        let controller = ThemeController::load(MemoryStore::default());
        assert_eq!(controller.get(), Theme::Dark);
        assert!(controller.store().is_empty());
    }

    #[test]
    fn test_load_reads_persisted_light() {
        let controller = ThemeController::load(MemoryStore::with_entry(THEME_STORAGE_KEY, "light"));
        assert_eq!(controller.get(), Theme::Light);
    }

    #[test]
    fn test_set_persists_each_transition() {
        let store = MemoryStore::default();
        let mut controller = ThemeController::load(store.clone());

        assert_eq!(controller.set(Theme::Light), Theme::Light);
        assert_eq!(controller.get(), Theme::Light);
        assert_eq!(store.get_item(THEME_STORAGE_KEY).as_deref(), Some("light"));

        assert_eq!(controller.set(Theme::Dark), Theme::Dark);
        assert_eq!(store.get_item(THEME_STORAGE_KEY).as_deref(), Some("dark"));
    }
}
