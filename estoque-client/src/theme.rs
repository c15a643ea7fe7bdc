//! Theme controller
//!
//! Keeps exactly one `tema-*` marker on the document root, persists the
//! choice in the durable store and broadcasts [`ThemeChanged`] so views
//! loaded independently can follow along.

use std::sync::{Mutex, PoisonError};

use shared::theme::MARKER_PREFIX;
use shared::{Theme, ThemeChanged};
use tokio::sync::broadcast;

use crate::store::DurableStore;

const EVENT_CAPACITY: usize = 16;

/// Whatever carries the theme marker classes (the document root)
pub trait ThemeSurface: Send {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
}

/// In-memory class list mirrored into the UI shell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Theme markers currently present
    pub fn theme_markers(&self) -> Vec<&str> {
        self.iter().filter(|c| c.starts_with(MARKER_PREFIX)).collect()
    }
}

impl ThemeSurface for ClassList {
    fn add_class(&mut self, class: &str) {
        if !self.contains(class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }
}

pub struct ThemeController<S: ThemeSurface = ClassList> {
    surface: Mutex<S>,
    store: DurableStore,
    events: broadcast::Sender<ThemeChanged>,
}

impl<S: ThemeSurface> ThemeController<S> {
    pub fn new(surface: S, store: DurableStore) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            surface: Mutex::new(surface),
            store,
            events,
        }
    }

    /// Listen for theme changes
    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChanged> {
        self.events.subscribe()
    }

    pub fn apply(&self, theme: Theme) {
        tracing::info!(theme = %theme, "applying theme");

        {
            let mut surface = self.surface.lock().unwrap_or_else(PoisonError::into_inner);
            for other in Theme::ALL {
                surface.remove_class(other.marker_class());
            }
            surface.add_class(theme.marker_class());
        }

        if let Err(e) = self.store.set_theme_token(theme.as_str()) {
            tracing::warn!(error = %e, "failed to persist theme preference");
        }

        // No subscribers is fine
        let _ = self.events.send(ThemeChanged { tema: theme });
    }

    /// Apply the stored theme, or the default when it is absent or invalid
    pub fn load(&self) -> Theme {
        let theme = self.current();
        self.apply(theme);
        theme
    }

    /// Stored theme without applying it. The token must match exactly.
    pub fn current(&self) -> Theme {
        match self.store.theme_token() {
            Ok(token) => Theme::from_token_or_default(token.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable theme preference, using default");
                Theme::DEFAULT
            }
        }
    }

    /// Inspect the surface, e.g. to mirror its classes into the UI
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let surface = self.surface.lock().unwrap_or_else(PoisonError::into_inner);
        f(&surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn controller(dir: &TempDir) -> ThemeController {
        ThemeController::new(
            ClassList::new(),
            DurableStore::new(dir.path().join("preferences.json")),
        )
    }

    #[test]
    fn test_load_without_preference_applies_dark() {
        let dir = TempDir::new().unwrap();
        let themes = controller(&dir);

        assert_eq!(themes.load(), Theme::Dark);
        themes.with_surface(|root| {
            assert_eq!(root.theme_markers(), vec!["tema-escuro"]);
        });
    }

    #[test]
    fn test_load_replaces_invalid_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        DurableStore::new(&path).set_theme_token("neon").unwrap();

        let themes = ThemeController::new(ClassList::new(), DurableStore::new(&path));
        assert_eq!(themes.load(), Theme::Dark);
        assert_eq!(
            DurableStore::new(&path).theme_token().unwrap().as_deref(),
            Some("escuro")
        );
    }

    #[test]
    fn test_stored_token_must_match_exactly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        DurableStore::new(&path).set_theme_token(" matrix").unwrap();

        let themes = ThemeController::new(ClassList::new(), DurableStore::new(&path));
        assert_eq!(themes.current(), Theme::Dark);
    }

    #[test]
    fn test_apply_recovers_from_corrupt_preferences() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"temaGlobal": "cla"#).unwrap();

        let themes = ThemeController::new(ClassList::new(), DurableStore::new(&path));
        assert_eq!(themes.current(), Theme::Dark);
        themes.apply(Theme::Light);
        assert_eq!(themes.current(), Theme::Light);
        themes.apply(Theme::Matrix);
        assert_eq!(themes.current(), Theme::Matrix);
    }

    #[test]
    fn test_load_restores_stored_theme() {
        let dir = TempDir::new().unwrap();
        controller(&dir).apply(Theme::Light);

        let themes = controller(&dir);
        assert_eq!(themes.current(), Theme::Light);
        assert_eq!(themes.load(), Theme::Light);
    }

    #[tokio::test]
    async fn test_apply_keeps_single_marker_and_notifies_in_order() {
        let dir = TempDir::new().unwrap();
        let themes = controller(&dir);
        let mut events = themes.subscribe();

        themes.apply(Theme::Matrix);
        themes.apply(Theme::Light);

        themes.with_surface(|root| {
            assert_eq!(root.theme_markers(), vec!["tema-claro"]);
        });
        assert_eq!(events.recv().await.unwrap().tema, Theme::Matrix);
        assert_eq!(events.recv().await.unwrap().tema, Theme::Light);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_other_classes_are_untouched() {
        let dir = TempDir::new().unwrap();
        let mut root = ClassList::new();
        root.add_class("menu");
        let themes = ThemeController::new(root, DurableStore::new(dir.path().join("p.json")));

        themes.apply(Theme::Matrix);
        themes.with_surface(|root| {
            assert!(root.contains("menu"));
            assert!(root.contains("tema-matrix"));
        });
    }
}
