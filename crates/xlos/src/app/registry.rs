//! Name to constructor mapping for apps.

use thiserror::Error;

use super::App;

/// Builds a fresh app instance.
pub type AppFactory = Box<dyn Fn() -> Box<dyn App>>;

/// Errors from the app registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No app is registered under this name.
    #[error("no app named '{0}' is registered")]
    UnknownApp(String),

    /// An app with this name is already registered.
    #[error("an app named '{0}' is already registered")]
    Duplicate(String),
}

/// An ordered set of constructible apps.
///
/// Iteration order is registration order; the start menu and the desktop
/// icons both list apps in this order.
#[derive(Default)]
pub struct AppRegistry {
    entries: Vec<(String, AppFactory)>,
}

impl AppRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Box<dyn App> + 'static,
    {
        let name = name.into();
        if self.contains(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.entries.push((name, Box::new(factory)));
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered.
    pub fn with<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn() -> Box<dyn App> + 'static,
    {
        if let Err(err) = self.register(name, factory) {
            panic!("{err}");
        }
        self
    }

    /// Whether an app is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Registered names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of registered apps.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Construct a new instance of the app registered under `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn App>, RegistryError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, factory)| factory())
            .ok_or_else(|| RegistryError::UnknownApp(name.to_owned()))
    }
}

impl std::fmt::Debug for AppRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppAction;
    use crate::input::RawEvent;
    use xlos_render::{Rect, Renderer};
    use xlos_style::RenderConfig;

    struct Blank(&'static str);

    impl App for Blank {
        fn name(&self) -> &str {
            self.0
        }

        fn handle_event(&mut self, _event: &RawEvent, _content: Rect) -> Option<AppAction> {
            None
        }

        fn draw(&mut self, _renderer: &mut dyn Renderer, _content: Rect, _config: &RenderConfig) {}
    }

    #[test]
    fn test_registry_order_and_lookup() {
        let registry = AppRegistry::new()
            .with("Beta", || Box::new(Blank("Beta")))
            .with("Alpha", || Box::new(Blank("Alpha")));

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Beta", "Alpha"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.create("Alpha").unwrap().name(), "Alpha");
        assert_eq!(
            registry.create("Gamma").err(),
            Some(RegistryError::UnknownApp("Gamma".to_owned()))
        );
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = AppRegistry::new();
        registry.register("Beta", || Box::new(Blank("Beta"))).unwrap();
        assert_eq!(
            registry.register("Beta", || Box::new(Blank("Beta"))),
            Err(RegistryError::Duplicate("Beta".to_owned()))
        );
    }

    #[test]
    fn test_each_create_is_a_fresh_instance() {
        use std::cell::Cell;
        use std::rc::Rc;

        let built = Rc::new(Cell::new(0));
        let counter = built.clone();
        let registry = AppRegistry::new().with("Beta", move || {
            counter.set(counter.get() + 1);
            Box::new(Blank("Beta"))
        });
        registry.create("Beta").unwrap();
        registry.create("Beta").unwrap();
        assert_eq!(built.get(), 2);
    }
}
