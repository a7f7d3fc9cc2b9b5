//! Handler registry
//!
//! Maps resource type keys to [`ResourceHandler`]s. The handler stored under
//! `""` is the fallback for [`HandlerRegistry::lookup_or_default`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::handlers::{DefaultHandler, KeyVaultHandler, StorageAccountHandler};
use crate::traits::ResourceHandler;

/// Key of the fallback handler.
pub const DEFAULT_TYPE_KEY: &str = "";

/// Thread-safe handler registry.
///
/// Lookups take a shared lock, registration an exclusive one. Handlers are
/// handed out as `Arc`s so no lock is held while they run.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, Arc<dyn ResourceHandler>>>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default, storage account and key vault handlers.
    #[must_use]
    pub fn with_builtin_handlers() -> Self {
        let registry = Self::new();
        registry.register_handler(Arc::new(DefaultHandler));
        registry.register_handler(Arc::new(StorageAccountHandler));
        registry.register_handler(Arc::new(KeyVaultHandler));
        registry
    }

    /// Store `handler` under `type_key`, replacing any previous one.
    pub fn register(&self, type_key: impl Into<String>, handler: Arc<dyn ResourceHandler>) {
        let type_key = type_key.into();
        let previous = self.handlers.write().insert(type_key.clone(), handler);
        if previous.is_some() {
            log::info!("Replaced handler for resource type '{type_key}'");
        }
    }

    /// Store `handler` under its own type key.
    pub fn register_handler(&self, handler: Arc<dyn ResourceHandler>) {
        let type_key = handler.resource_type().to_string();
        self.register(type_key, handler);
    }

    /// The handler registered for exactly `type_key`.
    pub fn lookup_exact(&self, type_key: &str) -> CoreResult<Arc<dyn ResourceHandler>> {
        self.handlers
            .read()
            .get(type_key)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(type_key.to_string()))
    }

    /// The handler for `type_key`, else the default handler.
    pub fn lookup_or_default(&self, type_key: &str) -> CoreResult<Arc<dyn ResourceHandler>> {
        let handlers = self.handlers.read();
        handlers
            .get(type_key)
            .or_else(|| handlers.get(DEFAULT_TYPE_KEY))
            .cloned()
            .ok_or_else(|| CoreError::NotFound(type_key.to_string()))
    }

    /// Non-default type keys listable from the summary, sorted.
    pub fn supported_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .handlers
            .read()
            .iter()
            .filter(|(key, handler)| !key.is_empty() && handler.can_list_from_summary())
            .map(|(key, _)| key.clone())
            .collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<String> = self.handlers.read().keys().cloned().collect();
        keys.sort();
        f.debug_struct("HandlerRegistry")
            .field("types", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{KEY_VAULT_TYPE, STORAGE_ACCOUNT_TYPE};
    use crate::traits::Action;

    struct Named {
        key: &'static str,
        name: &'static str,
        listable: bool,
    }

    impl ResourceHandler for Named {
        fn resource_type(&self) -> &str {
            self.key
        }
        fn display_name(&self) -> &str {
            self.name
        }
        fn actions(&self) -> Vec<Action> {
            Vec::new()
        }
        fn can_list_from_summary(&self) -> bool {
            self.listable
        }
        fn can_explore(&self) -> bool {
            false
        }
    }

    fn named(key: &'static str, name: &'static str) -> Arc<dyn ResourceHandler> {
        Arc::new(Named {
            key,
            name,
            listable: true,
        })
    }

    #[test]
    fn test_fallback_to_default() {
        let registry = HandlerRegistry::new();
        registry.register("", named("", "Fallback"));
        registry.register("TypeX", named("TypeX", "Type X"));

        let handler = registry.lookup_or_default("TypeY").unwrap();
        assert_eq!(handler.display_name(), "Fallback");
        assert!(matches!(
            registry.lookup_exact("TypeY"),
            Err(CoreError::NotFound(key)) if key == "TypeY"
        ));
        assert_eq!(
            registry.lookup_exact("TypeX").unwrap().display_name(),
            "Type X"
        );
    }

    #[test]
    fn test_no_default_is_not_found() {
        let registry = HandlerRegistry::new();
        registry.register("TypeX", named("TypeX", "Type X"));
        assert!(matches!(
            registry.lookup_or_default("TypeY"),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_register_overwrites() {
        let registry = HandlerRegistry::new();
        registry.register("TypeX", named("TypeX", "First"));
        registry.register("TypeX", named("TypeX", "Second"));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.lookup_exact("TypeX").unwrap().display_name(),
            "Second"
        );
    }

    #[test]
    fn test_builtin_handlers() {
        let registry = HandlerRegistry::with_builtin_handlers();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.supported_types(),
            vec![KEY_VAULT_TYPE.to_string(), STORAGE_ACCOUNT_TYPE.to_string()]
        );
        assert_eq!(
            registry
                .lookup_or_default("Microsoft.Web/sites")
                .unwrap()
                .display_name(),
            "Resources"
        );
    }

    #[test]
    fn test_supported_types_skips_unlistable() {
        let registry = HandlerRegistry::new();
        registry.register_handler(named("B", "B"));
        registry.register_handler(named("A", "A"));
        registry.register_handler(Arc::new(Named {
            key: "Hidden",
            name: "Hidden",
            listable: false,
        }));
        assert_eq!(registry.supported_types(), vec!["A", "B"]);
    }

    #[test]
    fn test_concurrent_lookup_and_register() {
        let registry = Arc::new(HandlerRegistry::with_builtin_handlers());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let handler = registry.lookup_or_default(STORAGE_ACCOUNT_TYPE).unwrap();
                        assert_eq!(handler.resource_type(), STORAGE_ACCOUNT_TYPE);
                    }
                })
            })
            .collect();
        let writer = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for _ in 0..500 {
                    registry.register_handler(Arc::new(StorageAccountHandler));
                }
            })
        };

        for reader in readers {
            reader.join().unwrap();
        }
        writer.join().unwrap();
        assert_eq!(registry.len(), 3);
    }
}
