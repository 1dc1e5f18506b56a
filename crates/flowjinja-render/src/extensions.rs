//! Runtime-registered filters, tag extensions, and global values.
//!
//! This module provides [`ExtensionRegistry`], the mutable registration
//! surface through which other parts of the graph plug rendering behavior
//! into a node. The registry holds three name-keyed maps:
//!
//! - Filters: value transforms applied with pipe syntax (`{{ x | shout }}`)
//! - Tag extensions: named handlers invoked as callables from template
//!   syntax (`{{ badge("ok") }}`)
//! - Globals: values injected into every environment, independent of the
//!   per-message context
//!
//! Registering under an existing name replaces the previous entry; removal
//! deletes the key. Lookups are by exact name only.
//!
//! # Sharing and Concurrency
//!
//! The registry is owned by the node instance and handed out as
//! `Arc<ExtensionRegistry>`, so registration calls can come from outside the
//! render path while invocations are in flight. Each map sits behind its own
//! `RwLock`; a mutation racing the environment builder's [`snapshot`]
//! copy may be observed in one map but not another. Callers needing strict
//! isolation must serialize registry mutations with invocations themselves.
//!
//! [`snapshot`]: ExtensionRegistry::snapshot
//!
//! # Example
//!
//! ```rust
//! use flowjinja_render::extensions::ExtensionRegistry;
//! use minijinja::Value;
//!
//! let registry = ExtensionRegistry::new();
//! registry
//!     .add_filter("shout", |value: Value, _args: &[Value]| {
//!         Ok(Value::from(value.to_string().to_uppercase()))
//!     })
//!     .unwrap();
//!
//! assert!(registry.get_filter("shout").is_some());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use minijinja::Value;

/// A registered filter: `(value, args) -> value`.
///
/// Filters receive the piped value plus any extra call arguments and produce
/// a new value, or a `minijinja::Error` that the render boundary catches.
pub type FilterFn = Arc<dyn Fn(Value, &[Value]) -> Result<Value, minijinja::Error> + Send + Sync>;

/// A pluggable handler for custom template constructs.
///
/// Extensions are installed into each render environment as named callables;
/// invoking the name from template syntax evaluates the extension with the
/// call arguments. An evaluation error is caught at the render boundary like
/// any other runtime failure.
pub trait TagExtension: Send + Sync {
    /// Evaluates the extension with the arguments from the template call site.
    fn evaluate(&self, args: &[Value]) -> Result<Value, minijinja::Error>;
}

impl<F> TagExtension for F
where
    F: Fn(&[Value]) -> Result<Value, minijinja::Error> + Send + Sync,
{
    fn evaluate(&self, args: &[Value]) -> Result<Value, minijinja::Error> {
        self(args)
    }
}

/// Error type for registration operations.
///
/// Contract violations are rejected when an entry is registered, not later
/// when a render happens to exercise it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registration name was empty.
    EmptyName,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::EmptyName => write!(f, "registration name must not be empty"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Point-in-time copy of the registry's three maps.
///
/// Produced by [`ExtensionRegistry::snapshot`] and consumed by the
/// environment builder. Mutations made to the registry after the copy do not
/// affect environments built from it.
#[derive(Default, Clone)]
pub struct RegistrySnapshot {
    /// Registered filters by name.
    pub filters: HashMap<String, FilterFn>,
    /// Registered tag extensions by name.
    pub extensions: HashMap<String, Arc<dyn TagExtension>>,
    /// Registered global values by name.
    pub globals: HashMap<String, serde_json::Value>,
}

/// Mutable registry of filters, tag extensions, and global values.
///
/// Created once when the node instance is instantiated; persists across
/// invocations until the node is reinitialized, at which point [`clear`]
/// empties all three maps.
///
/// [`clear`]: ExtensionRegistry::clear
#[derive(Default)]
pub struct ExtensionRegistry {
    filters: RwLock<HashMap<String, FilterFn>>,
    extensions: RwLock<HashMap<String, Arc<dyn TagExtension>>>,
    globals: RwLock<HashMap<String, serde_json::Value>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() {
        return Err(RegistryError::EmptyName);
    }
    Ok(())
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a filter, replacing any existing filter with the same name.
    pub fn add_filter<F>(&self, name: impl Into<String>, filter: F) -> Result<(), RegistryError>
    where
        F: Fn(Value, &[Value]) -> Result<Value, minijinja::Error> + Send + Sync + 'static,
    {
        let name = name.into();
        validate_name(&name)?;
        write(&self.filters).insert(name, Arc::new(filter));
        Ok(())
    }

    /// Looks up a filter by exact name.
    pub fn get_filter(&self, name: &str) -> Option<FilterFn> {
        read(&self.filters).get(name).cloned()
    }

    /// Registers a tag extension, replacing any existing one with the same name.
    pub fn add_extension<E>(&self, name: impl Into<String>, extension: E) -> Result<(), RegistryError>
    where
        E: TagExtension + 'static,
    {
        let name = name.into();
        validate_name(&name)?;
        write(&self.extensions).insert(name, Arc::new(extension));
        Ok(())
    }

    /// Looks up a tag extension by exact name.
    pub fn get_extension(&self, name: &str) -> Option<Arc<dyn TagExtension>> {
        read(&self.extensions).get(name).cloned()
    }

    /// Returns whether an extension is registered under the given name.
    ///
    /// Presence only; an extension that evaluates to a falsy value still
    /// counts as registered.
    pub fn has_extension(&self, name: &str) -> bool {
        read(&self.extensions).contains_key(name)
    }

    /// Removes an extension, returning it if it was registered.
    pub fn remove_extension(&self, name: &str) -> Option<Arc<dyn TagExtension>> {
        write(&self.extensions).remove(name)
    }

    /// Registers a global value, replacing any existing one with the same name.
    pub fn add_global(
        &self,
        name: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        validate_name(&name)?;
        write(&self.globals).insert(name, value);
        Ok(())
    }

    /// Looks up a global value by exact name.
    pub fn get_global(&self, name: &str) -> Option<serde_json::Value> {
        read(&self.globals).get(name).cloned()
    }

    /// Empties all three maps, as happens when the node is reinitialized.
    pub fn clear(&self) {
        write(&self.filters).clear();
        write(&self.extensions).clear();
        write(&self.globals).clear();
    }

    /// Copies the current contents of all three maps.
    ///
    /// The three locks are taken one after another, so a concurrent mutation
    /// can land between copies and be observed in one map but not another.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            filters: read(&self.filters).clone(),
            extensions: read(&self.extensions).clone(),
            globals: read(&self.globals).clone(),
        }
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("filters", &read(&self.filters).keys().collect::<Vec<_>>())
            .field(
                "extensions",
                &read(&self.extensions).keys().collect::<Vec<_>>(),
            )
            .field("globals", &read(&self.globals).keys().collect::<Vec<_>>())
            .finish()
    }
}
