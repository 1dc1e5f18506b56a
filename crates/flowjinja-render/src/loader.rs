//! Template resolution from graph-defined snapshots and filesystem search roots.
//!
//! This module provides [`TemplateSnapshot`], the name→source mapping rebuilt
//! from the host graph on every invocation, and [`TemplateLoader`], which
//! resolves template names against the snapshot first and an ordered list of
//! search roots second.
//!
//! # Resolution Order
//!
//! 1. Exact-match lookup in the snapshot (templates defined in the graph)
//! 2. Search roots probed in declared order; the first `root/name` that reads
//!    successfully wins
//! 3. `None` if neither tier has the name
//!
//! An unreadable file in a search root is treated the same as an absent one:
//! the probe moves on to the next root rather than surfacing a raw I/O error.
//!
//! # Freshness
//!
//! The loader never caches. Graph-defined templates may change between
//! invocations, so the snapshot is rebuilt and a new loader is bound into a
//! fresh environment each time a message is processed. Any caching layered on
//! top would silently serve stale content.
//!
//! # Example
//!
//! ```rust
//! use flowjinja_render::loader::{TemplateDef, TemplateLoader, TemplateSnapshot};
//!
//! let snapshot = TemplateSnapshot::from_defs(vec![
//!     TemplateDef::new("greeting", "Hello {{ name }}"),
//! ]);
//! let loader = TemplateLoader::new(snapshot, vec!["templates".into()]);
//!
//! let source = loader.get_source("greeting").unwrap();
//! assert_eq!(source.content, "Hello {{ name }}");
//! assert!(loader.get_source("missing").is_none());
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A named template definition discovered in the host graph.
///
/// Each template-definition entity in the graph exposes a name and a template
/// body; the snapshot is built by enumerating all of them per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDef {
    /// Resolution name, unique within one snapshot.
    pub name: String,
    /// Template body.
    pub source: String,
}

impl TemplateDef {
    /// Creates a new template definition.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Name→source mapping of the graph's template definitions.
///
/// Rebuilt from scratch at the start of every invocation and discarded at its
/// end. When two definitions share a name, the one enumerated later wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSnapshot {
    map: HashMap<String, String>,
}

impl TemplateSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from an ordered sequence of definitions.
    ///
    /// Later definitions overwrite earlier ones with the same name, matching
    /// the enumeration order of the host graph scan.
    pub fn from_defs(defs: impl IntoIterator<Item = TemplateDef>) -> Self {
        let mut snapshot = Self::new();
        for def in defs {
            snapshot.insert(def.name, def.source);
        }
        snapshot
    }

    /// Inserts a template, replacing any existing entry with the same name.
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.map.insert(name.into(), source.into());
    }

    /// Looks up a template body by exact name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(|s| s.as_str())
    }

    /// Returns true if the snapshot contains the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Returns the number of distinct template names in the snapshot.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the snapshot holds no templates.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Resolved template source text along with the name it resolved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// The template body.
    pub content: String,
    /// The resolution name (identical to the requested name; no rewriting).
    pub name: String,
}

/// Two-tier template resolver: snapshot first, then filesystem search roots.
///
/// A loader is bound into exactly one render environment and lives only as
/// long as that environment's invocation. It holds the snapshot by value, so
/// resolution never observes graph changes made after the snapshot was built.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    snapshot: TemplateSnapshot,
    roots: Vec<PathBuf>,
}

impl TemplateLoader {
    /// Creates a loader over a snapshot and an ordered list of search roots.
    ///
    /// Root order is resolution priority: the first root containing a readable
    /// `root/name` wins.
    pub fn new(snapshot: TemplateSnapshot, roots: Vec<PathBuf>) -> Self {
        Self { snapshot, roots }
    }

    /// Maps a requested name to its resolution identifier.
    ///
    /// This is the identity function: names are used verbatim, with no path
    /// rewriting relative to the requesting template.
    pub fn resolve<'a>(&self, name: &'a str) -> &'a str {
        name
    }

    /// Resolves a template name to its source text.
    ///
    /// Checks the snapshot first; on a miss, probes each search root in order
    /// and returns the first readable `root/name`. Returns `None` when both
    /// tiers are exhausted, which downstream surfaces as a distinct
    /// template-not-found failure rather than an empty string.
    pub fn get_source(&self, name: &str) -> Option<TemplateSource> {
        if let Some(content) = self.snapshot.get(name) {
            return Some(TemplateSource {
                content: content.to_string(),
                name: name.to_string(),
            });
        }

        for root in &self.roots {
            // A failed read (missing file, permissions, not valid UTF-8) means
            // "not in this root"; the probe continues down the list.
            if let Ok(content) = fs::read_to_string(root.join(name)) {
                return Some(TemplateSource {
                    content,
                    name: name.to_string(),
                });
            }
        }

        None
    }

    /// Consumes the loader, producing the closure form expected by
    /// [`minijinja::Environment::set_loader`].
    pub fn into_engine_loader(
        self,
    ) -> impl Fn(&str) -> Result<Option<String>, minijinja::Error> + Send + Sync + 'static {
        move |name| Ok(self.get_source(name).map(|source| source.content))
    }
}
