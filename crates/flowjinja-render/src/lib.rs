//! # Flowjinja Render - Per-Invocation Template Environment Assembly
//!
//! `flowjinja-render` is the rendering core behind the flowjinja graph node.
//! It resolves template names against an invocation-scoped snapshot of
//! graph-defined templates (falling back to ordered filesystem search roots),
//! keeps a mutable registry of pluggable filters, tag extensions, and global
//! values, and assembles a fresh MiniJinja environment for every processed
//! message.
//!
//! This crate contains no graph plumbing; the node-facing message pipeline
//! lives in the `flowjinja` crate. It can be used independently wherever
//! "rebuild the template universe per call" semantics are needed.
//!
//! ## Core Concepts
//!
//! - [`TemplateSnapshot`]: name→source mapping rebuilt from the host graph
//!   each invocation; later duplicates win
//! - [`TemplateLoader`]: two-tier resolution, snapshot first, then search
//!   roots in declared order; never caches
//! - [`ExtensionRegistry`]: runtime-registered filters, tag extensions, and
//!   globals, safely mutable from outside the render path
//! - [`EnvironmentBuilder`]: one fresh environment per invocation, with a
//!   point-in-time copy of the registry contents
//! - [`merge_context`]: shallow default ⊕ payload context merge
//!
//! ## Quick Start
//!
//! ```rust
//! use flowjinja_render::{
//!     EngineConfig, EnvironmentBuilder, ExtensionRegistry, TemplateDef, TemplateSnapshot,
//! };
//! use minijinja::Value;
//! use serde_json::json;
//!
//! let config = EngineConfig::new();
//! let registry = ExtensionRegistry::new();
//! registry
//!     .add_filter("upper", |value: Value, _args: &[Value]| {
//!         Ok(Value::from(value.to_string().to_uppercase()))
//!     })
//!     .unwrap();
//!
//! let snapshot = TemplateSnapshot::from_defs(vec![
//!     TemplateDef::new("partial", "from the graph"),
//! ]);
//!
//! let env = EnvironmentBuilder::new(&config, &registry).build(snapshot);
//! let output = env
//!     .render_str(
//!         "{{ x | upper }} / {% include 'partial' %}",
//!         Value::from_serialize(&json!({"x": "hi"})),
//!     )
//!     .unwrap();
//! assert_eq!(output, "HI / from the graph");
//! ```

pub mod config;
pub mod context;
pub mod environment;
pub mod error;
pub mod extensions;
pub mod loader;

pub use config::{EngineConfig, EngineOptions};
pub use context::merge_context;
pub use environment::EnvironmentBuilder;
pub use error::RenderError;
pub use extensions::{ExtensionRegistry, FilterFn, RegistryError, RegistrySnapshot, TagExtension};
pub use loader::{TemplateDef, TemplateLoader, TemplateSnapshot, TemplateSource};
