//! # Flowjinja - Template Render Node for Dataflow Graphs
//!
//! Flowjinja is a processing node that turns messages into rendered text. It
//! holds a configured template body, collects named template fragments
//! defined elsewhere in the same graph, merges in runtime-registered
//! rendering extensions, and produces rendered output (or a readable error
//! string) for every inbound message.
//!
//! The rendering core lives in the `flowjinja-render` crate and is re-exported
//! here; this crate adds the message contract, the template catalog
//! abstraction the host graph implements, the per-message pipeline, and the
//! static editor suggestion table.
//!
//! ## Core Concepts
//!
//! - [`RenderNode`]: the node; one [`process`](RenderNode::process) call per
//!   inbound message
//! - [`TemplateCatalog`]: how the host exposes graph-defined templates;
//!   enumerated afresh every invocation
//! - [`ExtensionRegistry`]: filters, tag extensions, and globals registered
//!   at runtime from anywhere in the graph
//! - [`Message`]: payload in, rendered (or error) text out, everything else
//!   passed through
//! - [`RenderOutcome`]: side-band success/failure, since the payload itself
//!   is plain text either way
//!
//! ## Quick Start
//!
//! ```rust
//! use flowjinja::{EngineConfig, Message, RenderNode, TemplateDef};
//! use minijinja::Value;
//! use serde_json::json;
//!
//! let node = RenderNode::new(
//!     "{{ status | shout }}: {% include 'detail' %}",
//!     EngineConfig::new(),
//! );
//!
//! // Registered from anywhere that holds the registry handle.
//! node.registry()
//!     .add_filter("shout", |value: Value, _args: &[Value]| {
//!         Ok(Value::from(value.to_string().to_uppercase()))
//!     })
//!     .unwrap();
//!
//! // Template fragments defined elsewhere in the graph.
//! let graph = vec![TemplateDef::new("detail", "all systems nominal")];
//!
//! let emission = node.process(Message::new(json!({"status": "ok"})), &graph);
//! assert_eq!(emission.message.payload, json!("OK: all systems nominal"));
//! ```
//!
//! ## Fail-Soft Output
//!
//! A bad template never stops the flow: syntax errors, missing includes, and
//! raising filters all become the outgoing payload's text, and the message
//! still emits. Check [`Emission::outcome`] when an error must be told apart
//! from text that merely looks like one.

pub mod message;
pub mod node;
pub mod snippets;

pub use flowjinja_render::{
    merge_context, EngineConfig, EngineOptions, EnvironmentBuilder, ExtensionRegistry, FilterFn,
    RegistryError, RenderError, TagExtension, TemplateDef, TemplateLoader, TemplateSnapshot,
    TemplateSource,
};
pub use message::Message;
pub use node::{Emission, RenderNode, RenderOutcome, TemplateCatalog};
pub use snippets::{Snippet, SNIPPETS};
