//! The template render node and its per-message pipeline.
//!
//! [`RenderNode`] holds a configured inline template body, static engine
//! configuration, and the extension registry that outlives individual
//! invocations. Each inbound message runs the same five stages:
//!
//! 1. Collect: enumerate the graph's template definitions into a fresh
//!    [`TemplateSnapshot`]
//! 2. Build: assemble a new environment from the snapshot, search roots, and
//!    a point-in-time copy of the registry
//! 3. Merge: layer the message payload over the configured default context
//! 4. Render: evaluate the node's template body against the merged context
//! 5. Emit: hand the message on, payload replaced by the result
//!
//! # Failure Containment
//!
//! Render is the single failure boundary. Syntax errors, unresolvable
//! includes, undefined references, and raising filters or extensions are all
//! caught there; none aborts the invocation or the process. On a caught
//! failure the outgoing payload is the failure's descriptive text and the
//! message still emits. The typed error travels side-band in
//! [`RenderOutcome`], so callers that need to distinguish outcomes can,
//! without changing the fail-soft payload contract.
//!
//! # Example
//!
//! ```rust
//! use flowjinja::{EngineConfig, Message, RenderNode, TemplateDef};
//! use serde_json::json;
//!
//! let node = RenderNode::new("Hello {{ who }}!", EngineConfig::new());
//! let graph = vec![TemplateDef::new("unused", "")];
//!
//! let emission = node.process(Message::new(json!({"who": "world"})), &graph);
//! assert_eq!(emission.message.payload, json!("Hello world!"));
//! assert!(emission.outcome.is_rendered());
//! ```

use std::sync::Arc;

use flowjinja_render::{
    merge_context, EngineConfig, EnvironmentBuilder, ExtensionRegistry, RenderError, TemplateDef,
    TemplateSnapshot,
};
use serde_json::Value;

use crate::message::Message;

/// A source of template definitions, implemented by the host graph.
///
/// The node enumerates definitions afresh on every invocation, so changes to
/// the graph between messages are always visible to the next render. When
/// two definitions share a name, the later one in enumeration order wins.
pub trait TemplateCatalog {
    /// Returns all template definitions currently present in the graph.
    fn template_defs(&self) -> Vec<TemplateDef>;
}

impl TemplateCatalog for [TemplateDef] {
    fn template_defs(&self) -> Vec<TemplateDef> {
        self.to_vec()
    }
}

impl TemplateCatalog for Vec<TemplateDef> {
    fn template_defs(&self) -> Vec<TemplateDef> {
        self.clone()
    }
}

/// How one invocation's render concluded.
///
/// The emitted payload is plain text either way; this side-band result is
/// what lets callers tell the difference.
#[derive(Debug)]
pub enum RenderOutcome {
    /// The template evaluated successfully.
    Rendered(String),
    /// A failure was caught at the render boundary.
    Failed(RenderError),
}

impl RenderOutcome {
    /// Returns true if the render succeeded.
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered(_))
    }

    /// The text that became the outgoing payload: rendered output on
    /// success, the failure's description otherwise.
    pub fn into_text(self) -> String {
        match self {
            RenderOutcome::Rendered(text) => text,
            RenderOutcome::Failed(err) => err.to_string(),
        }
    }
}

/// One invocation's output: the outgoing message plus the typed outcome.
#[derive(Debug)]
pub struct Emission {
    /// The message to send downstream, payload already replaced.
    pub message: Message,
    /// Side-band success/failure result for this invocation.
    pub outcome: RenderOutcome,
}

/// A graph node that renders its configured template per inbound message.
pub struct RenderNode {
    template: String,
    config: EngineConfig,
    registry: Arc<ExtensionRegistry>,
}

impl RenderNode {
    /// Creates a node with an inline template body and static engine
    /// configuration. The extension registry starts empty.
    pub fn new(template: impl Into<String>, config: EngineConfig) -> Self {
        Self {
            template: template.into(),
            config,
            registry: Arc::new(ExtensionRegistry::new()),
        }
    }

    /// The node's extension registry handle.
    ///
    /// Clones of this `Arc` are the registration surface reachable from
    /// outside the render path; mutations through any clone are visible to
    /// subsequent invocations.
    pub fn registry(&self) -> Arc<ExtensionRegistry> {
        Arc::clone(&self.registry)
    }

    /// The node's configured template body.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Reinitializes the node, emptying all three registry maps.
    ///
    /// Existing registry handles stay valid and observe the cleared state.
    pub fn reinitialize(&self) {
        self.registry.clear();
    }

    /// Processes one inbound message through the five-stage pipeline.
    ///
    /// Never panics and never returns an error: every failure the render can
    /// produce is converted into the outgoing payload text.
    pub fn process(&self, msg: Message, catalog: &(impl TemplateCatalog + ?Sized)) -> Emission {
        // Collect: full graph scan, freshness over throughput.
        let snapshot = TemplateSnapshot::from_defs(catalog.template_defs());

        // Build: fresh environment bound to this invocation's snapshot.
        let env = EnvironmentBuilder::new(&self.config, &self.registry).build(snapshot);

        // Merge: defaults under payload, shallow.
        let context = merge_context(&self.config.globals, &msg.payload);

        // Render: the single failure boundary.
        let outcome = match env.render_str(
            &self.template,
            minijinja::Value::from_serialize(&context),
        ) {
            Ok(text) => RenderOutcome::Rendered(text),
            Err(err) => RenderOutcome::Failed(RenderError::from(err)),
        };

        // Emit: payload replaced, everything else passed through.
        let mut message = msg;
        message.payload = Value::String(match &outcome {
            RenderOutcome::Rendered(text) => text.clone(),
            RenderOutcome::Failed(err) => err.to_string(),
        });

        Emission { message, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn no_templates() -> Vec<TemplateDef> {
        Vec::new()
    }

    // =========================================================================
    // Success path
    // =========================================================================

    #[test]
    fn test_process_renders_payload_fields() {
        let node = RenderNode::new("{{ greeting }}, {{ name }}", EngineConfig::new());
        let msg = Message::new(json!({"greeting": "Hi", "name": "Ada"}));

        let emission = node.process(msg, &no_templates());

        assert!(emission.outcome.is_rendered());
        assert_eq!(emission.message.payload, json!("Hi, Ada"));
    }

    #[test]
    fn test_process_preserves_metadata() {
        let node = RenderNode::new("out", EngineConfig::new());
        let msg = Message::new(json!({})).with_meta("topic", json!("alerts"));

        let emission = node.process(msg, &no_templates());

        assert_eq!(emission.message.metadata.get("topic"), Some(&json!("alerts")));
    }

    #[test]
    fn test_process_merges_defaults_under_payload() {
        let mut config = EngineConfig::new();
        config.globals.insert("a".into(), json!("default-a"));
        config.globals.insert("b".into(), json!("default-b"));

        let node = RenderNode::new("{{ a }}/{{ b }}", config);
        let emission = node.process(Message::new(json!({"b": "payload-b"})), &no_templates());

        assert_eq!(emission.message.payload, json!("default-a/payload-b"));
    }

    #[test]
    fn test_process_includes_graph_template() {
        let node = RenderNode::new("-> {% include 'frag' %}", EngineConfig::new());
        let graph = vec![TemplateDef::new("frag", "fragment body")];

        let emission = node.process(Message::new(json!({})), &graph);

        assert_eq!(emission.message.payload, json!("-> fragment body"));
    }

    // =========================================================================
    // Failure containment
    // =========================================================================

    #[test]
    fn test_syntax_failure_emits_error_text() {
        let node = RenderNode::new("{% if %}", EngineConfig::new());
        let emission = node.process(Message::new(json!({})), &no_templates());

        let RenderOutcome::Failed(err) = &emission.outcome else {
            panic!("expected failure outcome");
        };
        assert!(matches!(err, RenderError::Syntax(_)));
        assert_eq!(emission.message.payload, json!(err.to_string()));
    }

    #[test]
    fn test_unresolvable_include_emits_error_text() {
        let node = RenderNode::new("{% include 'ghost' %}", EngineConfig::new());
        let emission = node.process(Message::new(json!({})), &no_templates());

        let RenderOutcome::Failed(err) = &emission.outcome else {
            panic!("expected failure outcome");
        };
        assert!(matches!(err, RenderError::TemplateNotFound(_)));
        assert_eq!(emission.message.payload, json!(err.to_string()));
    }

    #[test]
    fn test_unknown_filter_emits_error_text() {
        let node = RenderNode::new("{{ x | no_such_filter }}", EngineConfig::new());
        let emission = node.process(Message::new(json!({"x": 1})), &no_templates());

        assert!(!emission.outcome.is_rendered());
        let payload = emission.message.payload.as_str().unwrap();
        assert!(payload.contains("no_such_filter"));
    }

    #[test]
    fn test_raising_filter_is_contained() {
        let node = RenderNode::new("{{ x | explode }}", EngineConfig::new());
        node.registry()
            .add_filter("explode", |_v, _a: &[minijinja::Value]| {
                Err(minijinja::Error::new(
                    minijinja::ErrorKind::InvalidOperation,
                    "boom",
                ))
            })
            .unwrap();

        let emission = node.process(Message::new(json!({"x": 1})), &no_templates());

        let RenderOutcome::Failed(err) = &emission.outcome else {
            panic!("expected failure outcome");
        };
        assert!(matches!(err, RenderError::Runtime(_)));
        assert!(emission.message.payload.as_str().unwrap().contains("boom"));
    }

    // =========================================================================
    // Registry lifecycle
    // =========================================================================

    #[test]
    fn test_registry_filter_visible_to_later_invocations() {
        let node = RenderNode::new("{{ x | upper }}", EngineConfig::new());
        node.registry()
            .add_filter("upper", |value: minijinja::Value, _a: &[minijinja::Value]| {
                Ok(minijinja::Value::from(value.to_string().to_uppercase()))
            })
            .unwrap();

        let emission = node.process(Message::new(json!({"x": "hi"})), &no_templates());
        assert_eq!(emission.message.payload, json!("HI"));
    }

    #[test]
    fn test_reinitialize_clears_registry() {
        let node = RenderNode::new("x", EngineConfig::new());
        let registry = node.registry();
        registry.add_global("g", json!(1)).unwrap();
        registry
            .add_extension("e", |_: &[minijinja::Value]| Ok(minijinja::Value::from(())))
            .unwrap();

        node.reinitialize();

        assert!(registry.get_global("g").is_none());
        assert!(!registry.has_extension("e"));
    }

    #[test]
    fn test_outcome_into_text() {
        let rendered = RenderOutcome::Rendered("ok".into());
        assert_eq!(rendered.into_text(), "ok");

        let failed = RenderOutcome::Failed(RenderError::TemplateNotFound("x".into()));
        assert!(failed.into_text().contains("template not found"));
    }
}
