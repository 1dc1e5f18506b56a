//! End-to-end pipeline tests: graph catalog, filesystem search roots,
//! runtime registration, and failure containment working together.

use std::io::Write;

use flowjinja::{EngineConfig, Message, RenderNode, RenderOutcome, TemplateDef};
use minijinja::Value;
use serde_json::json;
use tempfile::TempDir;

fn no_templates() -> Vec<TemplateDef> {
    Vec::new()
}

fn write_template(dir: &TempDir, name: &str, content: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut file = std::fs::File::create(path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
}

#[test]
fn graph_templates_shadow_search_roots() {
    let dir = TempDir::new().unwrap();
    write_template(&dir, "frag", "from disk");

    let mut config = EngineConfig::new();
    config.folders.push(dir.path().to_path_buf());

    let node = RenderNode::new("{% include 'frag' %}", config);

    // Graph definition wins over the file with the same name.
    let graph = vec![TemplateDef::new("frag", "from graph")];
    let emission = node.process(Message::new(json!({})), &graph);
    assert_eq!(emission.message.payload, json!("from graph"));

    // Without the graph definition, the search root serves it.
    let emission = node.process(Message::new(json!({})), &no_templates());
    assert_eq!(emission.message.payload, json!("from disk"));
}

#[test]
fn catalog_changes_visible_on_next_invocation() {
    let node = RenderNode::new("{% include 'banner' %}", EngineConfig::new());

    let first = vec![TemplateDef::new("banner", "v1")];
    assert_eq!(
        node.process(Message::new(json!({})), &first).message.payload,
        json!("v1")
    );

    // The definition set changed between messages; no stale caching allowed.
    let second = vec![TemplateDef::new("banner", "v2")];
    assert_eq!(
        node.process(Message::new(json!({})), &second).message.payload,
        json!("v2")
    );

    // Removed entirely: resolution failure, contained and emitted as text.
    let emission = node.process(Message::new(json!({})), &no_templates());
    assert!(!emission.outcome.is_rendered());
    assert!(emission
        .message
        .payload
        .as_str()
        .unwrap()
        .contains("banner"));
}

#[test]
fn duplicate_catalog_names_last_wins() {
    let node = RenderNode::new("{% include 'frag' %}", EngineConfig::new());
    let graph = vec![
        TemplateDef::new("frag", "first"),
        TemplateDef::new("frag", "second"),
    ];

    let emission = node.process(Message::new(json!({})), &graph);
    assert_eq!(emission.message.payload, json!("second"));
}

#[test]
fn removed_extension_absent_from_later_environments() {
    let node = RenderNode::new("{{ stamp() }}", EngineConfig::new());
    let registry = node.registry();
    registry
        .add_extension("stamp", |_: &[Value]| Ok(Value::from("stamped")))
        .unwrap();

    let emission = node.process(Message::new(json!({})), &no_templates());
    assert_eq!(emission.message.payload, json!("stamped"));

    registry.remove_extension("stamp");
    assert!(!registry.has_extension("stamp"));

    let emission = node.process(Message::new(json!({})), &no_templates());
    assert!(matches!(emission.outcome, RenderOutcome::Failed(_)));
}

#[test]
fn registry_mutation_between_invocations() {
    let node = RenderNode::new("{{ greeting | decorate }}", EngineConfig::new());
    let registry = node.registry();

    registry
        .add_filter("decorate", |value: Value, _args: &[Value]| {
            Ok(Value::from(format!("* {} *", value)))
        })
        .unwrap();
    let emission = node.process(Message::new(json!({"greeting": "hi"})), &no_templates());
    assert_eq!(emission.message.payload, json!("* hi *"));

    // Re-registering under the same name replaces the behavior.
    registry
        .add_filter("decorate", |value: Value, _args: &[Value]| {
            Ok(Value::from(format!("- {} -", value)))
        })
        .unwrap();
    let emission = node.process(Message::new(json!({"greeting": "hi"})), &no_templates());
    assert_eq!(emission.message.payload, json!("- hi -"));
}

#[test]
fn default_context_layered_under_payload() {
    let mut config = EngineConfig::new();
    config.globals.insert("site".into(), json!("example.org"));
    config.globals.insert("user".into(), json!("anonymous"));

    let node = RenderNode::new("{{ user }}@{{ site }}", config);
    let emission = node.process(Message::new(json!({"user": "ada"})), &no_templates());

    assert_eq!(emission.message.payload, json!("ada@example.org"));
}

#[test]
fn registry_globals_available_without_context() {
    let node = RenderNode::new("build {{ build_id }}", EngineConfig::new());
    node.registry().add_global("build_id", json!(417)).unwrap();

    let emission = node.process(Message::new(json!("not an object")), &no_templates());
    assert_eq!(emission.message.payload, json!("build 417"));
}

#[test]
fn metadata_passes_through_failure_and_success() {
    let node = RenderNode::new("{{ x | missing_filter }}", EngineConfig::new());
    let msg = Message::new(json!({"x": 1}))
        .with_meta("topic", json!("alerts"))
        .with_meta("_msgid", json!("m-1"));

    let emission = node.process(msg, &no_templates());

    assert!(!emission.outcome.is_rendered());
    assert_eq!(emission.message.metadata.get("topic"), Some(&json!("alerts")));
    assert_eq!(emission.message.metadata.get("_msgid"), Some(&json!("m-1")));
}

#[test]
fn search_root_order_is_priority() {
    let primary = TempDir::new().unwrap();
    let fallback = TempDir::new().unwrap();
    write_template(&primary, "page", "primary wins");
    write_template(&fallback, "page", "fallback");
    write_template(&fallback, "only_here", "fallback only");

    let mut config = EngineConfig::new();
    config.folders.push(primary.path().to_path_buf());
    config.folders.push(fallback.path().to_path_buf());

    let node = RenderNode::new(
        "{% include 'page' %} / {% include 'only_here' %}",
        config,
    );
    let emission = node.process(Message::new(json!({})), &no_templates());

    assert_eq!(emission.message.payload, json!("primary wins / fallback only"));
}

#[test]
fn error_payload_equals_engine_description() {
    let node = RenderNode::new("{{ 1 | nope }}", EngineConfig::new());
    let emission = node.process(Message::new(json!({})), &no_templates());

    let RenderOutcome::Failed(err) = &emission.outcome else {
        panic!("expected failure");
    };
    assert_eq!(emission.message.payload, json!(err.to_string()));
}

#[test]
fn graph_fragment_can_use_registered_filter() {
    let node = RenderNode::new("{% include 'loud' %}", EngineConfig::new());
    node.registry()
        .add_filter("upper", |value: Value, _args: &[Value]| {
            Ok(Value::from(value.to_string().to_uppercase()))
        })
        .unwrap();

    let graph = vec![TemplateDef::new("loud", "{{ word | upper }}")];
    let emission = node.process(Message::new(json!({"word": "quiet"})), &graph);

    assert_eq!(emission.message.payload, json!("QUIET"));
}
