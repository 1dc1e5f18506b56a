//! Per-invocation render environment assembly.
//!
//! [`EnvironmentBuilder`] constructs a fresh [`minijinja::Environment`] for
//! every processed message. Building from scratch each time is deliberate:
//! environments bind their template loader at construction, and the loader's
//! snapshot of graph-defined templates changes from one invocation to the
//! next. Reusing an environment would pin an invocation to stale template
//! sources.
//!
//! Construction order per invocation:
//!
//! 1. Apply the static engine options from [`EngineConfig`]
//! 2. Install a [`TemplateLoader`] bound to the just-rebuilt snapshot and the
//!    configured search roots
//! 3. Copy every currently-registered filter, tag extension, and global from
//!    the [`ExtensionRegistry`] into the environment
//!
//! Step 3 is a point-in-time copy. Registry mutations that land after the
//! copy affect the next invocation's environment, never one already built.

use minijinja::value::Rest;
use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};

use crate::config::{EngineConfig, EngineOptions};
use crate::extensions::ExtensionRegistry;
use crate::loader::{TemplateLoader, TemplateSnapshot};

/// Builds one fresh environment per invocation from the node's static
/// configuration and its extension registry.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentBuilder<'a> {
    config: &'a EngineConfig,
    registry: &'a ExtensionRegistry,
}

impl<'a> EnvironmentBuilder<'a> {
    /// Creates a builder over the node's configuration and registry.
    pub fn new(config: &'a EngineConfig, registry: &'a ExtensionRegistry) -> Self {
        Self { config, registry }
    }

    /// Constructs a new environment bound to the given template snapshot.
    ///
    /// The snapshot is consumed: it moves into the loader, which moves into
    /// the environment, tying its lifetime to this invocation.
    pub fn build(&self, snapshot: TemplateSnapshot) -> Environment<'static> {
        let mut env = Environment::new();
        apply_options(&mut env, &self.config.options);

        let loader = TemplateLoader::new(snapshot, self.config.folders.clone());
        env.set_loader(loader.into_engine_loader());

        let contents = self.registry.snapshot();
        for (name, filter) in contents.filters {
            env.add_filter(name, move |value: Value, args: Rest<Value>| {
                filter(value, &args.0)
            });
        }
        for (name, extension) in contents.extensions {
            env.add_function(name, move |args: Rest<Value>| extension.evaluate(&args.0));
        }
        for (name, value) in contents.globals {
            env.add_global(name, Value::from_serialize(&value));
        }

        env
    }
}

/// Applies the host's opaque option set to an environment.
fn apply_options(env: &mut Environment<'static>, options: &EngineOptions) {
    let escape = if options.autoescape {
        AutoEscape::Html
    } else {
        AutoEscape::None
    };
    env.set_auto_escape_callback(move |_name| escape);

    env.set_trim_blocks(options.trim_blocks);
    env.set_lstrip_blocks(options.lstrip_blocks);
    env.set_keep_trailing_newline(options.keep_trailing_newline);
    env.set_undefined_behavior(if options.strict_undefined {
        UndefinedBehavior::Strict
    } else {
        UndefinedBehavior::Lenient
    });
}
