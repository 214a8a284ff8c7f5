use crate::context::BuildContext;
use crate::environment::Environment;

/// Global toggle. Set to `true` to run the pass in every context.
pub const ENABLE_KEY: &str = "ENABLE_NETLIFY_PLUGIN_DYNAMIC_REPLACE_ENV";

const ENABLED: &str = "true";

/// Why the pass runs, or that it doesn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// [`ENABLE_KEY`] is `true`.
    Global,
    /// The context-suffixed toggle is `true`.
    Context,
    Disabled,
}

impl Activation {
    pub fn is_enabled(self) -> bool {
        !matches!(self, Activation::Disabled)
    }
}

/// Toggle scoped to one build context, e.g.
/// `ENABLE_NETLIFY_PLUGIN_DYNAMIC_REPLACE_ENV_DEPLOY_PREVIEW`.
pub fn context_key(context: &BuildContext) -> String {
    format!("{ENABLE_KEY}_{context}")
}

/// Checks the global toggle first, then the one for `context`.
/// Only the literal string `true` counts as set. Without a context only the
/// global toggle is consulted.
pub fn resolve(env: &Environment, context: Option<&BuildContext>) -> Activation {
    if flag(env, ENABLE_KEY) {
        Activation::Global
    } else if context.is_some_and(|c| flag(env, &context_key(c))) {
        Activation::Context
    } else {
        Activation::Disabled
    }
}

pub fn is_enabled(env: &Environment, context: Option<&BuildContext>) -> bool {
    resolve(env, context).is_enabled()
}

fn flag(env: &Environment, key: &str) -> bool {
    env.get(key) == Some(ENABLED)
}
