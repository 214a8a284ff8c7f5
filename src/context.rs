use std::fmt;

use crate::environment::Environment;

/// Variable holding the build context label.
pub const CONTEXT_KEY: &str = "CONTEXT";

/// Normalized build context, e.g. `PRODUCTION`, `DEPLOY_PREVIEW` or `BRANCH_DEPLOY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildContext(String);

impl BuildContext {
    /// Uppercases the label and turns `-` into `_`.
    pub fn new(label: &str) -> Self {
        Self(label.to_uppercase().replace('-', "_"))
    }

    /// Reads `CONTEXT` from `env`. `None` when the variable is absent.
    pub fn from_env(env: &Environment) -> Option<Self> {
        env.get(CONTEXT_KEY).map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
