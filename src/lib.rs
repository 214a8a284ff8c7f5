//! Resolve `$NAME` references between environment variables before a build runs.
//!
//! Given `DEPLOY_PRIME_URL=https://deploy-preview-0.netlify.app` and
//! `AUTH0_REDIRECT_DOMAIN=$DEPLOY_PRIME_URL/callback`, one pass turns the latter
//! into `https://deploy-preview-0.netlify.app/callback`.
//!
//! The pass is off unless `ENABLE_NETLIFY_PLUGIN_DYNAMIC_REPLACE_ENV=true`, or the
//! same key suffixed with the build context (`..._DEPLOY_PREVIEW=true`) matches
//! the current `CONTEXT`.

pub mod errors;
pub mod context;
pub mod activation;
pub mod environment;
pub mod engine;
pub mod options;
pub mod output;

use tracing::{debug, info};

pub use activation::{Activation, ENABLE_KEY};
pub use context::{BuildContext, CONTEXT_KEY};
pub use engine::{replace_env, ReplaceReport, Replacement};
pub use environment::Environment;
pub use errors::{EnvError, Result};
pub use options::PluginOptions;

/// Pre-build hook. Returns `true` when the substitution pass ran and `false`
/// when it was skipped because no toggle enabled it.
pub fn on_pre_build(env: &mut Environment, options: Option<&PluginOptions>) -> bool {
    run(env, options).is_some()
}

/// Same as [`on_pre_build`] but hands back the report of what was rewritten.
/// `None` means the pass was skipped and `env` is untouched.
pub fn run(env: &mut Environment, _options: Option<&PluginOptions>) -> Option<ReplaceReport> {
    // Unset CONTEXT stays `None`: only the global toggle applies, there is no
    // `..._UNDEFINED` key to look up.
    let context = BuildContext::from_env(env);
    let activation = activation::resolve(env, context.as_ref());
    // APP_ENV=test silences every report line
    let quiet = env.is_test_mode();

    if !activation.is_enabled() {
        if !quiet {
            info!("Skip dynamic replace env plugin. Set env {ENABLE_KEY} to enable it.");
        }
        return None;
    }

    if !quiet {
        debug!(?activation, context = ?context.as_ref().map(BuildContext::as_str), "dynamic replace env enabled");
    }

    let report = engine::replace_env(env);
    // APP_ENV itself may have just been resolved to `test`
    if !env.is_test_mode() {
        report.log();
    }
    Some(report)
}

/// Runs the hook against the real process environment and writes rewritten
/// variables back to it.
pub fn run_process_env(options: Option<&PluginOptions>) -> bool {
    let mut env = Environment::from_process();
    match run(&mut env, options) {
        Some(report) => {
            env.apply_to_process(report.changed_keys());
            true
        }
        None => false,
    }
}
