use itertools::Itertools;
use std::cmp::Reverse;
use tracing::info;

use crate::environment::Environment;

/// A rewritten variable and the variables whose tokens matched in it,
/// longest key first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub target: String,
    pub sources: Vec<String>,
}

/// Outcome of one substitution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceReport {
    pub replacements: Vec<Replacement>,
}

impl ReplaceReport {
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    pub fn changed_keys(&self) -> impl Iterator<Item = &str> {
        self.replacements.iter().map(|r| r.target.as_str())
    }

    pub fn log(&self) {
        if self.is_empty() {
            info!("Nothing found... keeping default ENVs");
            return;
        }
        for r in &self.replacements {
            info!("Found {} for {}. Replacing values.", r.sources.join(", "), r.target);
        }
        info!("Replaced {} ENVs", self.len());
        for r in &self.replacements {
            info!("{} - {}", r.target, r.sources.join(", "));
        }
    }
}

/// `$KEY`
pub fn token(key: &str) -> String {
    format!("${key}")
}

/// Runs a single substitution pass over `env`, in place.
///
/// Every target is visited in insertion order. Source keys are tried longest
/// first so `$FOO2` resolves to `FOO2` before `FOO` gets a chance to match its
/// prefix. Each match is a literal replace-all on the value as it stands after
/// the previous match; inserted text is never re-scanned and source values are
/// read as they are at that moment. Tokens naming absent keys are left alone.
pub fn replace_env(env: &mut Environment) -> ReplaceReport {
    let sources: Vec<String> = env
        .keys()
        .sorted_by_key(|k| Reverse(k.len()))
        .map(str::to_owned)
        .collect();
    let targets: Vec<String> = env.keys().map(str::to_owned).collect();
    let mut report = ReplaceReport::default();

    for target in targets {
        let Some(mut value) = env.get(&target).map(str::to_owned) else {
            continue;
        };

        let found: Vec<String> = sources
            .iter()
            .filter(|s| value.contains(&token(s)))
            .cloned()
            .collect();
        if found.is_empty() {
            continue;
        }

        for source in &found {
            let replacement = if *source == target {
                value.clone()
            } else {
                env.get(source).unwrap_or_default().to_owned()
            };
            value = value.replace(&token(source), &replacement);
        }

        env.set(target.clone(), value);
        report.replacements.push(Replacement { target, sources: found });
    }

    report
}
