use clap::ValueEnum;
use indexmap::IndexMap;

use crate::errors::Result;

/// How resolved variables are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `export KEY='value'`, ready for `eval`
    Shell,
    /// `KEY="value"`
    Dotenv,
    /// A JSON object
    Json,
}

/// Renders `vars` in the given format. Order is kept as passed in.
pub fn render(vars: &[(&str, &str)], format: Format) -> Result<String> {
    let out = match format {
        Format::Shell => vars
            .iter()
            .map(|(k, v)| format!("export {k}={}\n", shell_quote(v)))
            .collect(),
        Format::Dotenv => vars
            .iter()
            .map(|(k, v)| format!("{k}=\"{}\"\n", dotenv_escape(v)))
            .collect(),
        Format::Json => {
            let map: IndexMap<&str, &str> = vars.iter().copied().collect();
            serde_json::to_string_pretty(&map)? + "\n"
        }
    };
    Ok(out)
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn dotenv_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str(r"\n"),
            '$' => out.push_str(r"\$"),
            c => out.push(c),
        }
    }
    out
}
