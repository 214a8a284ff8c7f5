use clap::Parser;
use dynamic_replace_env::output::{self, Format};
use dynamic_replace_env::{self as dre, EnvError, Environment, PluginOptions, CONTEXT_KEY};
use std::path::PathBuf;
use std::process::{Command, ExitCode};
use tracing::Level;

/// Resolve `$NAME` references between environment variables, then print them
/// or run a command with them.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Read variables from a JSON object file instead of the process environment
    #[arg(long)]
    env_file: Option<PathBuf>,
    /// Build context label (e.g. deploy-preview); overrides CONTEXT
    #[arg(long)]
    context: Option<String>,
    /// Plugin options as a JSON object
    #[arg(long)]
    options: Option<String>,
    /// Output format when no command is given
    #[arg(long, value_enum, default_value_t = Format::Shell)]
    format: Format,
    /// Print only variables rewritten by the pass
    #[arg(long)]
    only_changed: bool,
    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
    /// Command to run with the resolved environment
    #[arg(last = true)]
    command: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the rendered variables.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("dre: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> dre::Result<ExitCode> {
    let mut env = match &args.env_file {
        Some(path) => Environment::from_json_file(path)?,
        None => Environment::from_process(),
    };
    if let Some(context) = &args.context {
        env.set(CONTEXT_KEY, context.as_str());
    }
    let options = args
        .options
        .as_deref()
        .map(PluginOptions::from_json_str)
        .transpose()?;

    let report = dre::run(&mut env, options.as_ref());

    if let Some((program, rest)) = args.command.split_first() {
        let status = Command::new(program).args(rest).envs(env.iter()).status()?;
        let code = status
            .code()
            .ok_or_else(|| EnvError::Command(format!("{program} terminated by signal")))?;
        return Ok(ExitCode::from(child_exit_code(code)));
    }

    let vars: Vec<(&str, &str)> = match (&report, args.only_changed) {
        (Some(report), true) => report
            .changed_keys()
            .filter_map(|k| env.get(k).map(|v| (k, v)))
            .collect(),
        (None, true) => Vec::new(),
        (_, false) => env.iter().collect(),
    };
    print!("{}", output::render(&vars, args.format)?);
    Ok(ExitCode::SUCCESS)
}

/// Passes a child's status through. Codes outside `0..=255` become 1 so
/// they can't wrap around to success.
fn child_exit_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_exit_codes_never_wrap_to_success() {
        assert_eq!(child_exit_code(0), 0);
        assert_eq!(child_exit_code(3), 3);
        assert_eq!(child_exit_code(255), 255);
        assert_eq!(child_exit_code(256), 1);
        assert_eq!(child_exit_code(512), 1);
        assert_eq!(child_exit_code(-1), 1);
    }
}
