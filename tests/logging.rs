use dynamic_replace_env as dre;
use dre::{Environment, ENABLE_KEY};
use std::io;
use std::sync::{Arc, Mutex};

/// Collects everything the fmt subscriber writes.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs the hook under a capturing subscriber and returns what it logged.
fn logged(env: &mut Environment) -> (bool, String) {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_target(false)
        .finish();
    let ran = tracing::subscriber::with_default(subscriber, || dre::on_pre_build(env, None));
    (ran, out.text())
}

#[test]
fn logs_replacement_report() {
    let mut env: Environment = [(ENABLE_KEY, "true"), ("X", "x"), ("Y", "$X/$X")]
        .into_iter()
        .collect();
    let (ran, text) = logged(&mut env);

    assert!(ran);
    assert!(text.contains("Found X for Y. Replacing values."), "{text}");
    assert!(text.contains("Replaced 1 ENVs"), "{text}");
    assert!(text.contains("Y - X"), "{text}");
    assert!(!text.contains("Nothing found"), "{text}");
}

#[test]
fn logs_nothing_found() {
    let mut env: Environment = [(ENABLE_KEY, "true"), ("X", "plain")].into_iter().collect();
    let (ran, text) = logged(&mut env);

    assert!(ran);
    assert!(text.contains("Nothing found... keeping default ENVs"), "{text}");
    assert!(!text.contains("Replaced"), "{text}");
}

#[test]
fn logs_skip_notice_when_disabled() {
    let mut env: Environment = [("Y", "$X"), ("X", "x")].into_iter().collect();
    let (ran, text) = logged(&mut env);

    assert!(!ran);
    assert!(
        text.contains(
            "Skip dynamic replace env plugin. Set env ENABLE_NETLIFY_PLUGIN_DYNAMIC_REPLACE_ENV to enable it."
        ),
        "{text}"
    );
}

#[test]
fn test_mode_is_silent() {
    let mut enabled: Environment = [("APP_ENV", "test"), (ENABLE_KEY, "true"), ("X", "x"), ("Y", "$X")]
        .into_iter()
        .collect();
    let (ran, text) = logged(&mut enabled);
    assert!(ran);
    assert_eq!(enabled.get("Y"), Some("x"));
    assert_eq!(text, "");

    let mut disabled: Environment = [("APP_ENV", "test")].into_iter().collect();
    let (ran, text) = logged(&mut disabled);
    assert!(!ran);
    assert_eq!(text, "");
}

#[test]
fn test_mode_resolved_by_the_pass_is_silent() {
    let mut env: Environment = [(ENABLE_KEY, "true"), ("MODE", "test"), ("APP_ENV", "$MODE")]
        .into_iter()
        .collect();
    let (ran, text) = logged(&mut env);

    assert!(ran);
    assert_eq!(env.get("APP_ENV"), Some("test"));
    assert!(!text.contains("Replaced"), "{text}");
}
