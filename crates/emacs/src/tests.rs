//! Tests for rhizome-emacs.

use std::cell::RefCell;
use std::io;

use emacs_elisp::{E, Expr};

use crate::*;

/// Evaluator that records every command line and answers with canned stdout.
struct MockEmacs {
    stdout: String,
    calls: RefCell<Vec<Vec<String>>>,
}

impl MockEmacs {
    fn new(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn last_call(&self) -> Vec<String> {
        self.calls.borrow().last().cloned().unwrap_or_default()
    }
}

impl Evaluator for MockEmacs {
    type Error = io::Error;

    fn evaluate(&self, argv: &[String]) -> Result<String, io::Error> {
        self.calls.borrow_mut().push(argv.to_vec());
        Ok(self.stdout.clone())
    }
}

fn batch(stdout: &str) -> Emacs<MockEmacs> {
    Emacs::new(EmacsConfig::batch().with_args(["-Q"]), MockEmacs::new(stdout))
}

// ============================================================================
// Batch mode
// ============================================================================

#[test]
fn test_eval_batch_default_options() {
    let emacs = batch(r#"{"value": 3, "error": null}"#);
    let out = emacs.eval("(+ 1 2)", &EvalOptions::default()).unwrap();
    assert_eq!(out, r#"{"value": 3, "error": null}"#);

    let argv = emacs.evaluator().last_call();
    assert_eq!(argv[..4], ["emacs", "--batch", "-Q", "--eval"]);
    assert_eq!(argv.len(), 5);

    let expected = Expr::from(
        E.attr("princ")
            .call()
            .arg(catch_errors_json(Expr::raw("(+ 1 2)"), false)),
    );
    assert_eq!(argv[4], expected.to_string());
}

#[test]
fn test_eval_expression_source() {
    let emacs = batch("\"foobar\"");
    let options = EvalOptions::default().catch_errors(false);
    let src = E.attr("concat").call().arg("foo").arg("bar");
    assert_eq!(emacs.eval(src, &options).unwrap(), "\"foobar\"");
    assert_eq!(
        emacs.evaluator().last_call()[4],
        r#"(princ (progn (require 'json) (json-encode (concat "foo" "bar"))))"#
    );
}

#[test]
fn test_eval_ignored_value_returns_stdout() {
    let emacs = batch("Loading...\n");
    let options = EvalOptions::default()
        .catch_errors(false)
        .ret(ReturnMode::None);
    assert_eq!(emacs.eval("(message \"x\")", &options).unwrap(), "Loading...\n");
    assert_eq!(emacs.evaluator().last_call()[4], "(message \"x\")");
}

#[test]
fn test_run_appends_arguments() {
    let emacs = batch("");
    emacs.run(["--eval", "(kill-emacs 0)"]).unwrap();
    assert_eq!(
        emacs.evaluator().last_call(),
        ["emacs", "--batch", "-Q", "--eval", "(kill-emacs 0)"]
    );
}

// ============================================================================
// Client mode
// ============================================================================

#[test]
fn test_eval_client_unescapes_printed_string() {
    let printed = r#""{\"value\": \"a\\nb\", \"error\": null}""#;
    let emacs = Emacs::new(
        EmacsConfig::client_for("work"),
        MockEmacs::new(&format!("{}\n", printed)),
    );
    let out = emacs.eval("(concat \"a\" \"\\n\" \"b\")", &EvalOptions::default()).unwrap();
    assert_eq!(out, r#"{"value": "a\nb", "error": null}"#);

    let argv = emacs.evaluator().last_call();
    assert_eq!(argv[..4], ["emacsclient", "-s", "work", "--eval"]);
    assert!(argv[4].starts_with("(let ((value-enc nil)"));
}

#[test]
fn test_eval_client_malformed_output() {
    let emacs = Emacs::new(EmacsConfig::client(), MockEmacs::new("*ERROR*: void"));
    let err = emacs.eval("x", &EvalOptions::default()).unwrap_err();
    assert!(matches!(err, EmacsError::MalformedOutput(_)));
}

// ============================================================================
// Evaluator
// ============================================================================

#[test]
fn test_evaluator_error_is_wrapped() {
    let emacs = Emacs::new(EmacsConfig::batch(), |_: &[String]| {
        Err::<String, _>(io::Error::new(io::ErrorKind::NotFound, "emacs not found"))
    });
    let err = emacs.eval("nil", &EvalOptions::default()).unwrap_err();
    assert!(matches!(err, EmacsError::Evaluator(_)));
    assert_eq!(err.to_string(), "evaluator failed: emacs not found");
}

#[test]
fn test_closure_evaluator() {
    let emacs = Emacs::new(EmacsConfig::batch(), |argv: &[String]| {
        Ok::<_, io::Error>(argv.join(" "))
    });
    let options = EvalOptions::default().catch_errors(false).is_json(true);
    assert_eq!(
        emacs.eval("(json-encode t)", &options).unwrap(),
        "emacs --batch --eval (princ (json-encode t))"
    );
}
