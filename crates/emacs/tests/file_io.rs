//! Tests for loading configs from disk and reading results through files.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;

use emacs::{Emacs, EmacsConfig, EmacsError, EvalOptions, Mode, ReturnMode, TmpFile};

#[test]
fn test_config_from_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("emacs.toml");
    fs::write(
        &path,
        r#"
program = "emacsclient"
args = ["-q"]

[mode]
kind = "client"
server = "work"
"#,
    )
    .unwrap();

    let config = EmacsConfig::from_file(&path).unwrap();
    assert_eq!(
        config.mode,
        Mode::Client {
            server: Some("work".to_string())
        }
    );
    assert_eq!(config.base_command(), ["emacsclient", "-s", "work", "-q"]);
}

#[test]
fn test_config_missing_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let err = EmacsConfig::from_file(temp_dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, EmacsError::Io(_)));
}

#[test]
fn test_config_invalid_toml() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("bad.toml");
    fs::write(&path, "args = \"-Q\"").unwrap();

    let err = EmacsConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, EmacsError::Config(_)));
    assert!(err.to_string().starts_with("invalid config"));
}

#[test]
fn test_eval_options_from_toml() {
    let options: EvalOptions = toml::from_str("ret = \"both\"\nis_json = true").unwrap();
    assert!(options.catch_errors);
    assert_eq!(options.ret, ReturnMode::Both);
    assert!(options.is_json);
    assert_eq!(options.tmpfile, None);

    let options: EvalOptions = toml::from_str("tmpfile = \"auto\"").unwrap();
    assert_eq!(options.tmpfile, Some(TmpFile::Auto));

    let options: EvalOptions = toml::from_str("tmpfile = { path = \"/tmp/out.json\" }").unwrap();
    assert_eq!(options.tmpfile, Some(TmpFile::Path(PathBuf::from("/tmp/out.json"))));
}

/// Stands in for Emacs writing the result of `with-temp-file` to disk.
fn write_result_to(
    path: PathBuf,
    contents: &'static str,
) -> impl Fn(&[String]) -> io::Result<String> {
    move |argv: &[String]| {
        let form = argv.last().cloned().unwrap_or_default();
        assert!(form.starts_with("(with-temp-file "), "{}", form);
        fs::write(&path, contents)?;
        Ok("ignored stdout".to_string())
    }
}

#[test]
fn test_eval_through_tmpfile() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("result.json");

    let emacs = Emacs::new(
        EmacsConfig::client(),
        write_result_to(path.clone(), r#"{"value": [1, 2], "error": null}"#),
    );
    let out = emacs
        .eval("'(1 2)", &EvalOptions::default().tmpfile(&path))
        .unwrap();
    assert_eq!(out, r#"{"value": [1, 2], "error": null}"#);

    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["value"], serde_json::json!([1, 2]));
    assert!(json["error"].is_null());
}

#[test]
fn test_eval_tmpfile_not_written() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("never.json");

    let emacs = Emacs::new(EmacsConfig::batch(), |_: &[String]| Ok::<_, io::Error>(String::new()));
    let err = emacs
        .eval("1", &EvalOptions::default().tmpfile(&path))
        .unwrap_err();
    assert!(matches!(err, EmacsError::Io(_)));
}

#[test]
fn test_eval_through_auto_tmpfile() {
    let seen = RefCell::new(None);
    let emacs = Emacs::new(EmacsConfig::batch(), |argv: &[String]| {
        let form = argv.last().cloned().unwrap_or_default();
        let path = PathBuf::from(form.split('"').nth(1).unwrap_or_default());
        assert!(path.exists(), "{} should exist during evaluation", path.display());
        fs::write(&path, r#"{"value": 3, "error": null}"#)?;
        *seen.borrow_mut() = Some(path);
        Ok::<_, io::Error>(String::new())
    });

    let out = emacs
        .eval("(+ 1 2)", &EvalOptions::default().auto_tmpfile())
        .unwrap();
    assert_eq!(out, r#"{"value": 3, "error": null}"#);

    let path = seen.borrow_mut().take().unwrap();
    assert!(!path.exists());
}

#[test]
fn test_auto_tmpfile_removed_on_evaluator_error() {
    let seen = RefCell::new(None);
    let emacs = Emacs::new(EmacsConfig::batch(), |argv: &[String]| {
        let form = argv.last().cloned().unwrap_or_default();
        *seen.borrow_mut() = form.split('"').nth(1).map(PathBuf::from);
        Err::<String, _>(io::Error::other("emacs crashed"))
    });

    let err = emacs
        .eval("(+ 1 2)", &EvalOptions::default().auto_tmpfile())
        .unwrap_err();
    assert!(matches!(err, EmacsError::Evaluator(_)));

    let path = seen.borrow_mut().take().unwrap();
    assert!(!path.exists());
}
