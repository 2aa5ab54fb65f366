//! Turning user code into the command line that evaluates it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use emacs_elisp::{E, Expr, Source, nil, source};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::config::EmacsConfig;
use crate::error::EmacsError;
use crate::snippets::{catch_errors_json, encode_json};

/// What the caller wants back from an evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnMode {
    /// The value of the expression.
    #[default]
    Value,
    /// Only the process output.
    Process,
    /// Value and process output.
    Both,
    /// Nothing.
    None,
}

impl ReturnMode {
    /// Whether the value of the expression is thrown away.
    pub fn ignores_value(self) -> bool {
        matches!(self, ReturnMode::Process | ReturnMode::None)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReturnMode::Value => "value",
            ReturnMode::Process => "process",
            ReturnMode::Both => "both",
            ReturnMode::None => "none",
        }
    }
}

impl FromStr for ReturnMode {
    type Err = EmacsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(ReturnMode::Value),
            "process" => Ok(ReturnMode::Process),
            "both" => Ok(ReturnMode::Both),
            "none" => Ok(ReturnMode::None),
            other => Err(EmacsError::InvalidReturnMode(other.to_string())),
        }
    }
}

impl fmt::Display for ReturnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File the result is passed through instead of stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TmpFile {
    /// A fresh temporary file, removed once the request is dropped.
    Auto,
    /// A file owned by the caller.
    Path(PathBuf),
}

/// Options for a single evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    /// Catch Elisp errors and report them inside the JSON result instead of
    /// failing the process.
    pub catch_errors: bool,
    pub ret: ReturnMode,
    /// The expression already evaluates to a JSON string.
    pub is_json: bool,
    pub tmpfile: Option<TmpFile>,
    /// Arguments appended after `--eval FORM`.
    pub extra_args: Vec<String>,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            catch_errors: true,
            ret: ReturnMode::Value,
            is_json: false,
            tmpfile: None,
            extra_args: Vec::new(),
        }
    }
}

impl EvalOptions {
    pub fn catch_errors(mut self, catch_errors: bool) -> Self {
        self.catch_errors = catch_errors;
        self
    }

    pub fn ret(mut self, ret: ReturnMode) -> Self {
        self.ret = ret;
        self
    }

    pub fn is_json(mut self, is_json: bool) -> Self {
        self.is_json = is_json;
        self
    }

    /// Pass the result through `path`.
    pub fn tmpfile(mut self, path: impl Into<PathBuf>) -> Self {
        self.tmpfile = Some(TmpFile::Path(path.into()));
        self
    }

    /// Pass the result through a temporary file created for the request.
    pub fn auto_tmpfile(mut self) -> Self {
        self.tmpfile = Some(TmpFile::Auto);
        self
    }

    pub fn extra_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Where the result text of a request ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Nothing is read back.
    Ignored,
    /// Written to stdout with `princ`.
    Stdout,
    /// Printed to stdout by `emacsclient` as an escaped string literal.
    Printed,
    /// Written to a file.
    File(PathBuf),
}

/// A fully wrapped expression, ready to be run.
///
/// A request made with [`TmpFile::Auto`] owns its result file; the file is
/// deleted when the request and all its clones are dropped.
#[derive(Debug, Clone)]
pub struct Request {
    expr: Expr,
    base_command: Vec<String>,
    extra_args: Vec<String>,
    output: Output,
    // Keeps an automatic result file alive.
    _result_file: Option<Arc<NamedTempFile>>,
}

impl Request {
    /// Wrap `src` according to `options` for the mode in `config`.
    ///
    /// Fails if a temporary file cannot be created or its path is not UTF-8.
    pub fn prepare(
        src: impl Into<Source>,
        options: &EvalOptions,
        config: &EmacsConfig,
    ) -> Result<Self, EmacsError> {
        let mut expr = source(src);
        let ignore_value = options.ret.ignores_value();

        let reads_result = if options.catch_errors {
            if ignore_value {
                expr = E.attr("progn").call().arg(expr).arg(nil()).into();
            }
            expr = catch_errors_json(expr, options.is_json);
            true
        } else if ignore_value {
            false
        } else {
            if !options.is_json {
                expr = encode_json(expr);
            }
            true
        };

        let mut result_file = None;
        let output = if !reads_result {
            Output::Ignored
        } else if let Some(target) = &options.tmpfile {
            let path = match target {
                TmpFile::Path(path) => path.clone(),
                TmpFile::Auto => {
                    let file = tempfile::Builder::new()
                        .prefix("emacs-result-")
                        .suffix(".json")
                        .tempfile()?;
                    let path = file.path().to_path_buf();
                    result_file = Some(Arc::new(file));
                    path
                }
            };
            expr = write_to_file(&path, expr)?;
            Output::File(path)
        } else if config.is_batch() {
            expr = E.attr("princ").call().arg(expr).into();
            Output::Stdout
        } else {
            Output::Printed
        };

        Ok(Self {
            expr,
            base_command: config.base_command(),
            extra_args: options.extra_args.clone(),
            output,
            _result_file: result_file,
        })
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    /// `base_command + ["--eval", FORM] + extra_args`.
    pub fn command_line(&self) -> Vec<String> {
        let mut argv = self.base_command.clone();
        argv.push("--eval".to_string());
        argv.push(self.expr.render());
        argv.extend(self.extra_args.iter().cloned());
        argv
    }
}

/// `(with-temp-file PATH (insert expr))`
fn write_to_file(path: &Path, expr: Expr) -> Result<Expr, EmacsError> {
    let name = path
        .to_str()
        .ok_or_else(|| EmacsError::NonUtf8Path(path.to_path_buf()))?;
    Ok(E.attr("with_temp_file")
        .call()
        .arg(name)
        .arg(E.attr("insert").call().arg(expr))
        .into())
}
