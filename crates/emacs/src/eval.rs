//! Running requests through a host-provided evaluator.

use std::fs;

use emacs_elisp::Source;
use tracing::{debug, trace};

use crate::config::EmacsConfig;
use crate::error::{BoxError, EmacsError};
use crate::output::unescape_printed_string;
use crate::request::{EvalOptions, Output, Request};

/// Runs a command line and returns its stdout.
///
/// This is where a host plugs in process spawning, a pooled connection to a
/// server, or a canned response in tests.
pub trait Evaluator {
    type Error: Into<BoxError>;

    fn evaluate(&self, argv: &[String]) -> Result<String, Self::Error>;
}

impl<F, Err> Evaluator for F
where
    F: Fn(&[String]) -> Result<String, Err>,
    Err: Into<BoxError>,
{
    type Error = Err;

    fn evaluate(&self, argv: &[String]) -> Result<String, Err> {
        self(argv)
    }
}

/// An Emacs instance reached through an [`Evaluator`].
#[derive(Debug, Clone)]
pub struct Emacs<V> {
    config: EmacsConfig,
    evaluator: V,
}

impl<V: Evaluator> Emacs<V> {
    pub fn new(config: EmacsConfig, evaluator: V) -> Self {
        Self { config, evaluator }
    }

    pub fn config(&self) -> &EmacsConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &V {
        &self.evaluator
    }

    /// Run the argument list after the base command as is.
    pub fn run<I>(&self, args: I) -> Result<String, EmacsError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut argv = self.config.base_command();
        argv.extend(args.into_iter().map(Into::into));
        self.call(&argv)
    }

    /// Evaluate Elisp source and return the raw result text.
    ///
    /// With the default options this is a JSON object
    /// `{"value": ..., "error": ...}`. Nothing is decoded here.
    pub fn eval(
        &self,
        src: impl Into<Source>,
        options: &EvalOptions,
    ) -> Result<String, EmacsError> {
        let request = Request::prepare(src, options, &self.config)?;
        self.send(&request)
    }

    /// Run a prepared request and collect its output.
    pub fn send(&self, request: &Request) -> Result<String, EmacsError> {
        let stdout = self.call(&request.command_line())?;
        match request.output() {
            Output::Ignored | Output::Stdout => Ok(stdout),
            Output::Printed => unescape_printed_string(stdout.trim()),
            Output::File(path) => {
                trace!(path = %path.display(), "reading result file");
                Ok(fs::read_to_string(path)?)
            }
        }
    }

    fn call(&self, argv: &[String]) -> Result<String, EmacsError> {
        debug!(program = %self.config.program, args = argv.len(), "evaluating");
        trace!(?argv);
        self.evaluator.evaluate(argv).map_err(|err| {
            let err: BoxError = err.into();
            debug!(%err, "evaluator failed");
            EmacsError::Evaluator(err)
        })
    }
}
