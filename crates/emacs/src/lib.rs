//! Running Elisp in GNU Emacs.
//!
//! This crate assembles the command lines that evaluate an expression in
//! `emacs --batch` or through `emacsclient`, wraps expressions so their
//! results come back as JSON text, and hands the command to an
//! [`Evaluator`] supplied by the host.
//!
//! ```
//! use emacs::{Emacs, EmacsConfig, EvalOptions};
//!
//! let emacs = Emacs::new(EmacsConfig::batch(), |argv: &[String]| {
//!     assert_eq!(argv[..3], ["emacs", "--batch", "--eval"]);
//!     Ok::<_, std::io::Error>("3".to_string())
//! });
//! let out = emacs.eval("(+ 1 2)", &EvalOptions::default().catch_errors(false));
//! assert_eq!(out.unwrap(), "3");
//! ```

mod config;
mod error;
mod eval;
mod output;
mod request;
mod snippets;

pub use config::{EmacsConfig, Mode};
pub use error::{BoxError, EmacsError};
pub use eval::{Emacs, Evaluator};
pub use output::unescape_printed_string;
pub use request::{EvalOptions, Output, Request, ReturnMode, TmpFile};
pub use snippets::{catch_errors_json, encode_json};

pub use emacs_elisp as elisp;

#[cfg(test)]
mod tests;
