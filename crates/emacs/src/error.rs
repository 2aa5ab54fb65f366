//! Error type for configuring and running evaluations.

use emacs_elisp::ElispError;

/// Boxed error returned by a host [`Evaluator`](crate::Evaluator).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum EmacsError {
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(r#"return mode must be one of "value", "process", "both" or "none", got {0:?}"#)]
    InvalidReturnMode(String),

    #[error("elisp error: {0}")]
    Elisp(#[from] ElispError),

    #[error("evaluator failed: {0}")]
    Evaluator(BoxError),

    #[error("result file path is not valid UTF-8: {0:?}")]
    NonUtf8Path(std::path::PathBuf),

    #[error("malformed output from emacsclient: {0:?}")]
    MalformedOutput(String),
}
