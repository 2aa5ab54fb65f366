//! How to reach Emacs: which program to run and in which mode.
//!
//! A config can be written in TOML:
//!
//! ```toml
//! program = "emacsclient"
//! args = ["-q"]
//!
//! [mode]
//! kind = "client"
//! server = "work"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EmacsError;

/// Whether to start a fresh `emacs --batch` or talk to a running server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Batch,
    Client {
        /// Server name passed with `-s`; the default server when absent.
        #[serde(default)]
        server: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmacsConfig {
    /// Executable name or path.
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default)]
    pub mode: Mode,
    /// Extra arguments placed after the mode arguments, before `--eval`.
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_program() -> String {
    "emacs".to_string()
}

impl Default for EmacsConfig {
    fn default() -> Self {
        Self::batch()
    }
}

impl EmacsConfig {
    /// `emacs --batch`.
    pub fn batch() -> Self {
        Self {
            program: default_program(),
            mode: Mode::Batch,
            args: Vec::new(),
        }
    }

    /// `emacsclient`, connecting to the default server.
    pub fn client() -> Self {
        Self {
            program: "emacsclient".to_string(),
            mode: Mode::Client { server: None },
            args: Vec::new(),
        }
    }

    /// `emacsclient -s <server>`.
    pub fn client_for(server: impl Into<String>) -> Self {
        Self {
            mode: Mode::Client {
                server: Some(server.into()),
            },
            ..Self::client()
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(src: &str) -> Result<Self, EmacsError> {
        Ok(toml::from_str(src)?)
    }

    /// Load a config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EmacsError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn is_batch(&self) -> bool {
        matches!(self.mode, Mode::Batch)
    }

    /// The command every evaluation starts with.
    ///
    /// Batch mode gives `[program, --batch, args...]`, client mode gives
    /// `[program, -s, server, args...]` with `-s` left out when no server
    /// is named.
    pub fn base_command(&self) -> Vec<String> {
        let mut cmd = vec![self.program.clone()];
        match &self.mode {
            Mode::Batch => cmd.push("--batch".to_string()),
            Mode::Client { server: Some(server) } => {
                cmd.push("-s".to_string());
                cmd.push(server.clone());
            }
            Mode::Client { server: None } => {}
        }
        cmd.extend(self.args.iter().cloned());
        cmd
    }
}
