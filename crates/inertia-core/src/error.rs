// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors surfaced by signal loading, configuration and metric computation.
///
/// Degenerate signals (length 0 or 1) are never an error; every estimator
/// defines a fallback value for them.
#[derive(Debug, Error)]
pub enum InertiaError {
    /// The source could not be resolved to a flat sequence of finite floats.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A configuration field is outside its documented range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("not supported: {0}")]
    NotSupported(String),
    #[error("numerical issue: {0}")]
    NumericalIssue(String),
}

impl InertiaError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn not_supported(msg: impl Into<String>) -> Self {
        Self::NotSupported(msg.into())
    }

    pub fn numerical_issue(msg: impl Into<String>) -> Self {
        Self::NumericalIssue(msg.into())
    }

    /// Stable machine-readable code used by the CLI and Python bindings.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidConfig(_) => "invalid_config",
            Self::Io { .. } => "io_error",
            Self::NotSupported(_) => "not_supported",
            Self::NumericalIssue(_) => "numerical_issue",
        }
    }
}
