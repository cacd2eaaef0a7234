// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

mod delimited;
mod npy;

pub use delimited::{Delimiter, parse_delimited};
pub use npy::parse_npy_bytes;

use inertia_core::{InertiaError, Signal};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk layout of a numeric source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalFormat {
    Csv,
    Text,
    Npy,
}

impl SignalFormat {
    /// Infers the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, InertiaError> {
        let extension = path
            .extension()
            .and_then(|value| value.to_str())
            .map(|value| value.to_ascii_lowercase())
            .ok_or_else(|| {
                InertiaError::not_supported(format!(
                    "unable to infer input format for '{}'; expected .csv, .txt, .dat or .npy",
                    path.display()
                ))
            })?;

        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "txt" | "dat" => Ok(Self::Text),
            "npy" => Ok(Self::Npy),
            _ => Err(InertiaError::not_supported(format!(
                "unsupported input format '{extension}'; expected .csv, .txt, .dat or .npy"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Text => "text",
            Self::Npy => "npy",
        }
    }
}

impl fmt::Display for SignalFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flattened signal together with where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedSignal {
    pub path: PathBuf,
    pub format: SignalFormat,
    /// Shape before flattening, `(rows, columns)`.
    pub shape: (usize, usize),
    pub signal: Signal,
}

impl LoadedSignal {
    pub fn len(&self) -> usize {
        self.signal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    pub fn into_signal(self) -> Signal {
        self.signal
    }
}

/// Loads `path` and flattens it row-major into one signal.
pub fn load_signal(path: impl AsRef<Path>) -> Result<LoadedSignal, InertiaError> {
    let path = path.as_ref();
    let format = SignalFormat::from_path(path)?;

    let (values, shape) = match format {
        SignalFormat::Csv | SignalFormat::Text => {
            let raw = fs::read_to_string(path).map_err(|source| {
                InertiaError::io(format!("failed to read '{}'", path.display()), source)
            })?;
            let delimiter = if format == SignalFormat::Csv {
                Delimiter::Comma
            } else {
                Delimiter::Whitespace
            };
            parse_delimited(&raw, delimiter)?
        }
        SignalFormat::Npy => {
            let bytes = fs::read(path).map_err(|source| {
                InertiaError::io(format!("failed to read '{}'", path.display()), source)
            })?;
            parse_npy_bytes(&bytes)?
        }
    };

    if shape.0 > 1 && shape.1 > 1 {
        tracing::debug!(
            path = %path.display(),
            rows = shape.0,
            columns = shape.1,
            "flattening two-dimensional input row-major"
        );
    }

    let signal = Signal::from_vec(values)?;
    tracing::debug!(path = %path.display(), %format, n = signal.len(), "loaded signal");

    Ok(LoadedSignal {
        path: path.to_path_buf(),
        format,
        shape,
        signal,
    })
}

/// Ingestion namespace.
pub fn crate_name() -> &'static str {
    let _ = inertia_core::crate_name();
    "inertia-io"
}
