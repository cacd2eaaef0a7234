// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use inertia_core::InertiaError;
use pyo3::PyErr;
use pyo3::exceptions::{
    PyFileNotFoundError, PyFloatingPointError, PyNotImplementedError, PyOSError, PyValueError,
};
use std::io::ErrorKind;

/// Maps inertia-rs errors into Python exception classes.
pub(crate) fn inertia_error_to_pyerr(err: InertiaError) -> PyErr {
    match err {
        InertiaError::InvalidInput(msg) | InertiaError::InvalidConfig(msg) => {
            PyValueError::new_err(msg)
        }
        InertiaError::Io { context, source } => {
            let message = format!("{context}: {source}");
            if source.kind() == ErrorKind::NotFound {
                PyFileNotFoundError::new_err(message)
            } else {
                PyOSError::new_err(message)
            }
        }
        InertiaError::NotSupported(msg) => PyNotImplementedError::new_err(msg),
        InertiaError::NumericalIssue(msg) => PyFloatingPointError::new_err(msg),
    }
}
