// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::error_map::inertia_error_to_pyerr;
use inertia_core::{Signal, SignalView};
use numpy::{
    PyArrayDescrMethods, PyArrayDyn, PyArrayMethods, PyUntypedArray, PyUntypedArrayMethods, dtype,
};
use pyo3::exceptions::{PyRuntimeError, PyTypeError};
use pyo3::prelude::*;
use pyo3::types::{PyAnyMethods, PyModule};

/// Converts any numeric array-like into an owned, flattened `Signal`.
///
/// float32/float64 ndarrays are read directly (C-contiguous input without an
/// intermediate copy); anything else goes through `numpy.asarray(x, "float64")`.
/// Arrays of any rank are flattened in row-major order.
pub(crate) fn signal_from_object<'py>(
    py: Python<'py>,
    x: &Bound<'py, PyAny>,
) -> PyResult<Signal> {
    if let Ok(array) = x.downcast::<PyUntypedArray>() {
        let descr = array.dtype();
        if descr.is_equiv_to(&dtype::<f64>(py)) {
            return f64_signal(array);
        }
        if descr.is_equiv_to(&dtype::<f32>(py)) {
            return f32_signal(array);
        }
    }

    let numpy = PyModule::import(py, "numpy")?;
    let converted = numpy
        .call_method1("asarray", (x, "float64"))
        .map_err(|err| PyTypeError::new_err(format!("expected a numeric array-like ({err})")))?;
    let array = converted
        .downcast::<PyUntypedArray>()
        .map_err(|_| PyRuntimeError::new_err("internal error: numpy.asarray returned non-array"))?;
    f64_signal(array)
}

fn f64_signal(array: &Bound<'_, PyUntypedArray>) -> PyResult<Signal> {
    let typed = array.downcast::<PyArrayDyn<f64>>().map_err(|_| {
        PyRuntimeError::new_err("internal error: failed to downcast float64 ndarray")
    })?;
    let readonly = typed.readonly();
    let signal = if typed.is_c_contiguous() {
        match readonly.as_slice() {
            Ok(values) => SignalView::from_f64(values).to_signal(),
            Err(_) => Signal::from_vec(readonly.as_array().iter().copied().collect()),
        }
    } else {
        Signal::from_vec(readonly.as_array().iter().copied().collect())
    };
    signal.map_err(inertia_error_to_pyerr)
}

fn f32_signal(array: &Bound<'_, PyUntypedArray>) -> PyResult<Signal> {
    let typed = array.downcast::<PyArrayDyn<f32>>().map_err(|_| {
        PyRuntimeError::new_err("internal error: failed to downcast float32 ndarray")
    })?;
    let readonly = typed.readonly();
    let signal = if typed.is_c_contiguous() {
        match readonly.as_slice() {
            Ok(values) => SignalView::from_f32(values).to_signal(),
            Err(_) => Signal::from_vec(readonly.as_array().iter().map(|v| f64::from(*v)).collect()),
        }
    } else {
        Signal::from_vec(readonly.as_array().iter().map(|v| f64::from(*v)).collect())
    };
    signal.map_err(inertia_error_to_pyerr)
}
