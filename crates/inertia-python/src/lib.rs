// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]
// PyO3-generated wrappers can trip false-positive clippy::useless_conversion diagnostics.
#![allow(clippy::useless_conversion)]

mod error_map;
mod numpy_interop;
mod result_objects;

use crate::error_map::inertia_error_to_pyerr;
use crate::numpy_interop::signal_from_object;
use inertia_analyze::{analyze as analyze_path, analyze_signal};
use inertia_core::{AnalysisConfig, FitMode};
use pyo3::prelude::*;
use pyo3::types::PyModule;
use result_objects::{PyDiagnostics, PyInertiaResult, plot_result};
use std::path::PathBuf;

fn build_config(
    bins: usize,
    fit_mode: &str,
    max_degree: usize,
    compression_effort: i32,
) -> PyResult<AnalysisConfig> {
    let fit_mode = fit_mode
        .parse::<FitMode>()
        .map_err(inertia_error_to_pyerr)?;
    let config = AnalysisConfig::default()
        .with_bins(bins)
        .with_fit_mode(fit_mode)
        .with_max_degree(max_degree)
        .with_compression_effort(compression_effort);
    config.validate().map_err(inertia_error_to_pyerr)?;
    Ok(config)
}

/// Loads a .csv/.txt/.dat/.npy file and computes its inertia metrics.
#[pyfunction]
#[pyo3(signature = (path, *, bins = 50, fit_mode = "linear", max_degree = 5, compression_effort = 9))]
fn analyze(
    py: Python<'_>,
    path: PathBuf,
    bins: usize,
    fit_mode: &str,
    max_degree: usize,
    compression_effort: i32,
) -> PyResult<PyInertiaResult> {
    let config = build_config(bins, fit_mode, max_degree, compression_effort)?;
    py.allow_threads(|| analyze_path(&path, &config))
        .map(Into::into)
        .map_err(inertia_error_to_pyerr)
}

/// Computes inertia metrics for an in-memory array-like.
#[pyfunction]
#[pyo3(signature = (x, *, bins = 50, fit_mode = "linear", max_degree = 5, compression_effort = 9))]
fn analyze_array(
    py: Python<'_>,
    x: &Bound<'_, PyAny>,
    bins: usize,
    fit_mode: &str,
    max_degree: usize,
    compression_effort: i32,
) -> PyResult<PyInertiaResult> {
    let config = build_config(bins, fit_mode, max_degree, compression_effort)?;
    let signal = signal_from_object(py, x)?;
    py.allow_threads(|| analyze_signal(&signal, &config))
        .map(Into::into)
        .map_err(inertia_error_to_pyerr)
}

#[pyfunction]
#[pyo3(signature = (x, bins = 50))]
fn entropy(py: Python<'_>, x: &Bound<'_, PyAny>, bins: usize) -> PyResult<f64> {
    AnalysisConfig::default()
        .with_bins(bins)
        .validate()
        .map_err(inertia_error_to_pyerr)?;
    let signal = signal_from_object(py, x)?;
    Ok(inertia_metrics::entropy(signal.values(), bins))
}

#[pyfunction]
#[pyo3(signature = (x, effort = 9))]
fn compression_resistance(py: Python<'_>, x: &Bound<'_, PyAny>, effort: i32) -> PyResult<f64> {
    AnalysisConfig::default()
        .with_compression_effort(effort)
        .validate()
        .map_err(inertia_error_to_pyerr)?;
    let signal = signal_from_object(py, x)?;
    py.allow_threads(|| inertia_metrics::compression_resistance(signal.values(), effort))
        .map_err(inertia_error_to_pyerr)
}

#[pyfunction]
#[pyo3(signature = (x, fit_mode = "linear", max_degree = 5))]
fn irreducibility(
    py: Python<'_>,
    x: &Bound<'_, PyAny>,
    fit_mode: &str,
    max_degree: usize,
) -> PyResult<f64> {
    let fit_mode = fit_mode
        .parse::<FitMode>()
        .map_err(inertia_error_to_pyerr)?;
    AnalysisConfig::default()
        .with_max_degree(max_degree)
        .validate()
        .map_err(inertia_error_to_pyerr)?;
    let signal = signal_from_object(py, x)?;
    Ok(inertia_metrics::irreducibility(
        signal.values(),
        fit_mode,
        max_degree,
    ))
}

/// Plots `result.values` with matplotlib; returns the axes drawn on.
#[pyfunction]
#[pyo3(signature = (result, ax = None, *, title = None, show_legend = true, show = false))]
fn plot<'py>(
    py: Python<'py>,
    result: PyRef<'py, PyInertiaResult>,
    ax: Option<&Bound<'py, PyAny>>,
    title: Option<&str>,
    show_legend: bool,
    show: bool,
) -> PyResult<Bound<'py, PyAny>> {
    plot_result(py, &result, ax, title, show_legend, show)
}

/// Python extension module entrypoint.
#[pymodule]
fn _inertia_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add("__version__", env!("CARGO_PKG_VERSION"))?;
    module.add_class::<PyDiagnostics>()?;
    module.add_class::<PyInertiaResult>()?;
    module.add_function(wrap_pyfunction!(analyze, module)?)?;
    module.add_function(wrap_pyfunction!(analyze_array, module)?)?;
    module.add_function(wrap_pyfunction!(entropy, module)?)?;
    module.add_function(wrap_pyfunction!(compression_resistance, module)?)?;
    module.add_function(wrap_pyfunction!(irreducibility, module)?)?;
    module.add_function(wrap_pyfunction!(plot, module)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{_inertia_rs, analyze_array, build_config, entropy, irreducibility};
    use pyo3::exceptions::{PyFileNotFoundError, PyNotImplementedError, PyValueError};
    use pyo3::prelude::*;
    use pyo3::types::{PyDict, PyList, PyModule};
    use std::ffi::CString;
    use std::sync::Once;

    fn with_python<F, R>(f: F) -> R
    where
        F: for<'py> FnOnce(Python<'py>) -> R,
    {
        static INIT: Once = Once::new();
        INIT.call_once(pyo3::prepare_freethreaded_python);
        Python::with_gil(f)
    }

    fn run_python<'py>(
        py: Python<'py>,
        code: &str,
        locals: Option<&pyo3::Bound<'py, PyDict>>,
    ) -> pyo3::PyResult<()> {
        let code = CString::new(code).expect("python snippet should not contain NUL bytes");
        py.run(code.as_c_str(), None, locals)
    }

    #[test]
    fn module_registration_exposes_public_api() {
        with_python(|py| {
            let module = PyModule::new(py, "_inertia_rs").expect("module should be created");
            _inertia_rs(&module).expect("module registration should succeed");

            let version: String = module
                .getattr("__version__")
                .expect("__version__ should be exported")
                .extract()
                .expect("__version__ should be string");
            assert_eq!(version, env!("CARGO_PKG_VERSION"));
            for name in [
                "InertiaResult",
                "Diagnostics",
                "analyze",
                "analyze_array",
                "entropy",
                "compression_resistance",
                "irreducibility",
                "plot",
            ] {
                module
                    .getattr(name)
                    .unwrap_or_else(|_| panic!("{name} should be exported"));
            }
        });
    }

    #[test]
    fn config_errors_map_to_value_error() {
        with_python(|py| {
            let err = build_config(0, "linear", 5, 9).expect_err("bins=0 should fail");
            assert!(err.is_instance_of::<PyValueError>(py));
            let err = build_config(50, "cubic", 5, 9).expect_err("unknown fit mode");
            assert!(err.is_instance_of::<PyValueError>(py));
            let err = build_config(50, "poly", 5, 10).expect_err("effort out of range");
            assert!(err.is_instance_of::<PyValueError>(py));
        });
    }

    #[test]
    fn analyze_array_accepts_python_lists() {
        with_python(|py| {
            let values = PyList::new(py, [0.0, 1.0, 2.0, 3.0, 4.0]).expect("list");
            let result = analyze_array(py, values.as_any(), 50, "poly", 5, 9)
                .expect("ramp should analyze");
            let core = result.core();
            assert!(core.irreducible_fraction() < 1e-9);
            assert_eq!(core.values(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
            assert_eq!(core.diagnostics().effective_max_degree, 4);
        });
    }

    #[test]
    fn estimator_functions_match_core() {
        with_python(|py| {
            let values = PyList::new(py, [0.0, 1.0, 2.0, 3.0]).expect("list");
            let h = entropy(py, values.as_any(), 4).expect("entropy");
            assert!((h - (4.0 / 3.0) * 3.0f64.ln()).abs() < 1e-12);
            let fraction =
                irreducibility(py, values.as_any(), "linear", 5).expect("irreducibility");
            assert!(fraction < 1e-9);
        });
    }

    #[test]
    fn non_finite_values_raise_value_error() {
        with_python(|py| {
            let values = PyList::new(py, [1.0, f64::NAN]).expect("list");
            let err = analyze_array(py, values.as_any(), 50, "linear", 5, 9)
                .expect_err("nan should fail");
            assert!(err.is_instance_of::<PyValueError>(py));
        });
    }

    #[test]
    fn file_errors_map_to_python_exceptions() {
        with_python(|py| {
            let module = PyModule::new(py, "_inertia_rs").expect("module should be created");
            _inertia_rs(&module).expect("module registration should succeed");
            let analyze = module.getattr("analyze").expect("analyze");

            let missing = analyze
                .call1(("/definitely/not/here.csv",))
                .expect_err("missing file should fail");
            assert!(missing.is_instance_of::<PyFileNotFoundError>(py));

            let unsupported = analyze
                .call1(("signal.parquet",))
                .expect_err("unknown extension should fail");
            assert!(unsupported.is_instance_of::<PyNotImplementedError>(py));
        });
    }

    #[test]
    fn keyword_only_configuration_is_enforced() {
        with_python(|py| {
            let module = PyModule::new(py, "_inertia_rs").expect("module should be created");
            _inertia_rs(&module).expect("module registration should succeed");
            let locals = PyDict::new(py);
            locals.set_item("m", module).expect("locals");
            run_python(
                py,
                r#"
try:
    m.analyze_array([1.0, 2.0], 10)
    raise AssertionError("bins must be keyword-only")
except TypeError:
    pass
r = m.analyze_array([1.0, 2.0, 4.0], bins=10, fit_mode="poly", max_degree=2)
assert r.bins == 10
assert r.max_degree == 2
assert r.diagnostics.effective_max_degree == 2
"#,
                Some(&locals),
            )
            .expect("keyword-only signature should hold");
        });
    }
}
