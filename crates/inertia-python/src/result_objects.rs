// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use inertia_analyze::{RenderOptions, render_text};
use inertia_core::{Diagnostics as CoreDiagnostics, InertiaResult as CoreInertiaResult};
use numpy::PyArray1;
use pyo3::exceptions::{PyImportError, PyTypeError};
use pyo3::prelude::*;
use pyo3::types::{PyAnyMethods, PyDict, PyModule};

fn import_pyplot<'py>(py: Python<'py>) -> PyResult<Bound<'py, PyModule>> {
    PyModule::import(py, "matplotlib.pyplot").map_err(|err| {
        PyImportError::new_err(format!(
            "plot() requires optional dependency 'matplotlib'. Install with: python -m pip install matplotlib ({err})"
        ))
    })
}

#[pyclass(module = "inertia._inertia_rs", name = "Diagnostics", frozen)]
#[derive(Clone, Debug)]
pub struct PyDiagnostics {
    inner: CoreDiagnostics,
}

#[pymethods]
impl PyDiagnostics {
    #[getter]
    fn n(&self) -> usize {
        self.inner.n
    }

    #[getter]
    fn schema_version(&self) -> u32 {
        self.inner.schema_version
    }

    #[getter]
    fn engine_version(&self) -> Option<String> {
        self.inner.engine_version.clone()
    }

    #[getter]
    fn fit_mode(&self) -> &'static str {
        self.inner.fit_mode.as_str()
    }

    #[getter]
    fn requested_max_degree(&self) -> usize {
        self.inner.requested_max_degree
    }

    #[getter]
    fn effective_max_degree(&self) -> usize {
        self.inner.effective_max_degree
    }

    #[getter]
    fn best_degree(&self) -> Option<usize> {
        self.inner.best_degree
    }

    #[getter]
    fn raw_bytes(&self) -> usize {
        self.inner.raw_bytes
    }

    #[getter]
    fn compressed_bytes(&self) -> Option<usize> {
        self.inner.compressed_bytes
    }

    #[getter]
    fn histogram_range(&self) -> Option<(f64, f64)> {
        self.inner.histogram_range
    }

    #[getter]
    fn notes(&self) -> Vec<String> {
        self.inner.notes.clone()
    }

    #[getter]
    fn warnings(&self) -> Vec<String> {
        self.inner.warnings.clone()
    }

    fn __repr__(&self) -> String {
        format!(
            "Diagnostics(n={}, fit_mode='{}', effective_max_degree={}, notes={}, warnings={})",
            self.inner.n,
            self.inner.fit_mode,
            self.inner.effective_max_degree,
            self.inner.notes.len(),
            self.inner.warnings.len()
        )
    }
}

impl From<CoreDiagnostics> for PyDiagnostics {
    fn from(inner: CoreDiagnostics) -> Self {
        Self { inner }
    }
}

#[pyclass(module = "inertia._inertia_rs", name = "InertiaResult", frozen)]
#[derive(Clone, Debug)]
pub struct PyInertiaResult {
    inner: CoreInertiaResult,
}

impl PyInertiaResult {
    pub(crate) fn core(&self) -> &CoreInertiaResult {
        &self.inner
    }
}

#[pymethods]
impl PyInertiaResult {
    #[getter(I_bar)]
    fn i_bar(&self) -> f64 {
        self.inner.irreducible_fraction()
    }

    #[getter(I_comp)]
    fn i_comp(&self) -> f64 {
        self.inner.compression_resistance()
    }

    #[getter]
    fn entropy(&self) -> f64 {
        self.inner.entropy()
    }

    #[getter]
    fn values<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice(py, self.inner.values())
    }

    #[getter]
    fn n(&self) -> usize {
        self.inner.len()
    }

    #[getter]
    fn bins(&self) -> usize {
        self.inner.config().bins
    }

    #[getter]
    fn fit_mode(&self) -> &'static str {
        self.inner.config().fit_mode.as_str()
    }

    #[getter]
    fn max_degree(&self) -> usize {
        self.inner.config().max_degree
    }

    #[getter]
    fn compression_effort(&self) -> i32 {
        self.inner.config().compression_effort
    }

    #[getter]
    fn diagnostics(&self) -> PyDiagnostics {
        self.inner.diagnostics().clone().into()
    }

    #[getter]
    fn title(&self) -> String {
        self.inner.title()
    }

    #[pyo3(signature = (*, width = 72, height = 16, show_legend = true))]
    fn render(&self, width: usize, height: usize, show_legend: bool) -> String {
        render_text(
            &self.inner,
            &RenderOptions {
                width,
                height,
                show_legend,
            },
        )
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "InertiaResult(I_bar={:.6}, I_comp={:.6}, entropy={:.6}, n={})",
            self.inner.irreducible_fraction(),
            self.inner.compression_resistance(),
            self.inner.entropy(),
            self.inner.len()
        )
    }
}

impl From<CoreInertiaResult> for PyInertiaResult {
    fn from(inner: CoreInertiaResult) -> Self {
        Self { inner }
    }
}

/// Draws `result.values` on `ax` (or a new figure) and returns the axes.
pub(crate) fn plot_result<'py>(
    py: Python<'py>,
    result: &PyInertiaResult,
    ax: Option<&Bound<'py, PyAny>>,
    title: Option<&str>,
    show_legend: bool,
    show: bool,
) -> PyResult<Bound<'py, PyAny>> {
    let pyplot = import_pyplot(py)?;

    let axis = match ax {
        Some(provided) if !provided.is_none() => {
            if !provided.hasattr("plot")? {
                return Err(PyTypeError::new_err(
                    "plot(ax=...) requires a matplotlib Axes-like object",
                ));
            }
            provided.clone()
        }
        _ => {
            let kwargs = PyDict::new(py);
            kwargs.set_item("figsize", (10.0f64, 4.0f64))?;
            pyplot
                .call_method("subplots", (), Some(&kwargs))?
                .get_item(1)?
        }
    };

    let kwargs = PyDict::new(py);
    kwargs.set_item("label", "signal")?;
    axis.call_method("plot", (result.inner.values().to_vec(),), Some(&kwargs))?;

    let title = title.map_or_else(|| result.inner.title(), str::to_string);
    axis.call_method1("set_title", (title,))?;
    axis.call_method1("set_xlabel", ("t",))?;
    if show_legend {
        axis.call_method0("legend")?;
    }
    if show {
        pyplot.call_method0("show")?;
    }
    Ok(axis)
}
