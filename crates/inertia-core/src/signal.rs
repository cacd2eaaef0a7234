// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::InertiaError;

/// Borrowed numeric data over either f32 or f64 samples.
#[derive(Clone, Copy, Debug)]
pub enum DTypeView<'a> {
    F32(&'a [f32]),
    F64(&'a [f64]),
}

impl DTypeView<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::F32(values) => values.len(),
            Self::F64(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, idx: usize) -> f64 {
        match self {
            Self::F32(values) => f64::from(values[idx]),
            Self::F64(values) => values[idx],
        }
    }
}

/// Zero-copy view over a caller-owned one-dimensional sample buffer.
///
/// Sample position `0..n-1` is the implicit independent variable.
#[derive(Clone, Copy, Debug)]
pub struct SignalView<'a> {
    pub values: DTypeView<'a>,
}

impl<'a> SignalView<'a> {
    pub fn new(values: DTypeView<'a>) -> Self {
        Self { values }
    }

    pub fn from_f32(values: &'a [f32]) -> Self {
        Self::new(DTypeView::F32(values))
    }

    pub fn from_f64(values: &'a [f64]) -> Self {
        Self::new(DTypeView::F64(values))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copies the view into an owned, f64-normalized [`Signal`].
    pub fn to_signal(&self) -> Result<Signal, InertiaError> {
        let n = self.len();
        let mut out = Vec::with_capacity(n);
        for idx in 0..n {
            out.push(self.values.get(idx));
        }
        Signal::from_vec(out)
    }
}

/// Owned, immutable, f64-normalized signal.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    values: Vec<f64>,
}

impl Signal {
    /// Takes ownership of `values`; every sample must be finite.
    pub fn from_vec(values: Vec<f64>) -> Result<Self, InertiaError> {
        if let Some((idx, value)) = values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(InertiaError::invalid_input(format!(
                "signal must contain only finite values: index {idx} has {value}"
            )));
        }
        Ok(Self { values })
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, InertiaError> {
        Self::from_vec(values.to_vec())
    }

    pub fn empty() -> Self {
        Self { values: Vec::new() }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_view(&self) -> SignalView<'_> {
        SignalView::from_f64(&self.values)
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}
