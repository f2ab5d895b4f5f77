//! Named descriptor pools, as produced by analysis runs.

use std::collections::BTreeMap;

use crate::compare::{self, CheckFailure};
use crate::matrix::Matrix;

/// One descriptor value in a [`Pool`].
#[derive(Debug, Clone, PartialEq)]
pub enum PoolValue {
    Real(f64),
    RealVector(Vec<f64>),
    RealMatrix(Matrix<f64>),
    Str(String),
    StrVector(Vec<String>),
}

impl From<f64> for PoolValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<Vec<f64>> for PoolValue {
    fn from(value: Vec<f64>) -> Self {
        Self::RealVector(value)
    }
}

impl From<Matrix<f64>> for PoolValue {
    fn from(value: Matrix<f64>) -> Self {
        Self::RealMatrix(value)
    }
}

impl From<String> for PoolValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for PoolValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<Vec<String>> for PoolValue {
    fn from(value: Vec<String>) -> Self {
        Self::StrVector(value)
    }
}

/// A failed pool sweep, naming the offending descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolCheckFailure {
    pub key: String,
    pub failure: CheckFailure,
}

impl std::fmt::Display for PoolCheckFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "descriptor {:?}: {}", self.key, self.failure)
    }
}

impl std::error::Error for PoolCheckFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.failure)
    }
}

/// Ordered collection of named descriptor values.
///
/// Iteration follows descriptor-name order, so sweep failures are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pool {
    entries: BTreeMap<String, PoolValue>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor, replacing any previous value under the name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PoolValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&PoolValue> {
        self.entries.get(name)
    }

    /// All descriptor names, in order.
    pub fn descriptor_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool holds no descriptors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fail on the first NaN or infinite value in any numeric descriptor.
    ///
    /// String descriptors are skipped.
    pub fn check_finite(&self) -> Result<(), PoolCheckFailure> {
        for (key, value) in &self.entries {
            let checked = match value {
                PoolValue::Real(x) => compare::check_finite(*x),
                PoolValue::RealVector(v) => compare::check_all_finite(v),
                PoolValue::RealMatrix(m) => compare::check_all_finite(m.as_slice()),
                PoolValue::Str(_) | PoolValue::StrVector(_) => Ok(()),
            };
            checked.map_err(|failure| PoolCheckFailure {
                key: key.clone(),
                failure,
            })?;
        }
        Ok(())
    }
}
