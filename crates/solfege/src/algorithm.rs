//! The contract between checks and an algorithm under test.
//!
//! Algorithms expose `configure` and `compute`, and the only failure they
//! can signal is [`AlgorithmError`]. The `expect_*` helpers turn "this call
//! must fail" / "this call must succeed" into values a test can unwrap.
//! Panics inside an implementation are not caught; they take the test down.

use std::collections::BTreeMap;

use derive_more::Debug;

use crate::container::NumericContainer;

/// The single recognized failure an algorithm can signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmError {
    message: String,
}

impl AlgorithmError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure text supplied by the algorithm.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AlgorithmError {}

/// One configuration parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Named parameters for [`Algorithm::configure`].
///
/// ```
/// use solfege::algorithm::Params;
///
/// let params = Params::new()
///     .with("sampleRate", 44100.0)
///     .with("frameSize", 2048)
///     .with("normalize", true);
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: BTreeMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing any previous value under the name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Store a parameter, replacing any previous value under the name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(name)
    }

    /// All parameter names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An algorithm under test.
///
/// Implementations adapt whatever binding the real library exposes down to
/// this minimal surface: named configuration, positional computation, one
/// recognized error kind.
pub trait Algorithm {
    /// Apply named parameters.
    fn configure(&mut self, params: &Params) -> Result<(), AlgorithmError>;

    /// Run on positional inputs, producing one output container.
    fn compute(
        &mut self,
        inputs: &[NumericContainer],
    ) -> Result<NumericContainer, AlgorithmError>;

    /// Calling form of the algorithm; equivalent to [`Self::compute`].
    fn invoke(
        &mut self,
        inputs: &[NumericContainer],
    ) -> Result<NumericContainer, AlgorithmError> {
        self.compute(inputs)
    }
}

/// Which algorithm operation an expectation helper drove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Configure,
    Compute,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Configure => "configure",
            Self::Compute => "compute",
        };
        f.write_str(name)
    }
}

/// A violated expectation about an algorithm call.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectationFailure {
    /// The operation succeeded where a domain error was expected.
    ErrorNotRaised { operation: Operation },
    /// The operation raised a domain error where success was expected.
    UnexpectedError {
        operation: Operation,
        source: AlgorithmError,
    },
}

impl std::fmt::Display for ExpectationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ErrorNotRaised { operation } => {
                write!(f, "{operation} succeeded; expected a domain error")
            }
            Self::UnexpectedError { operation, source } => {
                write!(f, "{operation} failed unexpectedly: {source}")
            }
        }
    }
}

impl std::error::Error for ExpectationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnexpectedError { source, .. } => Some(source),
            Self::ErrorNotRaised { .. } => None,
        }
    }
}

/// Expect `configure` to fail; the captured domain error is returned.
pub fn expect_configure_failure<A: Algorithm + ?Sized>(
    algorithm: &mut A,
    params: &Params,
) -> Result<AlgorithmError, ExpectationFailure> {
    match algorithm.configure(params) {
        Err(err) => Ok(err),
        Ok(()) => Err(ExpectationFailure::ErrorNotRaised {
            operation: Operation::Configure,
        }),
    }
}

/// Expect `configure` to succeed.
pub fn expect_configure_success<A: Algorithm + ?Sized>(
    algorithm: &mut A,
    params: &Params,
) -> Result<(), ExpectationFailure> {
    algorithm
        .configure(params)
        .map_err(|source| ExpectationFailure::UnexpectedError {
            operation: Operation::Configure,
            source,
        })
}

/// Expect `compute` to fail; the captured domain error is returned.
pub fn expect_compute_failure<A: Algorithm + ?Sized>(
    algorithm: &mut A,
    inputs: &[NumericContainer],
) -> Result<AlgorithmError, ExpectationFailure> {
    match algorithm.compute(inputs) {
        Err(err) => Ok(err),
        Ok(_) => Err(ExpectationFailure::ErrorNotRaised {
            operation: Operation::Compute,
        }),
    }
}

/// Expect `compute` to succeed; the computed container is returned.
pub fn expect_compute_success<A: Algorithm + ?Sized>(
    algorithm: &mut A,
    inputs: &[NumericContainer],
) -> Result<NumericContainer, ExpectationFailure> {
    algorithm
        .compute(inputs)
        .map_err(|source| ExpectationFailure::UnexpectedError {
            operation: Operation::Compute,
            source,
        })
}

/// Algorithm double driven by closures.
///
/// Lets a suite exercise harness plumbing without a real signal-processing
/// implementation behind it.
#[derive(Debug)]
pub struct ScriptedAlgorithm {
    #[debug(skip)]
    on_configure: Box<dyn FnMut(&Params) -> Result<(), AlgorithmError>>,
    #[debug(skip)]
    on_compute: Box<dyn FnMut(&[NumericContainer]) -> Result<NumericContainer, AlgorithmError>>,
}

impl ScriptedAlgorithm {
    pub fn new(
        on_configure: impl FnMut(&Params) -> Result<(), AlgorithmError> + 'static,
        on_compute: impl FnMut(&[NumericContainer]) -> Result<NumericContainer, AlgorithmError>
        + 'static,
    ) -> Self {
        Self {
            on_configure: Box::new(on_configure),
            on_compute: Box::new(on_compute),
        }
    }

    /// Double that accepts any parameters and echoes its first input.
    pub fn passthrough() -> Self {
        Self::new(
            |_| Ok(()),
            |inputs| {
                inputs
                    .first()
                    .cloned()
                    .ok_or_else(|| AlgorithmError::new("passthrough requires one input"))
            },
        )
    }

    /// Double whose every operation fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        let configure_message = message.clone();
        Self::new(
            move |_| Err(AlgorithmError::new(configure_message.clone())),
            move |_| Err(AlgorithmError::new(message.clone())),
        )
    }
}

impl Algorithm for ScriptedAlgorithm {
    fn configure(&mut self, params: &Params) -> Result<(), AlgorithmError> {
        (self.on_configure)(params)
    }

    fn compute(
        &mut self,
        inputs: &[NumericContainer],
    ) -> Result<NumericContainer, AlgorithmError> {
        (self.on_compute)(inputs)
    }
}
