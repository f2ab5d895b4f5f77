//! Numeric verification toolkit for audio-analysis test suites.
//!
//! Provides readers for flat-text reference fixtures, comparison checks
//! with relative, absolute, and fixed-precision tolerance semantics, and
//! `Result`-based helpers for driving an algorithm under test.
//!
//! # Quick Start
//!
//! ```
//! use solfege::algorithm::{
//!     Params, ScriptedAlgorithm, expect_compute_success, expect_configure_success,
//! };
//! use solfege::{AlgorithmError, NumericContainer, Tolerance, check_containers_close, fixture};
//!
//! // A stand-in for a bound analysis algorithm.
//! let mut halver = ScriptedAlgorithm::new(
//!     |_| Ok(()),
//!     |inputs| match inputs {
//!         [NumericContainer::VectorDouble(v)] => Ok(NumericContainer::from(
//!             v.iter().map(|x| x / 2.0).collect::<Vec<_>>(),
//!         )),
//!         _ => Err(AlgorithmError::new("expected one vector")),
//!     },
//! );
//!
//! expect_configure_success(&mut halver, &Params::new().with("scale", 0.5))?;
//! let output =
//!     expect_compute_success(&mut halver, &[NumericContainer::from(vec![1.0, 2.0, 3.0])])?;
//!
//! let expected = NumericContainer::from(fixture::parse_vector("0.5 1.0 1.5")?);
//! check_containers_close(&output, &expected, Tolerance::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]

pub mod algorithm;
pub mod compare;
pub mod container;
pub mod fixture;
pub mod matrix;
pub mod pool;
pub mod tolerance;

// Public re-exports.
pub use algorithm::{Algorithm, AlgorithmError, Params, ScriptedAlgorithm};
pub use compare::{CheckFailure, check_containers_close};
pub use container::{ContainerKind, Element, ElementWidth, NumericContainer};
pub use fixture::FixtureError;
pub use matrix::Matrix;
pub use pool::{Pool, PoolValue};
pub use tolerance::Tolerance;
