//! # Core
//!
//! Pure domain types: the primitive value model for engine globals and the
//! closed run-mode table. No I/O, no unsafe code.

pub mod mode;
pub mod scalar;

pub use mode::{RunMode, RunModeReading};
pub use scalar::{Scalar, ScalarType, ScalarValue};
