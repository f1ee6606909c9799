//! # Adapters
//!
//! Swappable implementations of the [`EngineImage`](crate::ports::EngineImage)
//! port:
//! - Native: the real engine, loaded from a shared library (feature `native`)
//! - Stub: an in-memory image for tests and dry runs
//!
//! Each adapter implements the full port. Everything above the port cannot
//! tell them apart.

pub mod stub;

#[cfg(feature = "native")]
pub mod native;
