//! # openmc-ctl - Control surface for an embedded OpenMC engine
//!
//! The host process embeds a separately-compiled simulation engine. This
//! crate exposes selected pieces of the engine's internal global state -
//! the scalars controlling run behavior - as typed, validated attributes on
//! a single façade object, without the caller touching the engine's memory
//! layout or calling convention.
//!
//! ## Philosophy
//!
//! - **Bind once, access forever** - symbols resolve at construction, never per access
//! - **Fail at bind time, not run time** - a missing symbol kills construction outright
//! - **Lenient reads, strict writes** - the engine may hold states we don't
//!   recognize; we may not write states it doesn't
//! - **Pure core, swappable adapters** - hexagonal architecture
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       openmc-ctl                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  CORE (pure domain, no I/O)                                 │
//! │    ScalarType, ScalarValue, RunMode, RunModeReading         │
//! │                                                              │
//! │  PORTS (trait contracts)                                     │
//! │    EngineImage, SymbolSlot, Global<T>                       │
//! │                                                              │
//! │  ADAPTERS (swappable implementations)                       │
//! │    Native: dlopen-backed engine image                       │
//! │    Stub: in-memory image for tests                          │
//! │                                                              │
//! │  FAÇADE (orchestration)                                      │
//! │    Settings - the main entry point                          │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use openmc_ctl::{NativeImage, RunModeReading, Settings};
//!
//! // Bind the façade against the loaded engine image
//! let image = NativeImage::load("/opt/openmc/lib/libopenmc.so")?;
//! let settings = Settings::bind(image)?;
//!
//! // Configure the run
//! settings.set_particles(1_000_000);
//! settings.set_batches(120);
//! settings.set_inactive(20);
//! settings.set_run_mode("eigenvalue")?;
//! settings.set_seed(7);
//!
//! // Read back whatever the engine currently holds
//! match settings.run_mode() {
//!     RunModeReading::Known(mode) => println!("mode: {mode}"),
//!     RunModeReading::Unknown(code) => println!("engine holds raw code {code}"),
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Core domain - pure types, no I/O
/// Contains: ScalarType, ScalarValue, Scalar trait, RunMode, RunModeReading
pub mod core;

/// Port definitions - trait contracts for adapters
/// Contains: EngineImage trait, SymbolSlot, Global descriptor, symbol names
pub mod ports;

/// Adapter implementations - swappable engine-image backends
/// Contains: native (dlopen) and stub submodules
pub mod adapters;

/// Façade - orchestration layer
/// Contains: Settings main struct
pub mod facade;

/// Error type shared across the crate
pub mod error;

// ============================================================================
// RE-EXPORTS (public API)
// ============================================================================

// Core types
pub use crate::core::mode::{RunMode, RunModeReading};
pub use crate::core::scalar::{Scalar, ScalarType, ScalarValue};

// Port contracts
pub use crate::ports::{symbols, EngineImage, Global, SymbolSlot};

// Adapters
pub use crate::adapters::stub::StubImage;

#[cfg(feature = "native")]
pub use crate::adapters::native::NativeImage;

// Façade
pub use crate::facade::{Settings, SettingsSnapshot};

// Errors
pub use crate::error::ControlError;
