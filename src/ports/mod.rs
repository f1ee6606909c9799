//! # Ports
//!
//! Trait contracts between the control surface and its backends.
//!
//! [`EngineImage`] is the whole black box the rest of the crate talks to: a
//! named-symbol table of fixed-type memory locations plus the two seed entry
//! points. Adapters implement it; everything above it is adapter-agnostic.
//!
//! [`Global`] is the reusable descriptor over that boundary: one named,
//! typed engine global, resolved exactly once at bind time.

use std::marker::PhantomData;

use tracing::debug;

use crate::core::scalar::{Scalar, ScalarType, ScalarValue};
use crate::error::ControlError;

/// Names of the engine globals and entry points this crate binds.
///
/// These are ABI contract, not configuration: they must match the symbol
/// table the engine image exports.
pub mod symbols {
    pub const N_BATCHES: &str = "n_batches";
    pub const ENTROPY_ON: &str = "openmc_entropy_on";
    pub const GEN_PER_BATCH: &str = "gen_per_batch";
    pub const N_INACTIVE: &str = "n_inactive";
    pub const N_PARTICLES: &str = "n_particles";
    pub const RESTART_BATCH: &str = "openmc_restart_batch";
    pub const RESTART_RUN: &str = "openmc_restart_run";
    pub const VERBOSITY: &str = "openmc_verbosity";
    pub const RUN_MODE: &str = "openmc_run_mode";

    /// Entry point: `openmc_set_seed(int64_t)`.
    pub const SET_SEED: &str = "openmc_set_seed";
    /// Entry point: `openmc_get_seed() -> int64_t`.
    pub const GET_SEED: &str = "openmc_get_seed";
}

/// Opaque handle to a resolved engine global.
///
/// What `raw` means belongs to the adapter that produced the slot (an
/// address for a native image, a table index for a stub). A slot must not
/// outlive the image that resolved it.
#[derive(Debug, Clone, Copy)]
pub struct SymbolSlot {
    raw: usize,
    ty: ScalarType,
}

impl SymbolSlot {
    pub fn new(raw: usize, ty: ScalarType) -> Self {
        Self { raw, ty }
    }

    pub fn raw(&self) -> usize {
        self.raw
    }

    /// The type the global was declared with at resolve time.
    pub fn scalar_type(&self) -> ScalarType {
        self.ty
    }
}

/// A loaded engine image: symbol table plus seed entry points.
///
/// Reads and writes are raw and synchronous: no caching, no locking. The
/// control plane is single-threaded by design; configure before the
/// engine's compute phase starts, never concurrently with it.
pub trait EngineImage {
    /// Resolve a named global declared with type `ty`.
    ///
    /// Called once per attribute, at bind time. Fails with
    /// [`ControlError::SymbolNotFound`] if the name is absent from the
    /// image's symbol table.
    fn resolve(&self, symbol: &str, ty: ScalarType) -> Result<SymbolSlot, ControlError>;

    /// Read the current value at a resolved slot, interpreted as the slot's
    /// declared type. Any bit pattern the engine stored comes back as-is.
    fn read_scalar(&self, slot: &SymbolSlot) -> ScalarValue;

    /// Write `value`, coerced to the slot's declared width. Mutates engine
    /// memory directly; no engine logic runs.
    fn write_scalar(&self, slot: &SymbolSlot, value: ScalarValue);

    /// Seed the engine's random number generation through its entry point.
    ///
    /// The call both stores the value and performs whatever engine-side
    /// derivation re-seeding requires; storage alone would not be enough.
    fn set_seed(&self, seed: i64);

    /// Current seed, as the engine reports it. Goes through the entry point
    /// rather than memory because the canonical value may be computed
    /// engine-side.
    fn get_seed(&self) -> i64;
}

/// Typed accessor bound to one named engine global.
///
/// The descriptor pattern: `(symbol, type)` resolved once into a
/// [`SymbolSlot`], then infallible width-checked reads and writes for the
/// rest of the image's lifetime.
pub struct Global<T: Scalar> {
    slot: SymbolSlot,
    symbol: &'static str,
    _ty: PhantomData<T>,
}

impl<T: Scalar> Global<T> {
    /// Resolve `symbol` in `image` as a `T`-typed global.
    pub fn bind<I: EngineImage + ?Sized>(
        image: &I,
        symbol: &'static str,
    ) -> Result<Global<T>, ControlError> {
        let slot = image.resolve(symbol, T::TYPE)?;
        debug!(symbol, ty = ?T::TYPE, "bound engine global");
        Ok(Global {
            slot,
            symbol,
            _ty: PhantomData,
        })
    }

    /// Current value of the global. Never fails after a successful bind.
    pub fn get<I: EngineImage + ?Sized>(&self, image: &I) -> T {
        T::from_value(image.read_scalar(&self.slot))
    }

    /// Overwrite the global. Width-coerced, not range-checked.
    pub fn set<I: EngineImage + ?Sized>(&self, image: &I, value: T) {
        image.write_scalar(&self.slot, value.into_value());
    }

    /// The symbol this descriptor was bound to.
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stub::StubImage;

    #[test]
    fn test_global_binds_once_and_accesses() {
        let image = StubImage::new();
        let batches: Global<i32> = Global::bind(&image, symbols::N_BATCHES).unwrap();

        assert_eq!(batches.symbol(), "n_batches");
        assert_eq!(batches.get(&image), 0);

        batches.set(&image, 250);
        assert_eq!(batches.get(&image), 250);
    }

    #[test]
    fn test_global_bind_fails_on_missing_symbol() {
        let image = StubImage::empty();
        let result: Result<Global<i64>, _> = Global::bind(&image, symbols::N_PARTICLES);

        match result {
            Err(ControlError::SymbolNotFound(name)) => assert_eq!(name, "n_particles"),
            _ => panic!("expected SymbolNotFound"),
        }
    }

    #[test]
    fn test_slot_carries_declared_type() {
        let slot = SymbolSlot::new(0xdead, ScalarType::Double);
        assert_eq!(slot.raw(), 0xdead);
        assert_eq!(slot.scalar_type(), ScalarType::Double);
    }
}
