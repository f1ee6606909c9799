//! # Stub engine image
//!
//! In-memory implementation of the [`EngineImage`] port.
//!
//! Good for:
//! - Testing the façade without a loaded engine
//! - Dry-running configuration logic
//! - Forcing stored bit patterns no well-behaved engine would produce
//!
//! The seed lives in its own cell and is only reachable through the seed
//! entry points; `poke` cannot touch it. A reseed counter stands in for the
//! engine-side derivation that re-seeding triggers, so tests can prove the
//! indirect path was taken.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::core::mode::RunMode;
use crate::core::scalar::{ScalarType, ScalarValue};
use crate::error::ControlError;
use crate::ports::{symbols, EngineImage, SymbolSlot};

/// In-memory engine image.
pub struct StubImage {
    /// Symbol table: name -> index into `cells`
    names: HashMap<String, usize>,

    /// The stored globals, by index
    cells: RefCell<Vec<ScalarValue>>,

    /// Seed state, reachable only through the entry points
    seed: Cell<i64>,

    /// How many times `set_seed` ran
    reseeds: Cell<u64>,
}

impl StubImage {
    /// An image exporting the full standard symbol table with the neutral
    /// defaults a freshly initialized engine reports.
    pub fn new() -> Self {
        let mut image = Self::empty();
        image.define(symbols::N_BATCHES, ScalarValue::Int32(0));
        image.define(symbols::ENTROPY_ON, ScalarValue::Bool(false));
        image.define(symbols::GEN_PER_BATCH, ScalarValue::Int32(1));
        image.define(symbols::N_INACTIVE, ScalarValue::Int32(0));
        image.define(symbols::N_PARTICLES, ScalarValue::Int64(0));
        image.define(symbols::RESTART_BATCH, ScalarValue::Int32(0));
        image.define(symbols::RESTART_RUN, ScalarValue::Bool(false));
        image.define(symbols::VERBOSITY, ScalarValue::Int32(7));
        image.define(
            symbols::RUN_MODE,
            ScalarValue::Int32(RunMode::Eigenvalue.code()),
        );
        image
    }

    /// An image exporting no symbols at all. Build partial tables with
    /// [`define`](Self::define); this is how bind-time failure gets tested.
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
            cells: RefCell::new(Vec::new()),
            seed: Cell::new(0),
            reseeds: Cell::new(0),
        }
    }

    /// Export `symbol` with an initial value. Re-defining replaces the
    /// stored value in place, so slots already resolved stay valid.
    pub fn define(&mut self, symbol: &str, value: ScalarValue) {
        match self.names.get(symbol).copied() {
            Some(idx) => self.cells.borrow_mut()[idx] = value,
            None => {
                let mut cells = self.cells.borrow_mut();
                self.names.insert(symbol.to_string(), cells.len());
                cells.push(value);
            }
        }
    }

    /// Overwrite a stored global out-of-band, bypassing every binding.
    ///
    /// This is the engine scribbling on its own memory: no coercion, no
    /// validation. Panics if the symbol was never defined: that is a stub
    /// wiring bug, not a runtime condition.
    pub fn poke(&self, symbol: &str, value: ScalarValue) {
        let idx = self.index_of(symbol);
        self.cells.borrow_mut()[idx] = value;
    }

    /// Read a stored global out-of-band.
    pub fn peek(&self, symbol: &str) -> ScalarValue {
        self.cells.borrow()[self.index_of(symbol)]
    }

    /// How many times the seed entry point ran.
    pub fn reseed_count(&self) -> u64 {
        self.reseeds.get()
    }

    fn index_of(&self, symbol: &str) -> usize {
        match self.names.get(symbol) {
            Some(&idx) => idx,
            None => panic!("stub image does not export symbol {symbol:?}"),
        }
    }
}

impl Default for StubImage {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineImage for StubImage {
    fn resolve(&self, symbol: &str, ty: ScalarType) -> Result<SymbolSlot, ControlError> {
        match self.names.get(symbol) {
            Some(&idx) => Ok(SymbolSlot::new(idx, ty)),
            None => Err(ControlError::SymbolNotFound(symbol.to_string())),
        }
    }

    fn read_scalar(&self, slot: &SymbolSlot) -> ScalarValue {
        // Interpret whatever is stored at the slot's declared type, exactly
        // like a raw memory read through a typed pointer.
        self.cells.borrow()[slot.raw()].coerce_to(slot.scalar_type())
    }

    fn write_scalar(&self, slot: &SymbolSlot, value: ScalarValue) {
        let coerced = value.coerce_to(slot.scalar_type());
        self.cells.borrow_mut()[slot.raw()] = coerced;
    }

    fn set_seed(&self, seed: i64) {
        self.seed.set(seed);
        self.reseeds.set(self.reseeds.get() + 1);
    }

    fn get_seed(&self) -> i64 {
        self.seed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_symbol() {
        let image = StubImage::new();
        let slot = image.resolve(symbols::N_BATCHES, ScalarType::Int32).unwrap();
        assert_eq!(slot.scalar_type(), ScalarType::Int32);
    }

    #[test]
    fn test_resolve_missing_symbol() {
        let image = StubImage::empty();
        let result = image.resolve(symbols::N_BATCHES, ScalarType::Int32);
        match result {
            Err(ControlError::SymbolNotFound(name)) => assert_eq!(name, "n_batches"),
            other => panic!("expected SymbolNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_write_coerces_to_declared_width() {
        let image = StubImage::new();
        let slot = image.resolve(symbols::N_BATCHES, ScalarType::Int32).unwrap();

        image.write_scalar(&slot, ScalarValue::Int64(300));

        assert_eq!(image.peek(symbols::N_BATCHES), ScalarValue::Int32(300));
    }

    #[test]
    fn test_poke_bypasses_coercion() {
        let image = StubImage::new();
        image.poke(symbols::RUN_MODE, ScalarValue::Int32(99));
        assert_eq!(image.peek(symbols::RUN_MODE), ScalarValue::Int32(99));
    }

    #[test]
    fn test_seed_only_moves_through_entry_points() {
        let image = StubImage::new();
        assert_eq!(image.reseed_count(), 0);

        image.set_seed(53);

        assert_eq!(image.get_seed(), 53);
        assert_eq!(image.reseed_count(), 1);
    }

    #[test]
    fn test_redefine_replaces_in_place() {
        let mut image = StubImage::empty();
        image.define("x", ScalarValue::Int32(1));
        let slot = image.resolve("x", ScalarType::Int32).unwrap();

        image.define("x", ScalarValue::Int32(2));

        assert_eq!(image.read_scalar(&slot), ScalarValue::Int32(2));
    }
}
