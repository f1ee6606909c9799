//! # Native engine image
//!
//! [`EngineImage`] backed by the real engine shared library, loaded with
//! `libloading`. Data symbols resolve to raw addresses inside the image;
//! the two seed entry points resolve to `extern "C"` function pointers.
//! Everything resolves eagerly (entry points at load time, globals at bind
//! time), so attribute access never touches the dynamic linker.
//!
//! At runtime, `libopenmc.so` (or the platform equivalent) must be
//! loadable from the path the host passes in.
//!
//! All unsafe code is contained within this module. Public functions are
//! safe to call; soundness rests on the image actually exporting the
//! declared symbols at their declared types, which is the ABI contract in
//! [`symbols`].

use std::cell::Cell;
use std::ffi::c_void;
use std::marker::PhantomData;
use std::os::raw::c_int;
use std::ptr;

use libloading::{Library, Symbol};
use tracing::{debug, info};

use crate::core::scalar::{ScalarType, ScalarValue};
use crate::error::ControlError;
use crate::ports::{symbols, EngineImage, SymbolSlot};

// c_int-typed globals are bound as Int32; this pins the width assumption.
const _: () = assert!(std::mem::size_of::<c_int>() == 4);

// Entry-point signatures, per the engine's C API
type FnSetSeed = unsafe extern "C" fn(i64);
type FnGetSeed = unsafe extern "C" fn() -> i64;

/// The loaded engine image.
///
/// Keeps the [`Library`] alive for its own lifetime: every resolved slot
/// points into it.
pub struct NativeImage {
    lib: Library,
    fn_set_seed: FnSetSeed,
    fn_get_seed: FnGetSeed,
    // Engine memory is read and written without synchronization; keep the
    // image (and every slot resolved from it) on one thread.
    _not_sync: PhantomData<Cell<()>>,
}

impl NativeImage {
    /// Load the engine image at `path` and resolve its seed entry points.
    pub fn load(path: &str) -> Result<Self, ControlError> {
        // Safety: loading a shared library is inherently unsafe (arbitrary
        // initializers run) but controlled here.
        let lib = unsafe {
            Library::new(path).map_err(|e| ControlError::ImageLoad {
                path: path.to_string(),
                source: Box::new(e),
            })?
        };

        let fn_set_seed: FnSetSeed = unsafe { entry_point(&lib, path, symbols::SET_SEED)? };
        let fn_get_seed: FnGetSeed = unsafe { entry_point(&lib, path, symbols::GET_SEED)? };

        info!(path, "engine image loaded");

        Ok(Self {
            lib,
            fn_set_seed,
            fn_get_seed,
            _not_sync: PhantomData,
        })
    }
}

/// Resolve an entry point and copy the raw fn pointer out of its `Symbol`,
/// detaching it from the borrow of `lib`.
unsafe fn entry_point<T: Copy>(lib: &Library, path: &str, name: &str) -> Result<T, ControlError> {
    let sym: Symbol<T> = lib.get(name.as_bytes()).map_err(|e| ControlError::ImageLoad {
        path: format!("{path}::{name}"),
        source: Box::new(e),
    })?;
    Ok(*sym)
}

impl EngineImage for NativeImage {
    fn resolve(&self, symbol: &str, ty: ScalarType) -> Result<SymbolSlot, ControlError> {
        // Safety: we only take the symbol's address here; it is not
        // dereferenced until read/write, at the declared width.
        let addr = unsafe {
            let sym: Symbol<*mut c_void> = self
                .lib
                .get(symbol.as_bytes())
                .map_err(|_| ControlError::SymbolNotFound(symbol.to_string()))?;
            *sym as usize
        };
        debug!(symbol, "resolved engine symbol");
        Ok(SymbolSlot::new(addr, ty))
    }

    fn read_scalar(&self, slot: &SymbolSlot) -> ScalarValue {
        let addr = slot.raw();
        // Safety: addr came from a successful resolve against this image,
        // which is still loaded, and is read at the declared width. A C
        // bool travels as one byte and is never materialized as a Rust
        // `bool` straight from memory.
        unsafe {
            match slot.scalar_type() {
                ScalarType::Int32 => ScalarValue::Int32(ptr::read(addr as *const i32)),
                ScalarType::Int64 => ScalarValue::Int64(ptr::read(addr as *const i64)),
                ScalarType::Double => ScalarValue::Double(ptr::read(addr as *const f64)),
                ScalarType::Bool => ScalarValue::Bool(ptr::read(addr as *const u8) != 0),
            }
        }
    }

    fn write_scalar(&self, slot: &SymbolSlot, value: ScalarValue) {
        let addr = slot.raw();
        // Safety: as for read_scalar; the value is coerced to the declared
        // width before the store.
        unsafe {
            match slot.scalar_type() {
                ScalarType::Int32 => ptr::write(addr as *mut i32, value.as_i32()),
                ScalarType::Int64 => ptr::write(addr as *mut i64, value.as_i64()),
                ScalarType::Double => ptr::write(addr as *mut f64, value.as_f64()),
                ScalarType::Bool => ptr::write(addr as *mut u8, value.as_bool() as u8),
            }
        }
    }

    fn set_seed(&self, seed: i64) {
        // Safety: entry point resolved at load time from this image.
        unsafe { (self.fn_set_seed)(seed) }
    }

    fn get_seed(&self) -> i64 {
        // Safety: as for set_seed.
        unsafe { (self.fn_get_seed)() }
    }
}
