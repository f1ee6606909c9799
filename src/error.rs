use thiserror::Error;

/// Errors raised by the control surface.
///
/// Two of these are fatal and happen exactly once, before any attribute is
/// usable (`ImageLoad`, `SymbolNotFound`); `InvalidRunMode` is the only
/// call-time error and leaves engine state untouched.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The engine image (or one of its entry points) could not be loaded.
    #[error("engine image not loadable at {path}: {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A declared global is absent from the engine's symbol table.
    #[error("symbol not found in engine image: {0}")]
    SymbolNotFound(String),

    /// A run-mode write named a mode outside the closed run-mode table.
    #[error("invalid run mode: {0}")]
    InvalidRunMode(String),
}
