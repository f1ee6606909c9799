//! # Façade
//!
//! The orchestration layer: one object aggregating every bound attribute
//! behind ordinary method syntax, so callers read and write run settings
//! without knowing which binding strategy backs each one.

mod settings;

pub use settings::{Settings, SettingsSnapshot};
