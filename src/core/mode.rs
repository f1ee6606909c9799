//! # Run-mode table
//!
//! The engine stores its operating mode as an integer code; the public
//! representation is a name. This module owns the closed code↔name table
//! and the deliberately asymmetric translation around it:
//!
//! - reads are permissive: a code outside the table becomes
//!   [`RunModeReading::Unknown`] carrying the raw code, never an error
//!   (the engine may transiently hold codes we do not recognize);
//! - writes are strict: only the five table names are accepted.

use std::fmt;
use std::str::FromStr;

use crate::error::ControlError;

/// Engine-wide operating mode.
///
/// Discriminants are the codes stored in engine memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RunMode {
    FixedSource = 1,
    Eigenvalue = 2,
    Plot = 3,
    ParticleRestart = 4,
    Volume = 5,
}

impl RunMode {
    /// Every valid mode, in code order.
    pub const ALL: [RunMode; 5] = [
        RunMode::FixedSource,
        RunMode::Eigenvalue,
        RunMode::Plot,
        RunMode::ParticleRestart,
        RunMode::Volume,
    ];

    /// The integer code stored in engine memory.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Look a stored code up in the table.
    pub fn from_code(code: i32) -> Option<RunMode> {
        match code {
            1 => Some(RunMode::FixedSource),
            2 => Some(RunMode::Eigenvalue),
            3 => Some(RunMode::Plot),
            4 => Some(RunMode::ParticleRestart),
            5 => Some(RunMode::Volume),
            _ => None,
        }
    }

    /// The display name.
    pub fn name(self) -> &'static str {
        match self {
            RunMode::FixedSource => "fixed source",
            RunMode::Eigenvalue => "eigenvalue",
            RunMode::Plot => "plot",
            RunMode::ParticleRestart => "particle restart",
            RunMode::Volume => "volume",
        }
    }

    /// Reverse lookup of a display name. `None` for anything off-table.
    pub fn from_name(name: &str) -> Option<RunMode> {
        RunMode::ALL.iter().copied().find(|m| m.name() == name)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RunMode {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RunMode::from_name(s).ok_or_else(|| ControlError::InvalidRunMode(s.to_string()))
    }
}

/// Result of reading the run mode from engine memory.
///
/// Forces callers to handle the out-of-table case instead of hiding it
/// behind a sentinel string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunModeReading {
    /// The stored code is one of the five valid modes.
    Known(RunMode),
    /// The stored code is outside the table; the raw code is carried as-is.
    Unknown(i32),
}

impl RunModeReading {
    /// The mode, if the stored code was valid.
    pub fn known(self) -> Option<RunMode> {
        match self {
            RunModeReading::Known(mode) => Some(mode),
            RunModeReading::Unknown(_) => None,
        }
    }

    /// The display name, if the stored code was valid.
    pub fn name(self) -> Option<&'static str> {
        self.known().map(RunMode::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_names_are_bijective() {
        for mode in RunMode::ALL {
            assert_eq!(RunMode::from_code(mode.code()), Some(mode));
            assert_eq!(RunMode::from_name(mode.name()), Some(mode));
        }
    }

    #[test]
    fn test_codes_are_one_through_five() {
        let codes: Vec<i32> = RunMode::ALL.iter().map(|m| m.code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_from_code_rejects_off_table() {
        assert_eq!(RunMode::from_code(0), None);
        assert_eq!(RunMode::from_code(6), None);
        assert_eq!(RunMode::from_code(-1), None);
    }

    #[test]
    fn test_from_str_names_offending_value() {
        let err = "criticality".parse::<RunMode>().unwrap_err();
        match err {
            ControlError::InvalidRunMode(value) => assert_eq!(value, "criticality"),
            other => panic!("expected InvalidRunMode, got {other:?}"),
        }
    }

    #[test]
    fn test_display_matches_table_names() {
        assert_eq!(RunMode::FixedSource.to_string(), "fixed source");
        assert_eq!(RunMode::ParticleRestart.to_string(), "particle restart");
    }

    #[test]
    fn test_reading_helpers() {
        assert_eq!(
            RunModeReading::Known(RunMode::Plot).name(),
            Some("plot")
        );
        assert_eq!(RunModeReading::Unknown(99).name(), None);
        assert_eq!(RunModeReading::Unknown(99).known(), None);
    }
}
