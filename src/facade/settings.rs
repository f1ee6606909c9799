//! # Settings façade
//!
//! One object, all run settings. Each attribute is statically wired at
//! construction to exactly one binding strategy:
//! - a [`Global`] descriptor for the direct-memory scalars,
//! - the run-mode translator over its own `Global<i32>`,
//! - the seed entry points for state whose mutation has engine-side
//!   side effects.
//!
//! Construction is all-or-nothing: either every declared symbol resolves,
//! or [`Settings::bind`] fails and no façade exists. There is no partially
//! bound state to misuse.

use tracing::warn;

use crate::core::mode::{RunMode, RunModeReading};
use crate::error::ControlError;
use crate::ports::{symbols, EngineImage, Global};

/// The engine's run settings, bound to a loaded image.
///
/// Owns the image handle. Construct one per image; independent façades over
/// independent images do not interfere, which is what makes the whole crate
/// testable against stub engines.
pub struct Settings<I: EngineImage> {
    image: I,
    batches: Global<i32>,
    entropy_on: Global<bool>,
    generations_per_batch: Global<i32>,
    inactive: Global<i32>,
    particles: Global<i64>,
    restart_batch: Global<i32>,
    restart_run: Global<bool>,
    verbosity: Global<i32>,
    run_mode: Global<i32>,
}

impl<I: EngineImage> Settings<I> {
    /// Bind every run-settings attribute against `image`.
    ///
    /// Fails with [`ControlError::SymbolNotFound`] if any declared symbol
    /// is absent; the façade is never partially usable.
    pub fn bind(image: I) -> Result<Self, ControlError> {
        let batches = Global::bind(&image, symbols::N_BATCHES)?;
        let entropy_on = Global::bind(&image, symbols::ENTROPY_ON)?;
        let generations_per_batch = Global::bind(&image, symbols::GEN_PER_BATCH)?;
        let inactive = Global::bind(&image, symbols::N_INACTIVE)?;
        let particles = Global::bind(&image, symbols::N_PARTICLES)?;
        let restart_batch = Global::bind(&image, symbols::RESTART_BATCH)?;
        let restart_run = Global::bind(&image, symbols::RESTART_RUN)?;
        let verbosity = Global::bind(&image, symbols::VERBOSITY)?;
        let run_mode = Global::bind(&image, symbols::RUN_MODE)?;

        Ok(Self {
            image,
            batches,
            entropy_on,
            generations_per_batch,
            inactive,
            particles,
            restart_batch,
            restart_run,
            verbosity,
            run_mode,
        })
    }

    /// The bound image.
    pub fn image(&self) -> &I {
        &self.image
    }

    /// Unbind, handing the image back.
    pub fn into_image(self) -> I {
        self.image
    }

    // ========================================================================
    // DIRECT-MEMORY ATTRIBUTES
    // ========================================================================

    /// Number of batches to simulate.
    pub fn batches(&self) -> i32 {
        self.batches.get(&self.image)
    }

    pub fn set_batches(&self, batches: i32) {
        self.batches.set(&self.image, batches);
    }

    /// Whether Shannon entropy accumulation is on.
    pub fn entropy_on(&self) -> bool {
        self.entropy_on.get(&self.image)
    }

    pub fn set_entropy_on(&self, on: bool) {
        self.entropy_on.set(&self.image, on);
    }

    /// Fission generations per batch.
    pub fn generations_per_batch(&self) -> i32 {
        self.generations_per_batch.get(&self.image)
    }

    pub fn set_generations_per_batch(&self, generations: i32) {
        self.generations_per_batch.set(&self.image, generations);
    }

    /// Number of inactive (non-scoring) batches.
    pub fn inactive(&self) -> i32 {
        self.inactive.get(&self.image)
    }

    pub fn set_inactive(&self, inactive: i32) {
        self.inactive.set(&self.image, inactive);
    }

    /// Particles per generation.
    pub fn particles(&self) -> i64 {
        self.particles.get(&self.image)
    }

    pub fn set_particles(&self, particles: i64) {
        self.particles.set(&self.image, particles);
    }

    /// Batch to restart from.
    pub fn restart_batch(&self) -> i32 {
        self.restart_batch.get(&self.image)
    }

    pub fn set_restart_batch(&self, batch: i32) {
        self.restart_batch.set(&self.image, batch);
    }

    /// Whether this run restarts a previous one.
    pub fn restart_run(&self) -> bool {
        self.restart_run.get(&self.image)
    }

    pub fn set_restart_run(&self, restart: bool) {
        self.restart_run.set(&self.image, restart);
    }

    /// Engine console verbosity.
    pub fn verbosity(&self) -> i32 {
        self.verbosity.get(&self.image)
    }

    pub fn set_verbosity(&self, verbosity: i32) {
        self.verbosity.set(&self.image, verbosity);
    }

    // ========================================================================
    // RUN MODE (enumerated-code translation)
    // ========================================================================

    /// Current run mode, or the raw code if the engine holds one outside
    /// the table.
    ///
    /// Reads never fail: the engine may transiently store a code we do not
    /// recognize, and that is its business to report, not ours to reject.
    pub fn run_mode(&self) -> RunModeReading {
        let code = self.run_mode.get(&self.image);
        match RunMode::from_code(code) {
            Some(mode) => RunModeReading::Known(mode),
            None => {
                warn!(code, "engine holds out-of-table run mode code");
                RunModeReading::Unknown(code)
            }
        }
    }

    /// Set the run mode by display name.
    ///
    /// Writes are strict where reads are lenient: anything outside the five
    /// table names fails with [`ControlError::InvalidRunMode`] naming the
    /// offending value, and nothing is written.
    pub fn set_run_mode(&self, mode: &str) -> Result<(), ControlError> {
        let mode = RunMode::from_name(mode)
            .ok_or_else(|| ControlError::InvalidRunMode(mode.to_string()))?;
        self.run_mode.set(&self.image, mode.code());
        Ok(())
    }

    /// Set the run mode from the typed enum. Cannot fail: every variant is
    /// in the table.
    pub fn set_run_mode_typed(&self, mode: RunMode) {
        self.run_mode.set(&self.image, mode.code());
    }

    // ========================================================================
    // SEED (engine-call-backed)
    // ========================================================================

    /// Current random number seed, as the engine reports it.
    pub fn seed(&self) -> i64 {
        self.image.get_seed()
    }

    /// Re-seed the engine's random number generation.
    ///
    /// Goes through the engine entry point, not memory: the engine derives
    /// dependent random-stream state from the new value.
    pub fn set_seed(&self, seed: i64) {
        self.image.set_seed(seed);
    }

    // ========================================================================
    // SNAPSHOT
    // ========================================================================

    /// Read every attribute once, for operator logging.
    ///
    /// Each field is one independent read at call time; there is no
    /// cross-attribute atomicity, same as for individual accessors.
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            batches: self.batches(),
            entropy_on: self.entropy_on(),
            generations_per_batch: self.generations_per_batch(),
            inactive: self.inactive(),
            particles: self.particles(),
            restart_batch: self.restart_batch(),
            restart_run: self.restart_run(),
            verbosity: self.verbosity(),
            run_mode: self.run_mode(),
            seed: self.seed(),
        }
    }
}

/// Point-in-time capture of every run setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingsSnapshot {
    pub batches: i32,
    pub entropy_on: bool,
    pub generations_per_batch: i32,
    pub inactive: i32,
    pub particles: i64,
    pub restart_batch: i32,
    pub restart_run: bool,
    pub verbosity: i32,
    pub run_mode: RunModeReading,
    pub seed: i64,
}
