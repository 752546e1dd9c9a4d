//! Core services - the generation pipeline.
//!
//! Services orchestrate between ports and domain logic. They don't know
//! about concrete backends, synthesizers or terminals.

mod generation;
mod lifecycle;
mod pipeline;

pub use generation::{GenerationConfig, GenerationWorker};
pub use lifecycle::ModelLifecycleManager;
pub use pipeline::{Pipeline, SubmitOutcome};
