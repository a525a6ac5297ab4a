//! Planner error type.
//!
//! Nothing in the engine is fatal: every operation returns a value or a
//! structured rejection carrying a human-readable reason.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    /// A hard pre-condition failed; the operation had no side effect.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No structure with this id exists in the session.
    #[error("Structure not found: {0}")]
    StructureNotFound(u64),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
