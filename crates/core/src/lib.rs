//! Shared domain model for the SSMUH lot planner.
//!
//! This crate provides:
//! - Zone code classification into families ([`ZoneFamily`])
//! - The parcel under evaluation ([`Parcel`], [`LoadingType`])
//! - Structures placed on the lot ([`Structure`], [`StructureCategory`])
//! - The planner error type ([`PlannerError`])

pub mod error;
pub mod parcel;
pub mod structure;
pub mod zone;

pub use error::*;
pub use parcel::*;
pub use structure::*;
pub use zone::*;
