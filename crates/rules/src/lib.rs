//! Zoning rule resolution and lot placement validation engine.
//!
//! This crate provides:
//! - Bylaw document schema with serde deserialization (JSON and YAML)
//! - One-shot loader with validation of the R1A fallback tables
//! - Zone rule resolution with arterial overlay and coverage-cap branching
//! - Parcel eligibility evaluation with collected blockers and warnings
//! - Structure collection with hard pre-conditions and permissive placement
//! - Setback and corner-lot sight-triangle validation
//! - Derived lot metrics (units, coverage, parking demand)

pub mod eligibility;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod placement;
pub mod resolver;
pub mod ruleset;
pub mod schema;
pub mod session;

pub use eligibility::EligibilityVerdict;
pub use loader::BylawError;
pub use metrics::Metrics;
pub use model::StructureSet;
pub use resolver::EffectiveRules;
pub use ruleset::RuleSet;
pub use session::PlannerSession;
