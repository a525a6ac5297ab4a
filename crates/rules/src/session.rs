//! Planning session: one parcel, its structures, and a shared ruleset.
//!
//! The session owns the mutable state and derives everything else on demand.
//! Effective rules, eligibility, and metrics are recomputed from the current
//! parcel and structure list on every call; the coverage cap in particular
//! depends on infill presence, so no derived value survives an edit.

use std::sync::Arc;

use tracing::{debug, info};

use ssmuh_core::{
    Parcel, Result, Structure, StructureId, StructurePatch, StructureSpec,
};

use crate::eligibility::{self, EligibilityVerdict};
use crate::metrics::{self, Metrics};
use crate::model::StructureSet;
use crate::placement;
use crate::resolver::{self, EffectiveRules};
use crate::ruleset::RuleSet;

/// A planning session for one parcel.
#[derive(Debug)]
pub struct PlannerSession {
    ruleset: Arc<RuleSet>,
    parcel: Parcel,
    structures: StructureSet,
}

impl PlannerSession {
    pub fn new(ruleset: Arc<RuleSet>, parcel: Parcel) -> Self {
        info!(
            zone = %parcel.zone_code,
            area_m2 = parcel.area_m2(),
            "planning session started"
        );
        PlannerSession {
            ruleset,
            parcel,
            structures: StructureSet::new(),
        }
    }

    pub fn parcel(&self) -> &Parcel {
        &self.parcel
    }

    /// Mutable parcel access. Edits take effect on the next derived call;
    /// structures keep their positions even if the new rules flag them.
    pub fn parcel_mut(&mut self) -> &mut Parcel {
        &mut self.parcel
    }

    /// Effective rules for the parcel as it stands right now.
    pub fn effective_rules(&self) -> EffectiveRules {
        resolver::resolve(
            &self.ruleset,
            &self.parcel,
            self.structures.is_infill_present(),
        )
    }

    pub fn evaluate_eligibility(&self) -> EligibilityVerdict {
        eligibility::evaluate(&self.ruleset, &self.parcel)
    }

    pub fn add_structure(&mut self, spec: StructureSpec) -> Result<StructureId> {
        let category = spec.category;
        let id = self.structures.add(spec, &self.parcel, &self.ruleset)?;
        debug!(%id, %category, "structure added");
        Ok(id)
    }

    pub fn update_structure(&mut self, id: StructureId, patch: StructurePatch) -> Result<()> {
        self.structures.update(id, patch, &self.parcel, &self.ruleset)
    }

    pub fn remove_structure(&mut self, id: StructureId) -> Result<Structure> {
        let removed = self.structures.remove(id)?;
        debug!(%id, "structure removed");
        Ok(removed)
    }

    pub fn structure(&self, id: StructureId) -> Option<&Structure> {
        self.structures.get(id)
    }

    /// Structures in id order.
    pub fn list_structures(&self) -> Vec<&Structure> {
        self.structures.list()
    }

    /// Whether the identified structure's position violates the current
    /// effective rules.
    pub fn violates_setbacks(&self, id: StructureId) -> Result<bool> {
        let structure = self
            .structures
            .get(id)
            .ok_or(ssmuh_core::PlannerError::StructureNotFound(id.0))?;
        let rules = self.effective_rules();
        Ok(placement::violates_setbacks(structure, &self.parcel, &rules))
    }

    /// Ids of every structure currently in violation.
    pub fn violating_structures(&self) -> Vec<StructureId> {
        let rules = self.effective_rules();
        placement::violating_structures(&self.structures.list(), &self.parcel, &rules)
    }

    pub fn compute_metrics(&self) -> Metrics {
        metrics::compute(&self.ruleset, &self.parcel, &self.structures)
    }
}
