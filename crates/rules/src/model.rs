//! In-memory structure collection for one session.
//!
//! Edits are permissive about placement (a structure may sit in a violating
//! position and is flagged by the placement validator), but a small set of
//! hard pre-conditions is enforced before acceptance: dimensions, the unit
//! cap, accessory height limits, and the third-storey unit minimum. A
//! rejected operation has no side effect.

use std::collections::BTreeMap;

use ssmuh_core::{
    LoadingType, Parcel, PlannerError, Result, Structure, StructureCategory, StructureId,
    StructurePatch, StructureSpec,
};

use crate::ruleset::RuleSet;

/// Rear-lot-line proximity band for the infill height restriction, from the
/// bylaw's applicability clause ("within 6.0 m of the rear lot line").
const INFILL_REAR_BAND_M: f64 = 6.0;

/// Session-owned collection of structures keyed by id.
///
/// Ids are assigned monotonically and never reused after removal.
#[derive(Debug)]
pub struct StructureSet {
    structures: BTreeMap<u64, Structure>,
    next_id: u64,
}

impl Default for StructureSet {
    fn default() -> Self {
        StructureSet::new()
    }
}

impl StructureSet {
    pub fn new() -> Self {
        StructureSet {
            structures: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Add a structure. Position defaults to the centre of the lot when the
    /// request does not give one.
    pub fn add(
        &mut self,
        spec: StructureSpec,
        parcel: &Parcel,
        ruleset: &RuleSet,
    ) -> Result<StructureId> {
        let id = StructureId(self.next_id);
        let candidate = Structure {
            id,
            category: spec.category,
            width_m: spec.width_m,
            depth_m: spec.depth_m,
            storeys: spec.storeys,
            units: spec.units,
            x_m: spec.x_m.unwrap_or((parcel.width_m - spec.width_m) / 2.0),
            y_m: spec.y_m.unwrap_or((parcel.depth_m - spec.depth_m) / 2.0),
        };

        self.check_preconditions(&candidate, None, parcel, ruleset)?;

        self.next_id += 1;
        self.structures.insert(id.0, candidate);
        Ok(id)
    }

    /// Apply a partial update to an existing structure.
    ///
    /// Pre-conditions are checked against the patched value with the
    /// structure's own units excluded from the existing total.
    pub fn update(
        &mut self,
        id: StructureId,
        patch: StructurePatch,
        parcel: &Parcel,
        ruleset: &RuleSet,
    ) -> Result<()> {
        let base = self
            .structures
            .get(&id.0)
            .ok_or(PlannerError::StructureNotFound(id.0))?;

        let candidate = patch.apply_to(base);
        self.check_preconditions(&candidate, Some(id), parcel, ruleset)?;

        self.structures.insert(id.0, candidate);
        Ok(())
    }

    pub fn remove(&mut self, id: StructureId) -> Result<Structure> {
        self.structures
            .remove(&id.0)
            .ok_or(PlannerError::StructureNotFound(id.0))
    }

    pub fn get(&self, id: StructureId) -> Option<&Structure> {
        self.structures.get(&id.0)
    }

    /// Structures in id order.
    pub fn list(&self) -> Vec<&Structure> {
        self.structures.values().collect()
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// Total dwelling units, optionally excluding one structure (the one
    /// being edited).
    pub fn total_units(&self, exclude: Option<StructureId>) -> u32 {
        self.structures
            .values()
            .filter(|s| exclude != Some(s.id))
            .map(|s| u32::from(s.units))
            .sum()
    }

    /// Sum of structure footprints in square metres.
    pub fn total_footprint_m2(&self) -> f64 {
        self.structures.values().map(Structure::footprint_m2).sum()
    }

    /// Whether any structure has the infill category. Feeds the coverage-cap
    /// branch; recomputed on every change, never cached.
    pub fn is_infill_present(&self) -> bool {
        self.structures
            .values()
            .any(|s| s.category == StructureCategory::Infill)
    }

    // ── Hard pre-conditions ─────────────────────────────────────────

    fn check_preconditions(
        &self,
        candidate: &Structure,
        editing: Option<StructureId>,
        parcel: &Parcel,
        ruleset: &RuleSet,
    ) -> Result<()> {
        if candidate.width_m <= 0.0 || candidate.depth_m <= 0.0 {
            return Err(PlannerError::InvalidInput(
                "structure dimensions must be positive".to_string(),
            ));
        }
        if candidate.width_m > parcel.width_m || candidate.depth_m > parcel.depth_m {
            return Err(PlannerError::InvalidInput(
                "structure dimensions exceed the lot size".to_string(),
            ));
        }
        if !(1..=3).contains(&candidate.storeys) {
            return Err(PlannerError::InvalidInput(format!(
                "storeys must be between 1 and 3, got {}",
                candidate.storeys
            )));
        }
        if candidate.units > 4 {
            return Err(PlannerError::InvalidInput(format!(
                "a structure holds at most 4 units, got {}",
                candidate.units
            )));
        }

        let heights = ruleset.heights();

        // Infill deep enough to reach the rear band cannot take a second
        // storey on front-loaded lots.
        if candidate.category == StructureCategory::Infill
            && parcel.loading_type == LoadingType::Front
            && candidate.storeys > 1
            && parcel.depth_m - (candidate.depth_m + INFILL_REAR_BAND_M) < 0.0
        {
            return Err(PlannerError::InvalidInput(format!(
                "infill housing near the rear lot line is limited to {} m (approximately 1 storey)",
                heights.infill_housing_near_rear_lot_line.max_height
            )));
        }

        // Accessory non-dwelling structures are capped at one storey.
        let non_dwelling = candidate.category == StructureCategory::Garage
            || (candidate.category == StructureCategory::Other && candidate.units == 0);
        if non_dwelling && candidate.storeys > 1 {
            return Err(PlannerError::InvalidInput(format!(
                "accessory non-dwelling structures are limited to {} m (approximately 1 storey)",
                heights.accessory_non_dwelling_structures.max_height
            )));
        }

        // Unit cap across the whole lot.
        if candidate.units > 0 {
            let existing = self.total_units(editing);
            let max_units = u32::from(ruleset.max_units_allowed(parcel.area_m2()));
            if existing + u32::from(candidate.units) > max_units {
                return Err(PlannerError::InvalidInput(format!(
                    "this would exceed the maximum of {max_units} units allowed on this lot"
                )));
            }
        }

        // Third storeys need at least 3 units on the lot outside compact-lot
        // zone families.
        if candidate.storeys == 3 && !parcel.zone_family.is_compact_lot() {
            let resulting_units = self.total_units(editing) + u32::from(candidate.units);
            if resulting_units <= 2 {
                return Err(PlannerError::InvalidInput(
                    "a third storey is not permitted with 1-2 dwelling units on the lot"
                        .to_string(),
                ));
            }
        }

        Ok(())
    }
}
