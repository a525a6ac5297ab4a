//! Zone rule resolution: parcel attributes → one merged [`EffectiveRules`].
//!
//! Resolution is a pure function of `(parcel, infill_present)` over the
//! immutable ruleset. The arterial overlay produces a new value; it never
//! mutates a previously returned rules object, and it only touches fields
//! the arterial entries explicitly carry.

use ssmuh_core::{LoadingType, Parcel, ZoneFamily};

use crate::ruleset::RuleSet;
use crate::schema::{SetbackProfile, SetbackRule, SetbackSet, ThirdStoreyRestrictions};

/// The resolved, flattened policy for one parcel.
///
/// Always a fresh derived value; recompute whenever parcel attributes or
/// infill presence change.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveRules {
    pub zone_family: ZoneFamily,
    /// Setbacks for the principal building, arterial overlay applied.
    pub principal: SetbackProfile,
    /// Setbacks for accessory dwelling categories, when the table has them.
    pub accessory: Option<SetbackProfile>,
    /// Detached-garage profile, when the table has one.
    pub detached_garage: Option<SetbackProfile>,
    /// Other non-dwelling accessory structures.
    pub other_accessory: Option<SetbackProfile>,
    /// Sight-triangle clearance; set only for corner lots.
    pub sight_triangle_m: Option<f64>,
    /// Lot coverage cap in percent, already branched on family/area/infill.
    pub max_coverage_pct: f64,
    pub max_height_dwelling_m: f64,
    pub max_height_accessory_m: f64,
    pub max_height_infill_near_rear_m: f64,
    pub third_storey: ThirdStoreyRestrictions,
}

/// Resolve the effective rules for a parcel.
///
/// `infill_present` is a structure-derived fact owned by the caller (the
/// coverage cap depends on it, and it depends on the structure list), so it
/// is passed in rather than read from the parcel.
pub fn resolve(ruleset: &RuleSet, parcel: &Parcel, infill_present: bool) -> EffectiveRules {
    let base = ruleset.setbacks_for(&parcel.zone_family, parcel.loading_type);

    let mut principal = base.principal_building.clone().unwrap_or_default();
    let mut accessory = base.accessory_dwelling_unit.clone();
    let mut detached_garage = base.accessory_detached_garage.clone();
    let other_accessory = base.other_accessory_structure.clone();

    if parcel.is_arterial_frontage {
        let overlay = arterial_overlay(&parcel.zone_family, parcel.loading_type, base);
        overlay.apply(&mut principal, accessory.as_mut(), detached_garage.as_mut());
    }

    let sight_triangle_m = if parcel.is_corner_lot {
        ruleset.sight_triangle_distance(parcel.is_arterial_frontage)
    } else {
        None
    };

    let heights = ruleset.heights();

    EffectiveRules {
        zone_family: parcel.zone_family.clone(),
        principal,
        accessory,
        detached_garage,
        other_accessory,
        sight_triangle_m,
        max_coverage_pct: coverage_cap(
            ruleset,
            &parcel.zone_family,
            parcel.area_m2(),
            infill_present,
        ),
        max_height_dwelling_m: heights.all_other_dwelling_units.max_height,
        max_height_accessory_m: heights.accessory_non_dwelling_structures.max_height,
        max_height_infill_near_rear_m: heights.infill_housing_near_rear_lot_line.max_height,
        third_storey: ruleset.third_storey().clone(),
    }
}

/// Arterial street-side substitutions extracted from a base setback set.
///
/// Only the categories with explicit arterial entries appear here; an absent
/// field leaves the base value untouched on apply, and the overlay never
/// deletes a base field.
#[derive(Debug, Default)]
struct ArterialOverlay {
    principal_side_street: Option<SetbackRule>,
    accessory_side_street: Option<SetbackRule>,
    garage_side_street: Option<SetbackRule>,
}

impl ArterialOverlay {
    fn apply(
        self,
        principal: &mut SetbackProfile,
        accessory: Option<&mut SetbackProfile>,
        detached_garage: Option<&mut SetbackProfile>,
    ) {
        if let Some(rule) = self.principal_side_street {
            principal.side_collector_or_arterial_street = Some(rule);
        }
        if let (Some(adu), Some(rule)) = (accessory, self.accessory_side_street) {
            adu.side_collector_or_arterial_street = Some(rule);
        }
        if let (Some(garage), Some(rule)) = (detached_garage, self.garage_side_street) {
            garage.side_collector_or_arterial_street = Some(rule);
        }
    }
}

/// Collect the arterial-specific entries for a zone family.
///
/// Principal building and accessory dwelling unit carry their overrides on
/// the collector-or-arterial rows; the compact-lot rear-loaded detached
/// garage uses its lane-or-arterial entry as the street-side value.
fn arterial_overlay(family: &ZoneFamily, loading: LoadingType, base: &SetbackSet) -> ArterialOverlay {
    let garage_side_street = if family.is_compact_lot() && loading == LoadingType::Rear {
        base.accessory_detached_garage.as_ref().and_then(|garage| {
            garage
                .side_collector_or_arterial_street
                .clone()
                .or_else(|| garage.side_lane_or_collector_or_arterial_street.clone())
        })
    } else {
        None
    };

    ArterialOverlay {
        principal_side_street: base
            .principal_building
            .as_ref()
            .and_then(|p| p.side_collector_or_arterial_street.clone()),
        accessory_side_street: base
            .accessory_dwelling_unit
            .as_ref()
            .and_then(|a| a.side_collector_or_arterial_street.clone()),
        garage_side_street,
    }
}

/// Coverage cap selection: a pure function of `(family, lot area, infill)`.
pub fn coverage_cap(
    ruleset: &RuleSet,
    family: &ZoneFamily,
    area_m2: f64,
    infill_present: bool,
) -> f64 {
    let doc = ruleset.document();

    if family.is_compact_lot() {
        let thresholds = &doc.compact_lot_zones.lot_area_thresholds;
        if area_m2 <= thresholds.small.max_area_m2 {
            thresholds.small.max_building_coverage
        } else if infill_present {
            thresholds.standard.with_infill_housing_coverage
        } else {
            thresholds.standard.max_building_coverage
        }
    } else if infill_present {
        doc.lot_coverage.with_infill_housing.max_coverage
    } else {
        doc.lot_coverage.standard.max_coverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssmuh_core::Parcel;

    fn ruleset() -> RuleSet {
        crate::loader::from_json_str(include_str!("../data/sample-bylaw.json")).unwrap()
    }

    #[test]
    fn resolves_base_r1a_rules() {
        let rules = ruleset();
        let parcel = Parcel::new(10.0, 30.0, "R1A");
        let effective = resolve(&rules, &parcel, false);

        assert_eq!(effective.principal.front_min(), 4.5);
        assert_eq!(effective.principal.rear_min(), 4.5);
        assert_eq!(effective.principal.side_interior_min(), 1.2);
        assert!(effective.accessory.is_some());
        assert_eq!(effective.sight_triangle_m, None);
        assert_eq!(effective.max_coverage_pct, 40.0);
    }

    #[test]
    fn sight_triangle_only_on_corner_lots() {
        let rules = ruleset();

        let mut parcel = Parcel::new(10.0, 30.0, "R1A");
        parcel.is_corner_lot = true;
        assert_eq!(resolve(&rules, &parcel, false).sight_triangle_m, Some(4.5));

        parcel.is_arterial_frontage = true;
        assert_eq!(resolve(&rules, &parcel, false).sight_triangle_m, Some(6.0));
    }

    #[test]
    fn arterial_overlay_never_blanks_base_fields() {
        let rules = ruleset();
        let mut parcel = Parcel::new(10.0, 30.0, "R1A");
        parcel.is_arterial_frontage = true;

        let base = resolve(&rules, &Parcel::new(10.0, 30.0, "R1A"), false);
        let overlaid = resolve(&rules, &parcel, false);

        assert_eq!(overlaid.principal.front_min(), base.principal.front_min());
        assert_eq!(overlaid.principal.rear_min(), base.principal.rear_min());
        assert_eq!(
            overlaid.principal.side_street_min(),
            base.principal.side_street_min()
        );
    }

    #[test]
    fn compact_rear_garage_gains_street_side_from_lane_entry() {
        let rules = ruleset();
        let mut parcel = Parcel::new(10.0, 30.0, "R-CL");
        parcel.loading_type = LoadingType::Rear;
        parcel.is_arterial_frontage = true;

        let effective = resolve(&rules, &parcel, false);
        let garage = effective.detached_garage.as_ref().unwrap();
        assert_eq!(garage.side_street_min(), Some(3.0));
    }

    #[test]
    fn coverage_cap_standard_zone() {
        let rules = ruleset();
        let family = ZoneFamily::R1A;
        assert_eq!(coverage_cap(&rules, &family, 400.0, false), 40.0);
        assert_eq!(coverage_cap(&rules, &family, 400.0, true), 50.0);
    }

    #[test]
    fn coverage_cap_compact_lot_branches_on_area() {
        let rules = ruleset();
        let family = ZoneFamily::CompactLot;

        // Small lot: infill does not change the cap.
        assert_eq!(coverage_cap(&rules, &family, 280.0, false), 50.0);
        assert_eq!(coverage_cap(&rules, &family, 280.0, true), 50.0);

        // Standard lot: infill unlocks the higher cap.
        assert_eq!(coverage_cap(&rules, &family, 400.0, false), 45.0);
        assert_eq!(coverage_cap(&rules, &family, 400.0, true), 55.0);
    }

    #[test]
    fn coverage_cap_is_idempotent() {
        let rules = ruleset();
        let family = ZoneFamily::CompactLot;
        let first = coverage_cap(&rules, &family, 350.0, true);
        for _ in 0..3 {
            assert_eq!(coverage_cap(&rules, &family, 350.0, true), first);
        }
    }

    #[test]
    fn resolve_returns_fresh_values() {
        let rules = ruleset();
        let parcel = Parcel::new(10.0, 30.0, "R1A");

        let a = resolve(&rules, &parcel, false);
        let b = resolve(&rules, &parcel, false);
        assert_eq!(a, b);

        // Infill flips only the coverage cap.
        let c = resolve(&rules, &parcel, true);
        assert_eq!(c.principal, a.principal);
        assert_eq!(c.max_coverage_pct, 50.0);
    }
}
