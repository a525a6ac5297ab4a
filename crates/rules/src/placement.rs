//! Setback and sight-triangle placement validation.
//!
//! Placement is permissive: a structure may sit anywhere on the lot, and this
//! module only reports whether its current position violates the effective
//! rules. All checks use the lot coordinate system of [`Structure`]: `x_m`
//! from the left lot line, `y_m` from the front lot line.

use ssmuh_core::{Parcel, Structure, StructureCategory, StructureId};

use crate::resolver::EffectiveRules;
use crate::schema::SetbackProfile;

/// Street-side setback assumed for corner lots when the profile carries no
/// collector-or-arterial entry.
const DEFAULT_SIDE_STREET_M: f64 = 3.0;

/// Whether a structure's current position violates any setback or the
/// corner-lot sight triangle.
pub fn violates_setbacks(structure: &Structure, parcel: &Parcel, rules: &EffectiveRules) -> bool {
    let profile = profile_for(structure.category, rules);

    let left = structure.x_m;
    let right = structure.x_m + structure.width_m;
    let front = structure.y_m;
    let rear = structure.y_m + structure.depth_m;

    // A structure exactly on a setback line complies; only crossing it is a
    // violation.
    if front < profile.front_min() {
        return true;
    }
    if rear > parcel.depth_m - profile.rear_min() {
        return true;
    }
    if left < profile.side_interior_min() {
        return true;
    }

    // The right side faces the flanking street on corner lots.
    let right_required = if parcel.is_corner_lot {
        profile.side_street_min().unwrap_or(DEFAULT_SIDE_STREET_M)
    } else {
        profile.side_interior_min()
    };
    if right > parcel.width_m - right_required {
        return true;
    }

    if let Some(distance) = rules.sight_triangle_m {
        if intrudes_on_sight_triangle(structure, parcel, distance) {
            return true;
        }
    }

    false
}

/// Ids of all structures whose current position violates the rules.
pub fn violating_structures(
    structures: &[&Structure],
    parcel: &Parcel,
    rules: &EffectiveRules,
) -> Vec<StructureId> {
    structures
        .iter()
        .filter(|s| violates_setbacks(s, parcel, rules))
        .map(|s| s.id)
        .collect()
}

/// Sight-triangle test against the rear-right lot corner, where the flanking
/// street meets the lane.
///
/// The clear zone is the right triangle with legs of `distance` metres along
/// each lot line; a structure intrudes when it enters the corner box and
/// crosses the hypotenuse, not merely the bounding box.
fn intrudes_on_sight_triangle(structure: &Structure, parcel: &Parcel, distance: f64) -> bool {
    let right_gap = parcel.width_m - (structure.x_m + structure.width_m);
    let rear_gap = parcel.depth_m - (structure.y_m + structure.depth_m);

    right_gap < distance && rear_gap < distance && right_gap + rear_gap < distance
}

/// Profile applicable to a structure category.
///
/// Categories without their own table entry validate against the principal
/// profile, matching the R1A-style tables that only split out accessory
/// dwellings and garages.
fn profile_for(category: StructureCategory, rules: &EffectiveRules) -> &SetbackProfile {
    let specific = match category {
        c if c.uses_accessory_profile() => rules.accessory.as_ref(),
        StructureCategory::Garage => rules.detached_garage.as_ref(),
        StructureCategory::Other => rules.other_accessory.as_ref(),
        _ => None,
    };
    specific.unwrap_or(&rules.principal)
}
