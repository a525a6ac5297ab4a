//! Derived lot metrics: units, coverage, and parking demand.
//!
//! Metrics are recomputed from the current structure list on every request.
//! Nothing here is cached; the coverage cap depends on infill presence, which
//! depends on the structures themselves.

use serde::{Deserialize, Serialize};

use ssmuh_core::Parcel;

use crate::model::StructureSet;
use crate::resolver::coverage_cap;
use crate::ruleset::RuleSet;

/// Snapshot of the lot's derived numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_units: u32,
    pub total_footprint_m2: f64,
    /// Footprint as a percentage of lot area.
    pub coverage_pct: f64,
    pub max_units_allowed: u8,
    /// Coverage cap for the current zone family, lot area, and infill state.
    pub max_coverage_pct: f64,
    pub required_parking_spaces: u32,
    pub is_infill_present: bool,
}

impl Metrics {
    pub fn exceeds_coverage(&self) -> bool {
        self.coverage_pct > self.max_coverage_pct
    }

    pub fn exceeds_units(&self) -> bool {
        self.total_units > u32::from(self.max_units_allowed)
    }
}

/// Compute the metrics snapshot for a parcel and its structures.
pub fn compute(ruleset: &RuleSet, parcel: &Parcel, structures: &StructureSet) -> Metrics {
    let area = parcel.area_m2();
    let total_units = structures.total_units(None);
    let total_footprint_m2 = structures.total_footprint_m2();
    let is_infill_present = structures.is_infill_present();

    let coverage_pct = if area > 0.0 {
        total_footprint_m2 / area * 100.0
    } else {
        0.0
    };

    let parking = ruleset.parking();
    let demanded = (f64::from(total_units) * parking.spaces_per_dwelling_unit).ceil() as u32;
    let required_parking_spaces = demanded.max(parking.minimum_spaces_per_lot);

    Metrics {
        total_units,
        total_footprint_m2,
        coverage_pct,
        max_units_allowed: ruleset.max_units_allowed(area),
        max_coverage_pct: coverage_cap(ruleset, &parcel.zone_family, area, is_infill_present),
        required_parking_spaces,
        is_infill_present,
    }
}
