//! Bylaw document schema with serde deserialization.
//!
//! Defines the complete type hierarchy for the zoning policy document:
//! setback tables keyed by zone family and loading orientation, height and
//! third-storey restrictions, lot coverage caps, compact-lot thresholds,
//! parking requirements, eligibility criteria, and zone permission tables.
//!
//! Field names mirror the served JSON document (camelCase). Tables the
//! presentation layer reads but the engine does not (building type
//! definitions, prose notes) are ignored on deserialization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Root document ───────────────────────────────────────────────────

/// Top-level zoning bylaw document, loaded once per session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BylawDocument {
    #[serde(default)]
    pub bylaw: Option<BylawMetadata>,
    pub setbacks: SetbacksTable,
    pub height_restrictions: HeightRestrictions,
    pub third_storey_restrictions: ThirdStoreyRestrictions,
    pub lot_coverage: LotCoverage,
    pub compact_lot_zones: CompactLotZones,
    pub parking_requirements: ParkingRequirements,
    pub small_scale_multi_unit_housing: SsmuhSection,
    pub zoning_areas: ZoningAreas,
}

/// Document provenance (bylaw name, adoption info).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BylawMetadata {
    pub name: String,
    #[serde(default)]
    pub amended: Option<String>,
}

// ── Setbacks ────────────────────────────────────────────────────────

/// All setback tables, keyed by zone family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetbacksTable {
    /// Reference zone. Always present; unknown zone families fall back here.
    #[serde(rename = "zoneR1A")]
    pub zone_r1a: ZoneSetbacks,
    #[serde(default)]
    pub residential_zones: ResidentialZoneSetbacks,
    #[serde(default)]
    pub general_provisions: Option<GeneralProvisions>,
}

/// Grouped residential zone families other than R1A.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResidentialZoneSetbacks {
    #[serde(rename = "R1B_R1C_R1D_R1E", default)]
    pub r1bcde: Option<ZoneSetbacks>,
    #[serde(rename = "compactLotR_CL", default)]
    pub compact_lot: Option<ZoneSetbacks>,
}

/// Setback sets for one zone family, by loading orientation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSetbacks {
    pub front_loaded_lot: SetbackSet,
    pub rear_loaded_lot: SetbackSet,
}

impl ZoneSetbacks {
    pub fn for_loading(&self, loading: ssmuh_core::LoadingType) -> &SetbackSet {
        match loading {
            ssmuh_core::LoadingType::Front => &self.front_loaded_lot,
            ssmuh_core::LoadingType::Rear => &self.rear_loaded_lot,
        }
    }
}

/// Per-category setback profiles for one zone family and orientation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetbackSet {
    #[serde(default)]
    pub principal_building: Option<SetbackProfile>,
    #[serde(default)]
    pub accessory_dwelling_unit: Option<SetbackProfile>,
    #[serde(default)]
    pub accessory_detached_garage: Option<SetbackProfile>,
    #[serde(default)]
    pub other_accessory_structure: Option<SetbackProfile>,
}

/// Named-edge setbacks for one building category.
///
/// The bylaw uses two spellings for the interior side edge depending on the
/// table; [`SetbackProfile::side_interior_min`] resolves both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetbackProfile {
    #[serde(default)]
    pub front_lot_line: Option<SetbackRule>,
    #[serde(default)]
    pub rear_lot_line: Option<SetbackRule>,
    #[serde(default)]
    pub side_interior_lot_line: Option<SetbackRule>,
    #[serde(default)]
    pub side_interior_or_lane_or_local_street: Option<SetbackRule>,
    #[serde(default)]
    pub side_collector_or_arterial_street: Option<SetbackRule>,
    #[serde(default)]
    pub side_lane_or_collector_or_arterial_street: Option<SetbackRule>,
}

impl SetbackProfile {
    /// Minimum front setback, 0 when the table has no entry.
    pub fn front_min(&self) -> f64 {
        self.front_lot_line.as_ref().map_or(0.0, |r| r.min)
    }

    /// Minimum rear setback, 0 when the table has no entry.
    pub fn rear_min(&self) -> f64 {
        self.rear_lot_line.as_ref().map_or(0.0, |r| r.min)
    }

    /// Minimum interior side setback, resolving both table spellings.
    pub fn side_interior_min(&self) -> f64 {
        self.side_interior_lot_line
            .as_ref()
            .or(self.side_interior_or_lane_or_local_street.as_ref())
            .map_or(0.0, |r| r.min)
    }

    /// Minimum street-side setback for corner lots, when the table has one.
    pub fn side_street_min(&self) -> Option<f64> {
        self.side_collector_or_arterial_street.as_ref().map(|r| r.min)
    }
}

/// A single setback entry: required minimum, optional maximum, prose note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SetbackRule {
    pub min: f64,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

// ── General provisions (sight triangle) ─────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneralProvisions {
    #[serde(default)]
    pub corner_lot_sight_triangle: Option<SightTriangle>,
}

/// Corner-lot sight triangle distances by street classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SightTriangle {
    pub local_street_or_lane: SightTriangleRule,
    #[serde(default)]
    pub arterial_or_collector_street: Option<SightTriangleRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SightTriangleRule {
    pub distance: f64,
    #[serde(default)]
    pub units: Option<String>,
}

// ── Heights & storeys ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeightRestrictions {
    pub all_other_dwelling_units: HeightRule,
    pub infill_housing_near_rear_lot_line: HeightRule,
    pub accessory_non_dwelling_structures: HeightRule,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeightRule {
    pub max_height: f64,
    #[serde(default)]
    pub applicability: Option<String>,
}

/// Third-storey floor-area caps by unit count (standard zone families).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThirdStoreyRestrictions {
    pub one_or_two_dwelling_units: ThirdStoreyRule,
    pub three_dwelling_units: ThirdStoreyRule,
    pub four_dwelling_units: ThirdStoreyRule,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThirdStoreyRule {
    /// Percent of first-storey floor area. Absent when the rule is a flat
    /// prohibition (the 1-2 unit case).
    #[serde(default)]
    pub max_floor_area: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

// ── Coverage ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LotCoverage {
    pub standard: CoverageRule,
    pub with_infill_housing: CoverageRule,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRule {
    pub max_coverage: f64,
}

/// Compact-lot zone thresholds: coverage branches on lot area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompactLotZones {
    pub lot_area_thresholds: CompactLotThresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompactLotThresholds {
    pub small: SmallLotThreshold,
    pub standard: StandardLotThreshold,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SmallLotThreshold {
    pub max_area_m2: f64,
    pub max_building_coverage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StandardLotThreshold {
    pub max_building_coverage: f64,
    pub with_infill_housing_coverage: f64,
}

// ── Parking ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParkingRequirements {
    pub residential: ResidentialParking,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResidentialParking {
    pub spaces_per_dwelling_unit: f64,
    pub minimum_spaces_per_lot: u32,
}

// ── Eligibility criteria ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SsmuhSection {
    pub eligibility_criteria: EligibilityCriteria,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityCriteria {
    pub max_lot_size_m2: f64,
    pub max_units: u8,
    pub max_units_if_small_lot: u8,
    pub small_lot_threshold_m2: f64,
    #[serde(default)]
    pub required_conditions: Vec<String>,
}

// ── Zone permission tables ──────────────────────────────────────────

/// Which zones permit SSMUH, keyed the way the bylaw groups them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoningAreas {
    #[serde(default)]
    pub residential_zones: HashMap<String, ZoneInfo>,
    #[serde(default)]
    pub suburban_residential: HashMap<String, ZoneInfo>,
    #[serde(default)]
    pub comprehensive_development_zones: Option<ComprehensiveDevZones>,
}

/// Permission entry for one zone family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "allowsSSMUH")]
    pub allows_ssmuh: bool,
    /// Compact-lot families carry prose third-storey notes.
    #[serde(default)]
    pub third_storey_restrictions: Option<CompactThirdStoreyNotes>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompactThirdStoreyNotes {
    pub one_or_two_dwelling_units: String,
    pub three_or_four_dwelling_units: String,
}

/// CD zones list specific sub-zones where SSMUH applies; without a sub-zone
/// code the engine cannot resolve a parcel against it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveDevZones {
    #[serde(default)]
    pub allowed_in_zones: Vec<String>,
}

// ── Tests ───────────────────────────────────────────────────────────
