//! Read-only typed view over the loaded bylaw document.
//!
//! No policy logic lives here beyond safe lookup with the documented R1A
//! fallback. Safe to share across threads without synchronization: the
//! document is immutable after load.

use tracing::debug;

use ssmuh_core::{LoadingType, ZoneFamily};

use crate::schema::{
    BylawDocument, EligibilityCriteria, HeightRestrictions, ResidentialParking, SetbackSet,
    ThirdStoreyRestrictions, ZoneInfo,
};

/// Immutable accessor over one [`BylawDocument`].
#[derive(Debug, Clone)]
pub struct RuleSet {
    doc: BylawDocument,
}

impl RuleSet {
    pub fn new(doc: BylawDocument) -> Self {
        RuleSet { doc }
    }

    /// The underlying document.
    pub fn document(&self) -> &BylawDocument {
        &self.doc
    }

    /// Setback set for a zone family and loading orientation.
    ///
    /// Families without their own table resolve to the R1A tables. This is
    /// the documented fallback, never an empty result.
    pub fn setbacks_for(&self, family: &ZoneFamily, loading: LoadingType) -> &SetbackSet {
        let zone = match family {
            ZoneFamily::R1A => Some(&self.doc.setbacks.zone_r1a),
            ZoneFamily::R1Bcde => self.doc.setbacks.residential_zones.r1bcde.as_ref(),
            ZoneFamily::CompactLot => self.doc.setbacks.residential_zones.compact_lot.as_ref(),
            _ => None,
        };

        match zone {
            Some(zone) => zone.for_loading(loading),
            None => {
                debug!(family = %family, "no setback table for zone family, falling back to R1A");
                self.doc.setbacks.zone_r1a.for_loading(loading)
            }
        }
    }

    /// Permission entry for a zone family, if the document carries one.
    pub fn zone_info(&self, family: &ZoneFamily) -> Option<&ZoneInfo> {
        let residential = &self.doc.zoning_areas.residential_zones;
        match family {
            ZoneFamily::R1A => residential.get("R1A"),
            ZoneFamily::R1Bcde => residential.get("R1B_R1C_R1D_R1E"),
            ZoneFamily::R2 => residential.get("R2"),
            ZoneFamily::CompactLot => residential.get("R_CL"),
            ZoneFamily::Suburban(code) => self.doc.zoning_areas.suburban_residential.get(code),
            ZoneFamily::ComprehensiveDev(_) | ZoneFamily::Unknown(_) => None,
        }
    }

    /// Sight-triangle clearance distance for the given frontage class.
    ///
    /// `None` when the document has no sight-triangle provision (the
    /// corner-lot check is then skipped entirely).
    pub fn sight_triangle_distance(&self, arterial_frontage: bool) -> Option<f64> {
        let triangle = self
            .doc
            .setbacks
            .general_provisions
            .as_ref()?
            .corner_lot_sight_triangle
            .as_ref()?;

        if arterial_frontage {
            if let Some(rule) = &triangle.arterial_or_collector_street {
                return Some(rule.distance);
            }
        }
        Some(triangle.local_street_or_lane.distance)
    }

    /// Maximum dwelling units for a lot of the given area.
    pub fn max_units_allowed(&self, area_m2: f64) -> u8 {
        let criteria = self.eligibility();
        if area_m2 <= criteria.small_lot_threshold_m2 {
            criteria.max_units_if_small_lot
        } else {
            criteria.max_units
        }
    }

    pub fn eligibility(&self) -> &EligibilityCriteria {
        &self.doc.small_scale_multi_unit_housing.eligibility_criteria
    }

    pub fn heights(&self) -> &HeightRestrictions {
        &self.doc.height_restrictions
    }

    pub fn third_storey(&self) -> &ThirdStoreyRestrictions {
        &self.doc.third_storey_restrictions
    }

    pub fn parking(&self) -> &ResidentialParking {
        &self.doc.parking_requirements.residential
    }
}
