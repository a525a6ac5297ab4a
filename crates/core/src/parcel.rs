//! Parcel model: the lot under evaluation.

use serde::{Deserialize, Serialize};

use crate::zone::ZoneFamily;

/// Vehicle access orientation. Selects which setback table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingType {
    Front,
    Rear,
}

impl Default for LoadingType {
    fn default() -> Self {
        LoadingType::Front
    }
}

/// A single land parcel and its site attributes.
///
/// Owned by one session; mutated only through explicit field edits by the
/// host. The zone family is derived once from `zone_code` via
/// [`Parcel::new`] and must be kept in sync by [`Parcel::set_zone_code`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parcel {
    pub width_m: f64,
    pub depth_m: f64,
    pub zone_code: String,
    #[serde(skip, default = "unknown_family")]
    pub zone_family: ZoneFamily,
    pub loading_type: LoadingType,
    pub is_corner_lot: bool,
    pub is_arterial_frontage: bool,
    pub has_sewer: bool,
    pub has_water: bool,
    pub within_urban_boundary: bool,
    pub has_heritage_designation: bool,
    pub in_transit_overlay: bool,
}

fn unknown_family() -> ZoneFamily {
    ZoneFamily::Unknown(String::new())
}

impl Parcel {
    /// Build a parcel with sensible service defaults and classify its zone.
    pub fn new(width_m: f64, depth_m: f64, zone_code: impl Into<String>) -> Self {
        let zone_code = zone_code.into();
        let zone_family = ZoneFamily::from_code(&zone_code);
        Parcel {
            width_m,
            depth_m,
            zone_code,
            zone_family,
            loading_type: LoadingType::Front,
            is_corner_lot: false,
            is_arterial_frontage: false,
            has_sewer: true,
            has_water: true,
            within_urban_boundary: true,
            has_heritage_designation: false,
            in_transit_overlay: false,
        }
    }

    /// Lot area in square metres, derived from width and depth.
    pub fn area_m2(&self) -> f64 {
        self.width_m * self.depth_m
    }

    /// Change the zone code and re-derive the zone family.
    pub fn set_zone_code(&mut self, code: impl Into<String>) {
        self.zone_code = code.into();
        self.zone_family = ZoneFamily::from_code(&self.zone_code);
    }

    /// Re-derive the zone family after deserialization.
    pub fn reclassify(&mut self) {
        self.zone_family = ZoneFamily::from_code(&self.zone_code);
    }
}
