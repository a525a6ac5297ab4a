//! Structure model: buildings placed on a parcel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a structure within one session.
///
/// Assigned monotonically; ids of removed structures are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructureId(pub u64);

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical building category vocabulary.
///
/// The bylaw material uses two overlapping vocabularies (`secondary` vs
/// `accessoryDwellingUnit`); both are kept as distinct categories here since
/// they carry different unit defaults and setback profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructureCategory {
    /// Primary dwelling.
    Principal,
    /// Secondary dwelling (duplex half, attached second unit).
    Secondary,
    /// Three-to-four unit multiplex.
    Multiplex,
    /// Detached accessory dwelling unit.
    AccessoryDwellingUnit,
    /// Coach house over a garage.
    Coach,
    /// Infill housing alongside a retained dwelling. Presence unlocks the
    /// increased coverage allowance.
    Infill,
    /// Detached garage (non-dwelling).
    Garage,
    /// Any other non-dwelling accessory structure.
    Other,
}

impl StructureCategory {
    /// Categories validated against the accessory setback profile.
    pub fn uses_accessory_profile(&self) -> bool {
        matches!(
            self,
            StructureCategory::AccessoryDwellingUnit | StructureCategory::Coach
        )
    }

    /// Non-dwelling categories, capped at the accessory structure height
    /// (one storey).
    pub fn is_non_dwelling(&self) -> bool {
        matches!(self, StructureCategory::Garage | StructureCategory::Other)
    }

    /// Default unit count preselected for this category.
    pub fn default_units(&self) -> u8 {
        match self {
            StructureCategory::Secondary => 2,
            StructureCategory::Multiplex => 3,
            StructureCategory::Garage | StructureCategory::Other => 0,
            _ => 1,
        }
    }
}

impl fmt::Display for StructureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StructureCategory::Principal => "principal",
            StructureCategory::Secondary => "secondary",
            StructureCategory::Multiplex => "multiplex",
            StructureCategory::AccessoryDwellingUnit => "accessory dwelling unit",
            StructureCategory::Coach => "coach house",
            StructureCategory::Infill => "infill",
            StructureCategory::Garage => "garage",
            StructureCategory::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// A rectangular structure placed on the lot.
///
/// `(x_m, y_m)` is the offset of the near-left corner from the lot's
/// front-left corner. Positions may transiently violate setbacks; the
/// placement validator flags them rather than rejecting the edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub id: StructureId,
    pub category: StructureCategory,
    pub width_m: f64,
    pub depth_m: f64,
    /// 1 to 3.
    pub storeys: u8,
    /// 0 to 4. Zero for non-dwelling structures.
    pub units: u8,
    pub x_m: f64,
    pub y_m: f64,
}

impl Structure {
    /// Footprint area in square metres.
    pub fn footprint_m2(&self) -> f64 {
        self.width_m * self.depth_m
    }
}

/// Requested structure attributes, before an id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureSpec {
    pub category: StructureCategory,
    pub width_m: f64,
    pub depth_m: f64,
    pub storeys: u8,
    pub units: u8,
    /// Optional explicit position; centred on the lot when absent.
    #[serde(default)]
    pub x_m: Option<f64>,
    #[serde(default)]
    pub y_m: Option<f64>,
}

/// Partial update applied to an existing structure. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructurePatch {
    #[serde(default)]
    pub category: Option<StructureCategory>,
    #[serde(default)]
    pub width_m: Option<f64>,
    #[serde(default)]
    pub depth_m: Option<f64>,
    #[serde(default)]
    pub storeys: Option<u8>,
    #[serde(default)]
    pub units: Option<u8>,
    #[serde(default)]
    pub x_m: Option<f64>,
    #[serde(default)]
    pub y_m: Option<f64>,
}

impl StructurePatch {
    /// A patch that only moves the structure.
    pub fn position(x_m: f64, y_m: f64) -> Self {
        StructurePatch {
            x_m: Some(x_m),
            y_m: Some(y_m),
            ..StructurePatch::default()
        }
    }

    /// Structure as it would look with this patch applied.
    pub fn apply_to(&self, base: &Structure) -> Structure {
        Structure {
            id: base.id,
            category: self.category.unwrap_or(base.category),
            width_m: self.width_m.unwrap_or(base.width_m),
            depth_m: self.depth_m.unwrap_or(base.depth_m),
            storeys: self.storeys.unwrap_or(base.storeys),
            units: self.units.unwrap_or(base.units),
            x_m: self.x_m.unwrap_or(base.x_m),
            y_m: self.y_m.unwrap_or(base.y_m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal() -> Structure {
        Structure {
            id: StructureId(1),
            category: StructureCategory::Principal,
            width_m: 8.0,
            depth_m: 10.0,
            storeys: 2,
            units: 1,
            x_m: 1.0,
            y_m: 5.0,
        }
    }

    #[test]
    fn category_serde_is_camel_case() {
        let json = serde_json::to_string(&StructureCategory::AccessoryDwellingUnit).unwrap();
        assert_eq!(json, "\"accessoryDwellingUnit\"");
        let cat: StructureCategory = serde_json::from_str("\"garage\"").unwrap();
        assert_eq!(cat, StructureCategory::Garage);
    }

    #[test]
    fn default_units_per_category() {
        assert_eq!(StructureCategory::Secondary.default_units(), 2);
        assert_eq!(StructureCategory::Multiplex.default_units(), 3);
        assert_eq!(StructureCategory::Garage.default_units(), 0);
        assert_eq!(StructureCategory::Principal.default_units(), 1);
    }

    #[test]
    fn empty_patch_is_identity() {
        let base = principal();
        let patched = StructurePatch::default().apply_to(&base);
        assert_eq!(patched, base);
    }

    #[test]
    fn patch_overrides_only_given_fields() {
        let base = principal();
        let patched = StructurePatch::position(2.5, 6.0).apply_to(&base);
        assert_eq!(patched.x_m, 2.5);
        assert_eq!(patched.y_m, 6.0);
        assert_eq!(patched.width_m, base.width_m);
        assert_eq!(patched.units, base.units);
    }
}
