//! Zone classification.
//!
//! Zone codes arrive as free-form strings from the host ("R1A", "R1C",
//! "R-CLB", "SR2", "CD-47", ...). They are normalized once into a
//! [`ZoneFamily`] at parcel construction time; everything downstream matches
//! on the enum instead of re-testing string prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zone family a parcel belongs to, as grouped by the bylaw's setback and
/// permission tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneFamily {
    /// Standard residential, the bylaw's reference zone.
    R1A,
    /// R1B through R1E share one table entry.
    R1Bcde,
    /// Two-family residential.
    R2,
    /// Compact-lot zones: R-CL and its A/B/CH variants.
    CompactLot,
    /// Suburban residential (SR1, SR2, SR3, ...). Carries the exact code for
    /// per-code permission lookup.
    Suburban(String),
    /// Comprehensive development zones. The sub-zone number (if any) is kept
    /// but cannot be resolved to a specific permission entry.
    ComprehensiveDev(String),
    /// Anything the bylaw tables do not group. Setback resolution falls back
    /// to R1A for these.
    Unknown(String),
}

impl ZoneFamily {
    /// Classify a raw zone code. Never fails; unrecognized codes become
    /// [`ZoneFamily::Unknown`].
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        match code {
            "R1A" => ZoneFamily::R1A,
            "R1B" | "R1C" | "R1D" | "R1E" => ZoneFamily::R1Bcde,
            "R2" => ZoneFamily::R2,
            "R-CL" | "R-CLA" | "R-CLB" | "R-CLCH" => ZoneFamily::CompactLot,
            _ if code.starts_with("SR") => ZoneFamily::Suburban(code.to_string()),
            _ if code.starts_with("CD") => ZoneFamily::ComprehensiveDev(code.to_string()),
            _ => ZoneFamily::Unknown(code.to_string()),
        }
    }

    /// True for the compact-lot family, which carries its own coverage and
    /// third-storey branches.
    pub fn is_compact_lot(&self) -> bool {
        matches!(self, ZoneFamily::CompactLot)
    }

    /// Human-readable zone name for display.
    pub fn display_name(&self, code: &str) -> String {
        match self {
            ZoneFamily::R1A => "R1A - Standard Residential".to_string(),
            ZoneFamily::R1Bcde => format!("{code} - Residential"),
            ZoneFamily::R2 => "R2 - Two-Family Residential".to_string(),
            ZoneFamily::CompactLot => format!("{code} - Residential Compact Lot"),
            ZoneFamily::Suburban(c) => format!("{c} - Suburban Residential"),
            ZoneFamily::ComprehensiveDev(c) => format!("{c} - Comprehensive Development"),
            ZoneFamily::Unknown(c) => c.clone(),
        }
    }
}

impl fmt::Display for ZoneFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneFamily::R1A => write!(f, "R1A"),
            ZoneFamily::R1Bcde => write!(f, "R1B_R1C_R1D_R1E"),
            ZoneFamily::R2 => write!(f, "R2"),
            ZoneFamily::CompactLot => write!(f, "compactLotR_CL"),
            ZoneFamily::Suburban(c) => write!(f, "{c}"),
            ZoneFamily::ComprehensiveDev(c) => write!(f, "{c}"),
            ZoneFamily::Unknown(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_residential_codes() {
        assert_eq!(ZoneFamily::from_code("R1A"), ZoneFamily::R1A);
        assert_eq!(ZoneFamily::from_code("R1C"), ZoneFamily::R1Bcde);
        assert_eq!(ZoneFamily::from_code("R1E"), ZoneFamily::R1Bcde);
        assert_eq!(ZoneFamily::from_code("R2"), ZoneFamily::R2);
    }

    #[test]
    fn classify_compact_lot_variants() {
        for code in ["R-CL", "R-CLA", "R-CLB", "R-CLCH"] {
            assert_eq!(ZoneFamily::from_code(code), ZoneFamily::CompactLot, "{code}");
        }
    }

    #[test]
    fn classify_prefixed_codes() {
        assert_eq!(
            ZoneFamily::from_code("SR2"),
            ZoneFamily::Suburban("SR2".to_string())
        );
        assert_eq!(
            ZoneFamily::from_code("CD-12"),
            ZoneFamily::ComprehensiveDev("CD-12".to_string())
        );
    }

    #[test]
    fn unrecognized_code_is_unknown() {
        assert_eq!(
            ZoneFamily::from_code("M1"),
            ZoneFamily::Unknown("M1".to_string())
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(
            ZoneFamily::from_code("R1A").display_name("R1A"),
            "R1A - Standard Residential"
        );
        assert_eq!(
            ZoneFamily::from_code("SR1").display_name("SR1"),
            "SR1 - Suburban Residential"
        );
    }
}
