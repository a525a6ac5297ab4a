//! Parcel eligibility evaluation.
//!
//! Produces a complete verdict: every applicable blocking reason and warning
//! is collected, never short-circuited after the first match, so the caller
//! can present all of them at once.

use serde::{Deserialize, Serialize};

use ssmuh_core::{Parcel, ZoneFamily};

use crate::ruleset::RuleSet;

// ── Verdict ─────────────────────────────────────────────────────────

/// Outcome of an eligibility evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub eligible: bool,
    pub zone_allows_ssmuh: bool,
    /// Hard blockers; any entry makes `eligible` false.
    pub blocking_reasons: Vec<String>,
    /// Advisory only; do not affect `eligible`.
    pub warnings: Vec<String>,
}

impl EligibilityVerdict {
    fn new() -> Self {
        EligibilityVerdict {
            eligible: true,
            zone_allows_ssmuh: true,
            blocking_reasons: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn block(&mut self, reason: impl Into<String>) {
        self.eligible = false;
        self.blocking_reasons.push(reason.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

// ── Evaluation ──────────────────────────────────────────────────────

/// Evaluate whether a parcel qualifies for small-scale multi-unit housing.
pub fn evaluate(ruleset: &RuleSet, parcel: &Parcel) -> EligibilityVerdict {
    let mut verdict = EligibilityVerdict::new();
    let criteria = ruleset.eligibility();

    if parcel.is_arterial_frontage {
        verdict.warn(
            "Board of Variance approval is required if vehicular access is from an arterial road",
        );
    }

    if !parcel.has_sewer {
        verdict.block("Municipal sewer service is required");
    }
    if !parcel.has_water {
        verdict.block("Municipal water service is required");
    }
    if !parcel.within_urban_boundary {
        verdict.block("Property must be within the urban containment boundary");
    }
    if parcel.has_heritage_designation {
        verdict.block("Property with a heritage designation is not eligible");
    }
    if parcel.in_transit_overlay {
        verdict.block("Properties in the transit-oriented area are not eligible");
    }
    if parcel.area_m2() > criteria.max_lot_size_m2 {
        verdict.block(format!(
            "Lot size exceeds the maximum of {} m²",
            criteria.max_lot_size_m2
        ));
    }

    verdict.zone_allows_ssmuh = zone_allows_ssmuh(ruleset, &parcel.zone_family);
    if !verdict.zone_allows_ssmuh {
        verdict.block(format!(
            "SSMUH is not allowed in the {} zone",
            parcel.zone_code
        ));
    }

    if matches!(parcel.zone_family, ZoneFamily::ComprehensiveDev(_)) {
        // Permission cannot be resolved without a specific CD sub-zone;
        // treated as permitted with an explicit caveat.
        verdict.warn(
            "CD zones may allow SSMUH; verify the specific CD sub-zone against the allowed zones list",
        );
    }

    verdict
}

/// Whether a zone family permits SSMUH.
///
/// Suburban-residential codes with no table entry default to not permitted
/// (SR2 is never permitted); comprehensive-development zones default to
/// permitted. Other families without an entry are assumed permitted.
pub fn zone_allows_ssmuh(ruleset: &RuleSet, family: &ZoneFamily) -> bool {
    match family {
        ZoneFamily::Suburban(code) => {
            if code == "SR2" {
                return false;
            }
            ruleset
                .zone_info(family)
                .map(|info| info.allows_ssmuh)
                .unwrap_or(false)
        }
        ZoneFamily::ComprehensiveDev(_) => true,
        _ => ruleset
            .zone_info(family)
            .map(|info| info.allows_ssmuh)
            .unwrap_or(true),
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
    fn serviced_urban_r1a_parcel_is_eligible() {
        let verdict = evaluate(&ruleset(), &Parcel::new(10.0, 30.0, "R1A"));
        assert!(verdict.eligible);
        assert!(verdict.zone_allows_ssmuh);
        assert!(verdict.blocking_reasons.is_empty());
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn all_blocking_reasons_reported_together() {
        let mut parcel = Parcel::new(10.0, 30.0, "R1A");
        parcel.has_sewer = false;
        parcel.has_water = false;
        parcel.has_heritage_designation = true;

        let verdict = evaluate(&ruleset(), &parcel);
        assert!(!verdict.eligible);
        assert_eq!(verdict.blocking_reasons.len(), 3);
    }

    #[test]
    fn oversized_lot_is_blocked() {
        // 70 x 60 = 4200 m², over the 4050 m² cap.
        let verdict = evaluate(&ruleset(), &Parcel::new(70.0, 60.0, "R1A"));
        assert!(!verdict.eligible);
        assert!(verdict.blocking_reasons[0].contains("4050"));
    }

    #[test]
    fn transit_overlay_is_blocked() {
        let mut parcel = Parcel::new(10.0, 30.0, "R1A");
        parcel.in_transit_overlay = true;
        assert!(!evaluate(&ruleset(), &parcel).eligible);
    }

    #[test]
    fn arterial_frontage_warns_but_does_not_block() {
        let mut parcel = Parcel::new(10.0, 30.0, "R1A");
        parcel.is_arterial_frontage = true;

        let verdict = evaluate(&ruleset(), &parcel);
        assert!(verdict.eligible);
        assert_eq!(verdict.warnings.len(), 1);
        assert!(verdict.warnings[0].contains("Board of Variance"));
    }

    #[test]
    fn sr2_never_permits() {
        let verdict = evaluate(&ruleset(), &Parcel::new(10.0, 30.0, "SR2"));
        assert!(!verdict.eligible);
        assert!(!verdict.zone_allows_ssmuh);
    }

    #[test]
    fn suburban_without_table_entry_not_permitted() {
        let verdict = evaluate(&ruleset(), &Parcel::new(10.0, 30.0, "SR9"));
        assert!(!verdict.zone_allows_ssmuh);
    }

    #[test]
    fn suburban_with_permissive_entry_is_eligible() {
        let verdict = evaluate(&ruleset(), &Parcel::new(10.0, 30.0, "SR1"));
        assert!(verdict.eligible);
    }

    #[test]
    fn cd_zone_permitted_with_caveat() {
        let verdict = evaluate(&ruleset(), &Parcel::new(10.0, 30.0, "CD-5"));
        assert!(verdict.eligible);
        assert!(verdict.zone_allows_ssmuh);
        assert!(verdict.warnings.iter().any(|w| w.contains("CD")));
    }

    #[test]
    fn blocked_parcel_still_reports_warnings() {
        let mut parcel = Parcel::new(10.0, 30.0, "R1A");
        parcel.is_arterial_frontage = true;
        parcel.has_sewer = false;

        let verdict = evaluate(&ruleset(), &parcel);
        assert!(!verdict.eligible);
        assert_eq!(verdict.blocking_reasons.len(), 1);
        assert_eq!(verdict.warnings.len(), 1);
    }
}
