//! One-shot bylaw document loader.
//!
//! The policy document is loaded once at session start and is immutable for
//! the remainder of the session, so there is no watcher or reload path.
//! JSON is the served format; YAML is accepted as an authoring convenience.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::ruleset::RuleSet;
use crate::schema::BylawDocument;

/// Errors that can occur while loading the bylaw document.
#[derive(Debug, thiserror::Error)]
pub enum BylawError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse/deserialization error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Document parsed but fails a sanity check.
    #[error("Validation error: {0}")]
    Validation(String),

    /// File extension is neither JSON nor YAML.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Result alias for loader operations.
pub type Result<T> = std::result::Result<T, BylawError>;

/// Load a bylaw document from a file, dispatching on extension.
pub fn from_path(path: impl AsRef<Path>) -> Result<RuleSet> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let ruleset = match ext.as_str() {
        "json" => from_json_str(&contents)?,
        "yml" | "yaml" => from_yaml_str(&contents)?,
        other => return Err(BylawError::UnsupportedFormat(other.to_string())),
    };

    info!(path = %path.display(), "loaded bylaw document");
    Ok(ruleset)
}

/// Parse a JSON bylaw document.
pub fn from_json_str(contents: &str) -> Result<RuleSet> {
    let doc: BylawDocument = serde_json::from_str(contents)?;
    validate(&doc)?;
    Ok(RuleSet::new(doc))
}

/// Parse a YAML bylaw document.
pub fn from_yaml_str(contents: &str) -> Result<RuleSet> {
    let doc: BylawDocument = serde_yaml::from_str(contents)?;
    validate(&doc)?;
    Ok(RuleSet::new(doc))
}

/// Sanity checks beyond what the schema can express.
///
/// The R1A tables are the fallback for every unknown zone family, so they
/// must carry a usable principal profile for both orientations.
fn validate(doc: &BylawDocument) -> Result<()> {
    for (name, set) in [
        ("frontLoadedLot", &doc.setbacks.zone_r1a.front_loaded_lot),
        ("rearLoadedLot", &doc.setbacks.zone_r1a.rear_loaded_lot),
    ] {
        if set.principal_building.is_none() {
            return Err(BylawError::Validation(format!(
                "setbacks.zoneR1A.{name} must define a principalBuilding profile"
            )));
        }
    }

    let criteria = &doc.small_scale_multi_unit_housing.eligibility_criteria;
    if criteria.max_units_if_small_lot > criteria.max_units {
        return Err(BylawError::Validation(
            "smallLot unit cap exceeds the standard unit cap".to_string(),
        ));
    }
    if criteria.max_lot_size_m2 <= 0.0 {
        return Err(BylawError::Validation(
            "maxLotSizeM2 must be positive".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = include_str!("../data/sample-bylaw.json");

    #[test]
    fn load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bylaw.json");
        fs::write(&path, SAMPLE).unwrap();

        let ruleset = from_path(&path).unwrap();
        assert_eq!(ruleset.eligibility().max_units, 4);
    }

    #[test]
    fn load_yaml_file() {
        let doc: BylawDocument = serde_json::from_str(SAMPLE).unwrap();
        let yaml = serde_yaml::to_string(&doc).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bylaw.yaml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let ruleset = from_path(&path).unwrap();
        assert_eq!(ruleset.eligibility().max_units, 4);
    }

    #[test]
    fn unsupported_extension_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bylaw.toml");
        fs::write(&path, "not a bylaw").unwrap();

        match from_path(&path) {
            Err(BylawError::UnsupportedFormat(ext)) => assert_eq!(ext, "toml"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_errors() {
        assert!(matches!(from_json_str("{"), Err(BylawError::Json(_))));
    }

    #[test]
    fn missing_r1a_principal_fails_validation() {
        let mut value: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        value["setbacks"]["zoneR1A"]["frontLoadedLot"]
            .as_object_mut()
            .unwrap()
            .remove("principalBuilding");

        let result = from_json_str(&value.to_string());
        assert!(matches!(result, Err(BylawError::Validation(_))));
    }

    #[test]
    fn inverted_unit_caps_fail_validation() {
        let mut value: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        value["smallScaleMultiUnitHousing"]["eligibilityCriteria"]["maxUnitsIfSmallLot"] =
            serde_json::json!(9);

        let result = from_json_str(&value.to_string());
        assert!(matches!(result, Err(BylawError::Validation(_))));
    }
}
