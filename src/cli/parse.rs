//! Argument parsers for the aurorax-search CLI

use aurorax_search::{ConjunctionType, DistanceValue, Error, Result};
use serde_json::Value;

/// Spellings accepted for an unconstrained pair
const UNCONSTRAINED_WORDS: [&str; 3] = ["none", "null", "unconstrained"];

/// Parse a `<pair>=<km|none>` override.
///
/// Only the value is interpreted here; the key is validated against the
/// block counts when the distance matrix is built.
pub fn parse_max_distance(raw: &str) -> Result<(String, DistanceValue)> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        Error::InvalidInput(format!(
            "Invalid max distance '{raw}' (expected <pair>=<km|none>, e.g. ground1-space1=500)"
        ))
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(Error::InvalidInput(format!("Missing pair key in '{raw}'")));
    }

    let value = value.trim();
    if UNCONSTRAINED_WORDS.iter().any(|w| value.eq_ignore_ascii_case(w)) {
        return Ok((key.to_string(), DistanceValue::Unconstrained));
    }

    let km: f64 = value.parse().map_err(|_| {
        Error::InvalidInput(format!(
            "Invalid distance '{value}' for '{key}' (expected kilometers or 'none')"
        ))
    })?;

    Ok((key.to_string(), DistanceValue::Kilometers(km)))
}

/// Parse a criteria block given as inline JSON
pub fn parse_block(raw: &str) -> Result<Value> {
    serde_json::from_str(raw)
        .map_err(|e| Error::InvalidInput(format!("Invalid criteria block JSON '{raw}': {e}")))
}

/// Parse a conjunction type name (`nbtrace` or `sbtrace`)
pub fn parse_conjunction_type(raw: &str) -> Result<ConjunctionType> {
    raw.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_distance() {
        assert_eq!(
            parse_max_distance("ground1-space2=750").unwrap(),
            ("ground1-space2".to_string(), DistanceValue::Kilometers(750.0))
        );
        assert_eq!(
            parse_max_distance(" space1-space2 = 12.5 ").unwrap(),
            ("space1-space2".to_string(), DistanceValue::Kilometers(12.5))
        );
    }

    #[test]
    fn test_parse_unconstrained() {
        for word in ["none", "NULL", "Unconstrained"] {
            let (_, value) = parse_max_distance(&format!("ground2-space2={word}")).unwrap();
            assert_eq!(value, DistanceValue::Unconstrained);
        }
    }

    #[test]
    fn test_negative_distance_passes_through() {
        // Rejected later with the pair key attached
        let (_, value) = parse_max_distance("ground1-space1=-5").unwrap();
        assert_eq!(value, DistanceValue::Kilometers(-5.0));
    }

    #[test]
    fn test_parse_invalid_max_distance() {
        assert!(parse_max_distance("ground1-space1").is_err());
        assert!(parse_max_distance("=500").is_err());
        assert!(parse_max_distance("ground1-space1=far").is_err());
    }

    #[test]
    fn test_parse_conjunction_type() {
        assert_eq!(parse_conjunction_type("sbtrace").unwrap(), ConjunctionType::Sbtrace);
        assert!(parse_conjunction_type("geographic").is_err());
    }

    #[test]
    fn test_parse_block() {
        let block = parse_block(r#"{"programs": ["themis-asi"]}"#).unwrap();
        assert_eq!(block["programs"][0], "themis-asi");
        assert!(parse_block("{programs").is_err());
    }
}
