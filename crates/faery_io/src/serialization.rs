//! JSON and HexDNA (hex-encoded JSON) helpers for genomes and other serde
//! types.
//!
//! Body plans are stored as a flat node list and brains are shape-checked
//! on decode, so anything these helpers return is safe to build from.

use crate::error::{IoError, Result};
use faery_data::Genome;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string(data)?)
}

pub fn to_json_pretty<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Rejects blank input before handing it to serde.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    if json.trim().is_empty() {
        return Err(IoError::validation("Empty JSON string"));
    }
    Ok(serde_json::from_str(json)?)
}

pub fn to_hex_dna<T: Serialize>(data: &T) -> Result<String> {
    Ok(hex::encode(to_json(data)?.as_bytes()))
}

pub fn from_hex_dna<T: DeserializeOwned>(hex_str: &str) -> Result<T> {
    let trimmed = hex_str.trim();
    if trimmed.is_empty() {
        return Err(IoError::validation("Empty hex string"));
    }
    let bytes = hex::decode(trimmed)
        .map_err(|e| IoError::validation(format!("Invalid hex encoding: {e}")))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| IoError::validation(format!("Invalid UTF-8 in hex: {e}")))?;
    from_json(&json)
}

#[must_use]
pub fn is_valid_hex_dna(hex_str: &str) -> bool {
    let trimmed = hex_str.trim();
    !trimmed.is_empty() && hex::decode(trimmed).is_ok()
}

pub fn genome_from_hex_dna(hex_str: &str) -> Result<Genome> {
    from_hex_dna(hex_str)
}

pub fn write_json_file<T: Serialize, P: AsRef<Path>>(data: &T, path: P) -> Result<()> {
    let json = to_json_pretty(data)?;
    std::fs::write(&path, json).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("writing JSON to {:?}", path.as_ref()))
    })
}

pub fn read_json_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::not_found(path.display().to_string()));
    }
    let json = std::fs::read_to_string(path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("reading JSON from {path:?}"))
    })?;
    from_json(&json).map_err(|e| e.with_context(format!("decoding {path:?}")))
}

pub fn read_genome_file<P: AsRef<Path>>(path: P) -> Result<Genome> {
    read_json_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faery_core::seeds::figure_genome;
    use faery_data::NeuronWeightMatrix;

    fn genome_with_brain() -> Genome {
        let mut genome = figure_genome(1.0);
        genome.brain_weights = Some(
            NeuronWeightMatrix::from_parts(
                vec!["3".into(), "4".into()],
                vec!["0_1".into()],
                vec![0.5, -0.25],
            )
            .unwrap(),
        );
        genome
    }

    #[test]
    fn test_genome_json_roundtrip() {
        let genome = genome_with_brain();
        let json = to_json(&genome).unwrap();
        let restored: Genome = from_json(&json).unwrap();
        assert_eq!(restored, genome);
    }

    #[test]
    fn test_hex_dna_restores_lookup_caches() {
        let genome = genome_with_brain();
        let dna = to_hex_dna(&genome).unwrap();
        assert!(is_valid_hex_dna(&dna));
        let restored = genome_from_hex_dna(&dna).unwrap();
        let brain = restored.brain_weights.unwrap();
        assert_eq!(brain.motor_index.get("0_1"), Some(&0));
        assert_eq!(brain.get("4", "0_1"), Some(-0.25));
    }

    #[test]
    fn test_blank_and_malformed_input() {
        assert!(matches!(
            from_json::<Genome>("  "),
            Err(IoError::Validation(_))
        ));
        assert!(matches!(
            from_json::<Genome>("{ \"id\": 1 }"),
            Err(IoError::Json(_))
        ));
        assert!(matches!(
            from_hex_dna::<Genome>("zz"),
            Err(IoError::Validation(_))
        ));
        assert!(!is_valid_hex_dna(""));
        assert!(is_valid_hex_dna("7b7d"));
    }

    #[test]
    fn test_malformed_brain_is_rejected() {
        let mut genome = genome_with_brain();
        genome.brain_weights = None;
        let body = to_json(&genome.body).unwrap();
        let json = format!(
            r#"{{"id":3,"brain_weights":{{"sensor_names":["s"],"motor_names":["a","b"],"weights":[1,2,3]}},"body":{body}}}"#
        );
        assert!(matches!(from_json::<Genome>(&json), Err(IoError::Json(_))));
        assert!(genome_from_hex_dna(&hex::encode(&json)).is_err());
    }

    #[test]
    fn test_long_chain_roundtrip() {
        use faery_data::{Axis, BodyCons, BodyPartKind, BuildSpecification, CubeElement};
        let spec = BuildSpecification::new(CubeElement::Front, 1, Axis::Z);
        let kind = BodyPartKind::FixedSizedSensor { size: 1.0 };
        let mut plan = BodyCons::new(299, kind, spec);
        for id in (0..299).rev() {
            plan = BodyCons::new(id, kind, spec).with_child(CubeElement::Front, plan);
        }
        let genome = Genome::new(1, plan);

        let restored: Genome = from_json(&to_json_pretty(&genome).unwrap()).unwrap();
        assert_eq!(restored, genome);
        assert_eq!(genome_from_hex_dna(&to_hex_dna(&genome).unwrap()).unwrap(), genome);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = read_genome_file("/nonexistent/faery/genome_0.json");
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }
}
