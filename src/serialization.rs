//! `SafeTensors` format support for the model and scaler artifacts.
//!
//! Implements the `SafeTensors` container:
//! ```text
//! [8-byte header: u64 metadata length (little-endian)]
//! [JSON metadata: tensor names, dtypes, shapes, data_offsets,
//!  optional __metadata__ string map]
//! [Raw tensor data: F32 values in little-endian]
//! ```
//!
//! Only F32 tensors are supported; the artifacts this crate consumes are
//! small parameter vectors, not weight blobs. The `__metadata__` section
//! carries the model's precomputed evaluation metrics across save/load.

use crate::error::{ConsumoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Metadata for a single tensor in `SafeTensors` format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TensorMetadata {
    /// Data type of the tensor (always "F32" here).
    pub dtype: String,
    /// Shape of the tensor (e.g., `[n_features]` or `[1]`).
    pub shape: Vec<usize>,
    /// Data offsets `[start, end]` in the raw data section.
    pub data_offsets: [usize; 2],
}

/// Complete `SafeTensors` metadata structure.
/// Uses `BTreeMap` for deterministic JSON serialization (sorted keys).
pub type SafeTensorsMetadata = BTreeMap<String, TensorMetadata>;

/// User metadata from the `SafeTensors` `__metadata__` header section.
pub type UserMetadata = BTreeMap<String, String>;

/// Saves tensors to `SafeTensors` format.
///
/// # Errors
///
/// Returns an error if file writing or JSON serialization fails.
pub fn save_safetensors<P: AsRef<Path>>(
    path: P,
    tensors: &BTreeMap<String, (Vec<f32>, Vec<usize>)>,
) -> Result<()> {
    save_safetensors_with_metadata(path, tensors, &UserMetadata::new())
}

/// Saves tensors to `SafeTensors` format with a `__metadata__` section.
///
/// # Errors
///
/// Returns an error if file writing or JSON serialization fails.
pub fn save_safetensors_with_metadata<P: AsRef<Path>>(
    path: P,
    tensors: &BTreeMap<String, (Vec<f32>, Vec<usize>)>,
    user_metadata: &UserMetadata,
) -> Result<()> {
    let mut header = serde_json::Map::new();

    if !user_metadata.is_empty() {
        let meta_obj: serde_json::Map<String, serde_json::Value> = user_metadata
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        header.insert(
            "__metadata__".to_string(),
            serde_json::Value::Object(meta_obj),
        );
    }

    // BTreeMap already provides sorted iteration
    let mut raw_data = Vec::new();
    let mut current_offset = 0;

    for (name, (data, shape)) in tensors {
        let start_offset = current_offset;
        let data_size = data.len() * 4; // F32 = 4 bytes
        let end_offset = current_offset + data_size;

        let tensor_meta = serde_json::to_value(TensorMetadata {
            dtype: "F32".to_string(),
            shape: shape.clone(),
            data_offsets: [start_offset, end_offset],
        })
        .map_err(|e| ConsumoError::Serialization(format!("header encoding failed: {e}")))?;
        header.insert(name.clone(), tensor_meta);

        for &value in data {
            raw_data.extend_from_slice(&value.to_le_bytes());
        }
        current_offset = end_offset;
    }

    let metadata_json = serde_json::to_string(&header)
        .map_err(|e| ConsumoError::Serialization(format!("header encoding failed: {e}")))?;
    let metadata_bytes = metadata_json.as_bytes();
    let metadata_len = metadata_bytes.len() as u64;

    let mut output = Vec::new();
    output.extend_from_slice(&metadata_len.to_le_bytes());
    output.extend_from_slice(metadata_bytes);
    output.extend_from_slice(&raw_data);

    fs::write(path, output)?;
    Ok(())
}

/// Loads tensors from `SafeTensors` format.
///
/// Returns `(metadata, user_metadata, raw_data)`: tensor metadata, the
/// `__metadata__` string map (empty if absent), and the raw data section.
///
/// # Errors
///
/// Returns an error if reading fails, the header is invalid, or the JSON
/// metadata cannot be parsed.
pub fn load_safetensors<P: AsRef<Path>>(
    path: P,
) -> Result<(SafeTensorsMetadata, UserMetadata, Vec<u8>)> {
    let bytes = fs::read(path)?;
    let metadata_len = validate_and_read_header(&bytes)?;
    let (metadata, user_metadata) = parse_metadata(&bytes, metadata_len)?;
    let raw_data = bytes[8 + metadata_len..].to_vec();
    Ok((metadata, user_metadata, raw_data))
}

fn validate_and_read_header(bytes: &[u8]) -> Result<usize> {
    if bytes.len() < 8 {
        return Err(ConsumoError::format_error(format!(
            "file is {} bytes, need at least 8 bytes for header",
            bytes.len()
        )));
    }

    let header_bytes: [u8; 8] = bytes[0..8]
        .try_into()
        .map_err(|_| ConsumoError::format_error("failed to read header bytes"))?;
    let metadata_len = u64::from_le_bytes(header_bytes) as usize;

    if metadata_len == 0 {
        return Err(ConsumoError::format_error("metadata length is 0"));
    }

    if 8 + metadata_len > bytes.len() {
        return Err(ConsumoError::format_error(format!(
            "metadata length {metadata_len} exceeds file size"
        )));
    }

    Ok(metadata_len)
}

fn parse_metadata(bytes: &[u8], metadata_len: usize) -> Result<(SafeTensorsMetadata, UserMetadata)> {
    let metadata_json = &bytes[8..8 + metadata_len];
    let metadata_str = std::str::from_utf8(metadata_json)
        .map_err(|e| ConsumoError::format_error(format!("metadata is not valid UTF-8: {e}")))?;

    let raw_metadata: serde_json::Value = serde_json::from_str(metadata_str)
        .map_err(|e| ConsumoError::Serialization(format!("JSON parsing failed: {e}")))?;

    let serde_json::Value::Object(map) = raw_metadata else {
        return Ok((SafeTensorsMetadata::new(), UserMetadata::new()));
    };

    let mut metadata = SafeTensorsMetadata::new();
    let mut user_metadata = UserMetadata::new();

    for (key, value) in map {
        if key == "__metadata__" {
            if let serde_json::Value::Object(meta_map) = value {
                for (mk, mv) in meta_map {
                    if let serde_json::Value::String(s) = mv {
                        user_metadata.insert(mk, s);
                    }
                }
            }
            continue;
        }
        if key.starts_with("__") {
            continue;
        }
        if let Ok(tensor_meta) = serde_json::from_value::<TensorMetadata>(value) {
            metadata.insert(key, tensor_meta);
        }
    }

    Ok((metadata, user_metadata))
}

/// Extracts a named tensor from the raw data section as f32 values.
///
/// # Errors
///
/// Returns an error if the tensor is missing, its offsets fall outside the
/// data section, or its dtype is not F32.
pub fn extract_tensor(
    metadata: &SafeTensorsMetadata,
    raw_data: &[u8],
    name: &str,
) -> Result<Vec<f32>> {
    let tensor_meta = metadata
        .get(name)
        .ok_or_else(|| ConsumoError::format_error(format!("missing '{name}' tensor")))?;

    if tensor_meta.dtype != "F32" {
        return Err(ConsumoError::format_error(format!(
            "unsupported dtype for '{}': {} (only F32 is supported)",
            name, tensor_meta.dtype
        )));
    }

    let [start, end] = tensor_meta.data_offsets;
    if end > raw_data.len() {
        return Err(ConsumoError::format_error(format!(
            "tensor '{}' data out of bounds: end={} exceeds data size={}",
            name,
            end,
            raw_data.len()
        )));
    }
    if start >= end {
        return Err(ConsumoError::format_error(format!(
            "tensor '{name}' has invalid offsets: start={start} >= end={end}"
        )));
    }

    let tensor_bytes = &raw_data[start..end];
    if tensor_bytes.len() % 4 != 0 {
        return Err(ConsumoError::format_error(format!(
            "tensor '{}' size {} is not a multiple of 4 bytes",
            name,
            tensor_bytes.len()
        )));
    }

    let values: Vec<f32> = tensor_bytes
        .chunks_exact(4)
        .map(|chunk| {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(chunk);
            f32::from_le_bytes(bytes)
        })
        .collect();

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_tensors() -> BTreeMap<String, (Vec<f32>, Vec<usize>)> {
        let mut tensors = BTreeMap::new();
        tensors.insert(
            "coefficients".to_string(),
            (vec![0.5, -1.5, 2.0], vec![3usize]),
        );
        tensors.insert("intercept".to_string(), (vec![18.2], vec![1usize]));
        tensors
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.safetensors");

        save_safetensors(&path, &sample_tensors()).unwrap();
        let (metadata, user_metadata, raw_data) = load_safetensors(&path).unwrap();

        assert!(user_metadata.is_empty());
        let coef = extract_tensor(&metadata, &raw_data, "coefficients").unwrap();
        assert_eq!(coef, vec![0.5, -1.5, 2.0]);
        let intercept = extract_tensor(&metadata, &raw_data, "intercept").unwrap();
        assert_eq!(intercept, vec![18.2]);
        assert_eq!(metadata.get("coefficients").unwrap().shape, vec![3]);
    }

    #[test]
    fn test_user_metadata_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.safetensors");

        let mut user = UserMetadata::new();
        user.insert("r_squared".to_string(), "0.61".to_string());
        user.insert("adjusted_r_squared".to_string(), "0.58".to_string());

        save_safetensors_with_metadata(&path, &sample_tensors(), &user).unwrap();
        let (_, loaded_user, _) = load_safetensors(&path).unwrap();

        assert_eq!(loaded_user.get("r_squared").map(String::as_str), Some("0.61"));
        assert_eq!(
            loaded_user.get("adjusted_r_squared").map(String::as_str),
            Some("0.58")
        );
    }

    #[test]
    fn test_load_too_short() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tiny.safetensors");
        std::fs::write(&path, [0u8; 4]).unwrap();

        let err = load_safetensors(&path).unwrap_err();
        assert!(err.to_string().contains("at least 8 bytes"));
    }

    #[test]
    fn test_load_metadata_exceeds_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.safetensors");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1000u64.to_le_bytes());
        bytes.extend_from_slice(b"{}");
        std::fs::write(&path, bytes).unwrap();

        let err = load_safetensors(&path).unwrap_err();
        assert!(err.to_string().contains("exceeds file size"));
    }

    #[test]
    fn test_extract_missing_tensor() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.safetensors");
        save_safetensors(&path, &sample_tensors()).unwrap();

        let (metadata, _, raw_data) = load_safetensors(&path).unwrap();
        let err = extract_tensor(&metadata, &raw_data, "mean").unwrap_err();
        assert!(err.to_string().contains("missing 'mean' tensor"));
    }

    #[test]
    fn test_extract_truncated_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.safetensors");
        save_safetensors(&path, &sample_tensors()).unwrap();

        // Drop the final 4 bytes of tensor data
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.truncate(bytes.len() - 4);
        std::fs::write(&path, bytes).unwrap();

        let (metadata, _, raw_data) = load_safetensors(&path).unwrap();
        let err = extract_tensor(&metadata, &raw_data, "intercept").unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_extract_rejects_non_f32() {
        let mut metadata = SafeTensorsMetadata::new();
        metadata.insert(
            "weights".to_string(),
            TensorMetadata {
                dtype: "F16".to_string(),
                shape: vec![2],
                data_offsets: [0, 4],
            },
        );
        let err = extract_tensor(&metadata, &[0u8; 4], "weights").unwrap_err();
        assert!(err.to_string().contains("unsupported dtype"));
    }
}
