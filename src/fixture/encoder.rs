//! Fixture file encoders
//!
//! A fixture file is JSON or YAML, chosen by extension. Both decode into
//! the same `serde_json::Value` model so the rest of the crate never cares
//! which one it was.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::common::{Error, Result};

/// Supported fixture file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    /// Select the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match ext.as_str() {
            "json" => Ok(Format::Json),
            "yml" | "yaml" => Ok(Format::Yaml),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Canonical extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yml",
        }
    }

    /// Decode a whole file
    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T> {
        match self {
            Format::Json => Ok(serde_json::from_slice(bytes)?),
            Format::Yaml => Ok(serde_yaml::from_slice(bytes)?),
        }
    }

    /// Encode a whole file
    ///
    /// JSON is indented with four spaces and ends with a newline.
    pub fn encode<T: Serialize + ?Sized>(self, value: &T) -> Result<Vec<u8>> {
        match self {
            Format::Json => {
                let mut out = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
                value.serialize(&mut ser)?;
                out.push(b'\n');
                Ok(out)
            }
            Format::Yaml => Ok(serde_yaml::to_string(value)?.into_bytes()),
        }
    }

    /// Convert `src` into the shape of `D` by encoding then decoding it
    pub fn roundtrip<S, D>(self, src: &S) -> Result<D>
    where
        S: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        let bytes = self.encode(src)?;
        self.decode(&bytes)
    }

    /// Load `src` into an existing destination
    ///
    /// Fields of `src` unknown to `dest` are ignored and fields missing from
    /// `src` keep the value `dest` already holds.
    pub fn roundtrip_into<S, D>(self, src: &S, dest: &mut D) -> Result<()>
    where
        S: Serialize + ?Sized,
        D: Serialize + DeserializeOwned,
    {
        let incoming: Value = self.roundtrip(src)?;
        let mut current: Value = self.roundtrip(&*dest)?;
        overlay(&mut current, incoming);
        *dest = self.roundtrip(&current)?;
        Ok(())
    }
}

/// Merge `src` over `target`, recursing into maps present on both sides
fn overlay(target: &mut Value, src: Value) {
    match (target, src) {
        (_, Value::Null) => {}
        (Value::Object(target), Value::Object(src)) => {
            for (key, value) in src {
                match target.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, src) => *target = src,
    }
}

static NULL: Value = Value::Null;

/// Resolve a dotted key path such as `input.a.b` inside nested maps
///
/// A missing last key resolves to `null`. Stepping through anything that
/// is not a map fails with [`Error::InvalidKeySequence`].
pub fn resolve<'v>(value: &'v Value, path: &str) -> Result<&'v Value> {
    let mut current = value;
    for key in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(key).unwrap_or(&NULL),
            _ => return Err(Error::InvalidKeySequence(path.to_string())),
        };
    }
    Ok(current)
}
