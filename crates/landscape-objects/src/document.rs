//! Interchange document: a JSON array of objects in absolute coordinates.
//!
//! ```json
//! [
//!   {
//!     "name": "Powertower.c3d",
//!     "orientation": 1.57,
//!     "scale": 1.0,
//!     "x": 412345.5,
//!     "y": 5712345.25,
//!     "z": 0.0
//!   }
//! ]
//! ```
//!
//! Keys are emitted sorted so exported files diff cleanly.

use std::path::Path;

use landscape_core::{ObjectError, PlacedObject, Result};
use tracing::info;

use crate::atomic::write_atomic;

pub fn parse_document(text: &str) -> Result<Vec<PlacedObject>> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_document(path: &Path) -> Result<Vec<PlacedObject>> {
    let text = std::fs::read_to_string(path).map_err(|source| ObjectError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    let objects: Vec<PlacedObject> =
        serde_json::from_str(&text).map_err(|source| ObjectError::Document {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Read {} objects from {}", objects.len(), path.display());
    Ok(objects)
}

/// Load and concatenate several documents in order. Duplicates across
/// documents are kept.
pub fn load_documents<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PlacedObject>> {
    let mut all = Vec::new();
    for path in paths {
        all.extend(load_document(path.as_ref())?);
    }
    Ok(all)
}

/// Render objects as a pretty-printed document (2-space indent).
///
/// Fails with `NonFiniteValue` if any number is NaN or infinite; JSON
/// would carry it as `null`, which cannot be read back.
pub fn document_string(objects: &[PlacedObject]) -> Result<String> {
    for (index, o) in objects.iter().enumerate() {
        let fields = [
            ("orientation", o.orientation),
            ("scale", o.scale),
            ("x", o.x),
            ("y", o.y),
            ("z", o.z),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ObjectError::NonFiniteValue { index, field });
        }
    }
    Ok(serde_json::to_string_pretty(objects)?)
}

pub fn write_document(path: &Path, objects: &[PlacedObject]) -> Result<()> {
    let text = document_string(objects)?;
    write_atomic(path, text.as_bytes())?;
    info!("Wrote {} objects to {}", objects.len(), path.display());
    Ok(())
}
