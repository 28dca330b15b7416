//! Conversion between local engine coordinates and projected coordinates.
//!
//! The object file stores x as a decreasing offset from the origin
//! easting and y as an increasing offset from the origin northing:
//!
//! ```text
//! easting  = origin.easting  - local.x
//! northing = origin.northing + local.y
//! ```
//!
//! z, scale, orientation and name pass through unchanged. Both directions
//! are total; overflow follows IEEE-754.

use glam::Vec3;
use landscape_core::{LandscapeOrigin, PlacedObject, PlacementRecord};

/// Express a local record in absolute projected coordinates.
pub fn to_absolute(record: &PlacementRecord, origin: LandscapeOrigin) -> PlacedObject {
    PlacedObject {
        name: record.name.clone(),
        orientation: record.orientation as f64,
        scale: record.scale as f64,
        x: origin.easting - record.position.x as f64,
        y: origin.northing + record.position.y as f64,
        z: record.position.z as f64,
    }
}

/// Express an absolute object relative to `origin`.
pub fn to_local(object: &PlacedObject, origin: LandscapeOrigin) -> PlacementRecord {
    PlacementRecord {
        position: Vec3::new(
            (origin.easting - object.x) as f32,
            (object.y - origin.northing) as f32,
            object.z as f32,
        ),
        scale: object.scale as f32,
        orientation: object.orientation as f32,
        name: object.name.clone(),
    }
}

/// Move a local record from one landscape origin to another.
pub fn reanchor(record: &mut PlacementRecord, from: LandscapeOrigin, to: LandscapeOrigin) {
    let absolute = to_absolute(record, from);
    record.position = to_local(&absolute, to).position;
}

pub fn all_to_local(objects: &[PlacedObject], origin: LandscapeOrigin) -> Vec<PlacementRecord> {
    objects.iter().map(|o| to_local(o, origin)).collect()
}
