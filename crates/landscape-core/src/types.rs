//! Fundamental placement and geometry types.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One scenery object instance as stored in the object file.
///
/// `position` is in local engine coordinates: x decreases toward
/// increasing easting, y increases with northing, both relative to the
/// landscape origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub position: Vec3,
    /// Uniform scale multiplier. Not range-checked.
    pub scale: f32,
    /// Heading in radians, nominally in [0, 2π).
    pub orientation: f32,
    /// Object template filename, 1..=131 ASCII bytes.
    pub name: String,
}

impl PlacementRecord {
    pub fn new(position: Vec3, scale: f32, orientation: f32, name: impl Into<String>) -> Self {
        Self {
            position,
            scale,
            orientation,
            name: name.into(),
        }
    }
}

/// A placement expressed in absolute projected coordinates.
///
/// This is the element type of the interchange document. Fields are
/// declared in lexicographic order so serialized keys come out sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub name: String,
    pub orientation: f64,
    pub scale: f64,
    /// Easting (meters).
    pub x: f64,
    /// Northing (meters).
    pub y: f64,
    pub z: f64,
}

/// Projected coordinate of the landscape's local (0, 0).
///
/// Read from the terrain header; this is the bottom-right (south-east)
/// corner of the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandscapeOrigin {
    pub easting: f64,
    pub northing: f64,
}

impl LandscapeOrigin {
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }
}

/// Axis-aligned extent of a landscape in projected coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub east_min: f64,
    pub east_max: f64,
    pub north_min: f64,
    pub north_max: f64,
}

impl Region {
    /// Region spanning `width_m` west and `height_m` north of `origin`.
    pub fn from_origin(origin: LandscapeOrigin, width_m: f64, height_m: f64) -> Self {
        Self {
            east_min: origin.easting - width_m,
            east_max: origin.easting,
            north_min: origin.northing,
            north_max: origin.northing + height_m,
        }
    }

    /// Open-interval containment: points on any edge are outside.
    pub fn contains(&self, easting: f64, northing: f64) -> bool {
        self.east_min < easting
            && easting < self.east_max
            && self.north_min < northing
            && northing < self.north_max
    }

    pub fn width(&self) -> f64 {
        self.east_max - self.east_min
    }

    pub fn height(&self) -> f64 {
        self.north_max - self.north_min
    }
}

/// A surveyed point feature (e.g. a pylon) in WGS84 degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFeature {
    pub id: i64,
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl GeoFeature {
    pub fn new(id: i64, lon: f64, lat: f64) -> Self {
        Self {
            id,
            lon,
            lat,
            tags: BTreeMap::new(),
        }
    }
}
