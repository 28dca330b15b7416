//! OpenStreetMap point features to placed objects.
//!
//! Input is an Overpass API JSON response (`elements[]`). Wind generators
//! are placed with heading 0; power towers are oriented along their line
//! by `ChainOrientation`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use glam::DVec2;
use landscape_core::{
    GeoFeature, LandscapeConfig, ObjectError, PlacedObject, Result, TemplateConfig,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::orientation::ChainOrientation;
use crate::projection::Projector;

/// Kinds of surveyed infrastructure that map to object templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    WindGenerator,
    PowerTower,
}

impl FeatureKind {
    /// Overpass tag filter selecting this kind.
    pub fn overpass_term(self) -> &'static str {
        match self {
            FeatureKind::WindGenerator => r#""generator:source"="wind""#,
            FeatureKind::PowerTower => r#""power"="tower""#,
        }
    }

    /// Whether features form lines and need an inferred heading.
    pub fn is_chain(self) -> bool {
        matches!(self, FeatureKind::PowerTower)
    }

    pub fn template(self, templates: &TemplateConfig) -> &str {
        match self {
            FeatureKind::WindGenerator => &templates.wind_generator,
            FeatureKind::PowerTower => &templates.power_tower,
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FeatureKind::WindGenerator => "wind",
            FeatureKind::PowerTower => "power",
        })
    }
}

impl FromStr for FeatureKind {
    type Err = ObjectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "wind" | "wind-generator" => Ok(FeatureKind::WindGenerator),
            "power" | "power-tower" => Ok(FeatureKind::PowerTower),
            other => Err(ObjectError::Config(format!("unknown feature kind '{other}'"))),
        }
    }
}

/// Geographic query box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl FromStr for BoundingBox {
    type Err = ObjectError;

    /// Parses `south,west,north,east`, optionally in parentheses.
    fn from_str(s: &str) -> Result<Self> {
        let invalid =
            || ObjectError::Config(format!("invalid bounding box '{s}', expected S,W,N,E"));
        let values = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split(',')
            .map(|part| part.trim().parse::<f64>().map_err(|_| invalid()))
            .collect::<Result<Vec<f64>>>()?;
        match values[..] {
            [south, west, north, east] if south < north && west < east => Ok(Self {
                south,
                west,
                north,
                east,
            }),
            _ => Err(invalid()),
        }
    }
}

/// Overpass QL query for all nodes of `kind` inside `bbox`.
pub fn overpass_query(kind: FeatureKind, bbox: &BoundingBox) -> String {
    format!(
        "[out:json][timeout:120];\n(\nnode[{}]({},{},{},{});\n);\nout body;\n>;\nout skel qt;\n",
        kind.overpass_term(),
        bbox.south,
        bbox.west,
        bbox.north,
        bbox.east
    )
}

#[derive(Debug, Deserialize)]
struct OverpassDocument {
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    id: i64,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

fn features_from(doc: OverpassDocument) -> Vec<GeoFeature> {
    doc.elements
        .into_iter()
        .filter(|e| e.kind == "node")
        .filter_map(|e| match (e.lon, e.lat) {
            (Some(lon), Some(lat)) => Some(GeoFeature {
                id: e.id,
                lon,
                lat,
                tags: e.tags,
            }),
            _ => None,
        })
        .collect()
}

/// Point features of an Overpass JSON response. Elements without
/// coordinates (ways, relations) are skipped.
pub fn parse_overpass(text: &str) -> Result<Vec<GeoFeature>> {
    let doc: OverpassDocument = serde_json::from_str(text)?;
    Ok(features_from(doc))
}

pub fn load_overpass(path: &Path) -> Result<Vec<GeoFeature>> {
    let text = std::fs::read_to_string(path).map_err(|source| ObjectError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: OverpassDocument =
        serde_json::from_str(&text).map_err(|source| ObjectError::Document {
            path: path.to_path_buf(),
            source,
        })?;
    let features = features_from(doc);
    info!("Found {} nodes in {}", features.len(), path.display());
    Ok(features)
}

/// Project features and turn them into placed objects of `kind`.
///
/// Chain features that cannot be oriented are skipped with a warning;
/// a projection failure aborts the conversion.
pub fn convert_features(
    features: &[GeoFeature],
    kind: FeatureKind,
    projector: &dyn Projector,
    config: &LandscapeConfig,
) -> Result<Vec<PlacedObject>> {
    let points = features
        .iter()
        .map(|f| projector.project(f.lon, f.lat))
        .collect::<Result<Vec<DVec2>>>()?;

    let orientations: Vec<Result<f64>> = if kind.is_chain() {
        ChainOrientation::new(points.clone(), &config.orientation).infer_all()
    } else {
        points.iter().map(|_| Ok(0.0)).collect()
    };

    let template = kind.template(&config.templates);
    let mut objects = Vec::with_capacity(features.len());
    for ((feature, point), orientation) in features.iter().zip(&points).zip(orientations) {
        match orientation {
            Ok(orientation) => objects.push(PlacedObject {
                name: template.to_string(),
                orientation,
                scale: 1.0,
                x: point.x,
                y: point.y,
                z: 0.0,
            }),
            Err(e) => warn!("Skipping {kind} node {}: {e}", feature.id),
        }
    }

    if objects.len() < features.len() {
        warn!(
            "Placed {} of {} {kind} features",
            objects.len(),
            features.len()
        );
    } else {
        info!("Placed {} {kind} features as {template}", objects.len());
    }
    Ok(objects)
}
