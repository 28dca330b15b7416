//! Landscape object interchange.
//!
//! Object file codec, terrain header origin, coordinate frame conversion,
//! region clipping, chain orientation inference and the export/import/view
//! pipeline built on them.

pub use landscape_core as core;

mod atomic;
pub mod clip;
pub mod document;
pub mod filter;
pub mod frame;
pub mod obj;
pub mod orientation;
pub mod osm;
pub mod pipeline;
pub mod projection;
pub mod stats;
pub mod trn;

// Re-export key types for convenience.
pub use filter::NameFilter;
pub use orientation::ChainOrientation;
pub use osm::{BoundingBox, FeatureKind};
pub use pipeline::{InterchangeOptions, Landscape, ViewReport};
pub use projection::{Projector, UtmProjection};
pub use stats::ObjectStats;
pub use trn::TerrainHeader;
