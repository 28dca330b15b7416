//! Core types and definitions for landscape object interchange.
//!
//! This crate defines the vocabulary shared across the workspace:
//! placement records, landscape origin and region, geographic features,
//! the error taxonomy and the tool configuration. It performs no file I/O
//! apart from loading the configuration file.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::{LandscapeConfig, OrientationConfig, TemplateConfig};
pub use error::{ObjectError, Result};
pub use types::{GeoFeature, LandscapeOrigin, PlacedObject, PlacementRecord, Region};
