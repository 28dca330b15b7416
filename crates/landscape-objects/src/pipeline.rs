//! Export, import and view over a landscape's object file.

use std::fmt;
use std::path::{Path, PathBuf};

use landscape_core::{LandscapeConfig, LandscapeOrigin, ObjectError, PlacedObject, Region, Result};
use tracing::info;

use crate::clip::clip;
use crate::document::{load_document, write_document};
use crate::filter::NameFilter;
use crate::frame::{all_to_local, to_absolute};
use crate::obj::{load_objects, write_objects};
use crate::stats::ObjectStats;
use crate::trn::{load_trn_header, TerrainHeader};

/// Switches selecting the interchange behavior.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterchangeOptions {
    /// Keep only names containing one of these (case-insensitive).
    pub include: Vec<String>,
    /// Drop names containing one of these; checked before `include`.
    pub exclude: Vec<String>,
    /// Skip clipping to the landscape region.
    pub no_clip: bool,
    /// Allow importing more than one document.
    pub multi_source: bool,
}

impl InterchangeOptions {
    pub fn name_filter(&self) -> NameFilter {
        NameFilter::new(&self.include, &self.exclude)
    }
}

/// A landscape's terrain header and object file location.
#[derive(Debug, Clone)]
pub struct Landscape {
    pub name: String,
    pub obj_path: PathBuf,
    header: TerrainHeader,
    region: Region,
}

impl Landscape {
    /// Open a landscape under the configured install directory.
    pub fn open(config: &LandscapeConfig, name: &str) -> Result<Self> {
        info!("Landscape directory {}", config.landscape_dir(name).display());
        Self::from_paths(name, &config.trn_path(name), &config.obj_path(name), config)
    }

    pub fn from_paths(
        name: &str,
        trn_path: &Path,
        obj_path: &Path,
        config: &LandscapeConfig,
    ) -> Result<Self> {
        let header = load_trn_header(trn_path)?;
        let region = header.region(config);
        Ok(Self {
            name: name.to_string(),
            obj_path: obj_path.to_path_buf(),
            header,
            region,
        })
    }

    pub fn header(&self) -> &TerrainHeader {
        &self.header
    }

    pub fn origin(&self) -> LandscapeOrigin {
        self.header.origin()
    }

    pub fn region(&self) -> Region {
        self.region
    }
}

/// Decode the object file, apply the name filter, convert to absolute.
fn read_filtered(landscape: &Landscape, filter: &NameFilter) -> Result<Vec<PlacedObject>> {
    let origin = landscape.origin();
    let records = load_objects(&landscape.obj_path)?;
    let objects: Vec<PlacedObject> = records
        .iter()
        .filter(|r| filter.matches(&r.name))
        .map(|r| to_absolute(r, origin))
        .collect();
    info!(
        "Read {} objects ({} before name filter)",
        objects.len(),
        records.len()
    );
    Ok(objects)
}

fn clip_logged(objects: Vec<PlacedObject>, region: &Region) -> Vec<PlacedObject> {
    let before = objects.len();
    let kept = clip(&objects, region);
    info!("Clipping dropped {} objects", before - kept.len());
    kept
}

/// Objects of the landscape in absolute coordinates.
pub fn export(landscape: &Landscape, options: &InterchangeOptions) -> Result<Vec<PlacedObject>> {
    let objects = read_filtered(landscape, &options.name_filter())?;
    if options.no_clip {
        Ok(objects)
    } else {
        Ok(clip_logged(objects, &landscape.region()))
    }
}

/// Export and write the result as an interchange document.
pub fn export_to(
    landscape: &Landscape,
    options: &InterchangeOptions,
    document: &Path,
) -> Result<Vec<PlacedObject>> {
    let objects = export(landscape, options)?;
    write_document(document, &objects)?;
    Ok(objects)
}

/// Replace the landscape's object file with the contents of `documents`.
///
/// Documents are concatenated in order without deduplication. Returns
/// the number of records written.
pub fn import<P: AsRef<Path>>(
    landscape: &Landscape,
    documents: &[P],
    options: &InterchangeOptions,
) -> Result<usize> {
    if documents.is_empty() {
        return Err(ObjectError::Config("import needs at least one document".to_string()));
    }
    if documents.len() > 1 && !options.multi_source {
        return Err(ObjectError::Config(format!(
            "{} documents given but multi-source import is disabled",
            documents.len()
        )));
    }

    let region = landscape.region();
    let mut all = Vec::new();
    for path in documents {
        let objects = load_document(path.as_ref())?;
        if options.no_clip {
            all.extend(objects);
        } else {
            all.extend(clip_logged(objects, &region));
        }
    }

    let records = all_to_local(&all, landscape.origin());
    info!(
        "Writing {} with {} objects",
        landscape.obj_path.display(),
        records.len()
    );
    write_objects(&landscape.obj_path, &records)?;
    Ok(records.len())
}

/// Object histograms of a landscape.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewReport {
    /// Everything passing the name filter.
    pub all: ObjectStats,
    /// The subset inside the landscape region.
    pub in_region: ObjectStats,
}

impl fmt::Display for ViewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== All ==")?;
        write!(f, "{}", self.all)?;
        writeln!(f, "== In Region ==")?;
        write!(f, "{}", self.in_region)
    }
}

/// Count objects by name, before and after clipping. `no_clip` is ignored.
pub fn view(landscape: &Landscape, options: &InterchangeOptions) -> Result<ViewReport> {
    let objects = read_filtered(landscape, &options.name_filter())?;
    let in_region = clip(&objects, &landscape.region());
    Ok(ViewReport {
        all: ObjectStats::from_objects(&objects),
        in_region: ObjectStats::from_objects(&in_region),
    })
}
