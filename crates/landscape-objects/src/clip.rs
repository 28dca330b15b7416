//! Region clipping.

use landscape_core::{PlacedObject, Region};

/// Objects strictly inside `region`, in input order.
///
/// Boundary points are excluded: an object exactly on a tile-grid edge
/// belongs to no landscape.
pub fn clip(objects: &[PlacedObject], region: &Region) -> Vec<PlacedObject> {
    objects
        .iter()
        .filter(|o| region.contains(o.x, o.y))
        .cloned()
        .collect()
}
