//! Per-template object counts.

use std::collections::BTreeMap;
use std::fmt;

use landscape_core::PlacedObject;

/// Histogram of object names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectStats {
    pub total: usize,
    pub by_name: BTreeMap<String, usize>,
}

impl ObjectStats {
    pub fn from_objects(objects: &[PlacedObject]) -> Self {
        let mut by_name = BTreeMap::new();
        for obj in objects {
            *by_name.entry(obj.name.clone()).or_insert(0) += 1;
        }
        Self {
            total: objects.len(),
            by_name,
        }
    }
}

impl fmt::Display for ObjectStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of objects: {}", self.total)?;
        for (name, count) in &self.by_name {
            writeln!(f, "{name} {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(name: &str) -> PlacedObject {
        PlacedObject {
            name: name.to_string(),
            orientation: 0.0,
            scale: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    #[test]
    fn test_histogram() {
        let stats = ObjectStats::from_objects(&[obj("pine"), obj("oak"), obj("pine")]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_name["pine"], 2);
        assert_eq!(stats.by_name["oak"], 1);
        assert_eq!(stats.to_string(), "Number of objects: 3\noak 1\npine 2\n");
    }

    #[test]
    fn test_empty() {
        let stats = ObjectStats::from_objects(&[]);
        assert_eq!(stats.to_string(), "Number of objects: 0\n");
    }
}
