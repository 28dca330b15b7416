//! Case-insensitive name filter.

use tracing::debug;

/// Include/exclude substring rules over object names.
///
/// Exclude rules are checked first and always win. With no include rules
/// every name not excluded passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl NameFilter {
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            include: include.into_iter().map(|s| s.as_ref().to_lowercase()).collect(),
            exclude: exclude.into_iter().map(|s| s.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        if let Some(part) = self.exclude.iter().find(|p| lower.contains(p.as_str())) {
            debug!("Excluding {name} (matches '{part}')");
            return false;
        }
        if self.include.is_empty() {
            return true;
        }
        match self.include.iter().find(|p| lower.contains(p.as_str())) {
            Some(part) => {
                debug!("Including {name} (matches '{part}')");
                true
            }
            None => false,
        }
    }
}
