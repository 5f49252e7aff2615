//! Schema-name to literal type overrides.

use indexmap::IndexMap;

/// Names that always translate to `string`.
const DEFAULT_OVERRIDES: [(&str, &str); 2] = [("Guid", "string"), ("HashID", "string")];

/// Per-input table substituting a literal type expression for a named schema.
///
/// Built fresh for every input and passed by reference into translation, so
/// two inputs never see each other's mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeOverrides {
    entries: IndexMap<String, String>,
}

impl Default for TypeOverrides {
    fn default() -> Self {
        Self {
            entries: DEFAULT_OVERRIDES
                .iter()
                .map(|(name, ty)| ((*name).to_string(), (*ty).to_string()))
                .collect(),
        }
    }
}

impl TypeOverrides {
    /// Defaults extended (or replaced, per name) by `mappings`.
    pub fn with_mappings<'a, I>(mappings: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut overrides = Self::default();
        for (name, ty) in mappings {
            overrides.insert(name.clone(), ty.clone());
        }
        overrides
    }

    /// Map `name` to `ty`, replacing any earlier entry.
    pub fn insert(&mut self, name: impl Into<String>, ty: impl Into<String>) {
        self.entries.insert(name.into(), ty.into());
    }

    /// Type expression mapped to `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Number of entries, defaults included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
