//! Category name to slug mapping

/// Display name of the synthetic "no category filter" entry
pub const ALL_CATEGORIES: &str = "All";

/// Ordered mapping from category display name to API slug
///
/// Always starts with [`ALL_CATEGORIES`], which maps to the empty slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMap {
    entries: Vec<(String, String)>,
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self {
            entries: vec![(ALL_CATEGORIES.to_string(), String::new())],
        }
    }
}

impl CategoryMap {
    /// Build a map from `(name, slug)` pairs in display order
    ///
    /// Later duplicates of a name are ignored.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut map = Self::default();
        for (name, slug) in pairs {
            if map.slug(&name).is_none() {
                map.entries.push((name, slug));
            }
        }
        map
    }

    /// Slug for a display name, `None` if the name is unknown
    #[must_use]
    pub fn slug(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, slug)| slug.as_str())
    }

    /// Display names in order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the "All" entry is permanent
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
