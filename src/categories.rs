//! Category mappings

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::groups::DiscountGroup;

/// Maps a product category label to a discount group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMapping {
    /// Category label exactly as found on products.
    pub category_name: String,

    /// Group the category belongs to, if any.
    pub discount_type: Option<DiscountGroup>,
}

impl CategoryMapping {
    /// Create a mapping from a category label and a group key. An empty key leaves the category unmapped.
    pub fn new(category_name: impl Into<String>, discount_type: &str) -> Self {
        Self {
            category_name: category_name.into(),
            discount_type: DiscountGroup::from_key(discount_type),
        }
    }
}

/// Lookup table from category label to discount group.
#[derive(Debug, Clone, Default)]
pub struct CategoryMappings {
    groups: FxHashMap<String, Option<DiscountGroup>>,
}

impl CategoryMappings {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping. The first mapping for a category wins; returns false if it was already mapped.
    pub fn insert(&mut self, mapping: CategoryMapping) -> bool {
        match self.groups.entry(mapping.category_name) {
            Entry::Occupied(entry) => {
                debug!(category = %entry.key(), "ignoring duplicate category mapping");

                false
            }
            Entry::Vacant(entry) => {
                entry.insert(mapping.discount_type);

                true
            }
        }
    }

    /// Discount group for a category, if it is mapped to one.
    pub fn discount_group(&self, category: &str) -> Option<&DiscountGroup> {
        self.groups.get(category)?.as_ref()
    }

    /// Number of categories in the table.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if the table has no mappings.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<CategoryMapping> for CategoryMappings {
    fn from_iter<I: IntoIterator<Item = CategoryMapping>>(iter: I) -> Self {
        let mut mappings = Self::new();

        for mapping in iter {
            mappings.insert(mapping);
        }

        mappings
    }
}

impl<'a> FromIterator<&'a CategoryMapping> for CategoryMappings {
    fn from_iter<I: IntoIterator<Item = &'a CategoryMapping>>(iter: I) -> Self {
        iter.into_iter().cloned().collect()
    }
}
