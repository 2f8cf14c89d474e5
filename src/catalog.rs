use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Inclusive index range of the assets available for one accessory type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    pub start: u32,
    pub end: u32,
}

impl IndexRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, index: u32) -> bool {
        index >= self.start && index <= self.end
    }
}

/// Accessory catalog. Assets follow the deterministic
/// `{type_id}/{type_id}{index}.png` naming scheme under `asset_root`;
/// each type maps to an inclusive index range, with `default_range` for
/// types not in the table.
///
/// This is injected configuration (part of [`crate::config::AppConfig`]),
/// not a hardcoded constant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub asset_root: PathBuf,
    pub ranges: BTreeMap<String, IndexRange>,
    pub default_range: IndexRange,
}

impl Default for Catalog {
    fn default() -> Self {
        let mut ranges = BTreeMap::new();
        ranges.insert("gold_earrings".to_string(), IndexRange::new(1, 16));
        ranges.insert("gold_necklaces".to_string(), IndexRange::new(1, 19));
        ranges.insert("diamond_earrings".to_string(), IndexRange::new(1, 9));
        ranges.insert("diamond_necklaces".to_string(), IndexRange::new(1, 6));
        Self {
            asset_root: PathBuf::from("assets"),
            ranges,
            default_range: IndexRange::new(1, 15),
        }
    }
}

impl Catalog {
    /// Index range for a type, falling back to the default range for
    /// types the table does not name.
    pub fn range(&self, type_id: &str) -> IndexRange {
        self.ranges
            .get(type_id)
            .copied()
            .unwrap_or(self.default_range)
    }

    /// Path of one asset, validated against the type's index range.
    pub fn asset_path(&self, type_id: &str, index: u32) -> Result<PathBuf> {
        let range = self.range(type_id);
        if !range.contains(index) {
            return Err(Error::IndexOutOfRange {
                type_id: type_id.to_string(),
                index,
                start: range.start,
                end: range.end,
            });
        }
        Ok(self
            .asset_root
            .join(type_id)
            .join(format!("{}{}.png", type_id, index)))
    }

    /// Known type ids, in stable (sorted) order.
    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(String::as_str)
    }

    /// Type ids matching a category filter ("earrings", "necklaces"),
    /// by substring.
    pub fn type_ids_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.type_ids().filter(move |id| id.contains(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_path_follows_naming_scheme() {
        let catalog = Catalog::default();
        let path = catalog.asset_path("gold_earrings", 7).unwrap();
        assert_eq!(path, PathBuf::from("assets/gold_earrings/gold_earrings7.png"));
    }

    #[test]
    fn shipped_ranges_match_product_table() {
        let catalog = Catalog::default();
        assert_eq!(catalog.range("gold_earrings"), IndexRange::new(1, 16));
        assert_eq!(catalog.range("gold_necklaces"), IndexRange::new(1, 19));
        assert_eq!(catalog.range("diamond_earrings"), IndexRange::new(1, 9));
        assert_eq!(catalog.range("diamond_necklaces"), IndexRange::new(1, 6));
    }

    #[test]
    fn unknown_type_uses_default_range() {
        let catalog = Catalog::default();
        assert_eq!(catalog.range("silver_rings"), IndexRange::new(1, 15));
        let path = catalog.asset_path("silver_rings", 15).unwrap();
        assert_eq!(path, PathBuf::from("assets/silver_rings/silver_rings15.png"));
    }

    #[test]
    fn category_filter_matches_by_substring() {
        let catalog = Catalog::default();
        let earrings: Vec<&str> = catalog.type_ids_in_category("earrings").collect();
        assert_eq!(earrings, vec!["diamond_earrings", "gold_earrings"]);
        let necklaces: Vec<&str> = catalog.type_ids_in_category("necklaces").collect();
        assert_eq!(necklaces, vec!["diamond_necklaces", "gold_necklaces"]);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let catalog = Catalog::default();
        assert!(catalog.asset_path("diamond_necklaces", 7).is_err());
        assert!(catalog.asset_path("diamond_necklaces", 0).is_err());
    }
}
