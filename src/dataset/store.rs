//! Destination store — immutable-after-load collection of destinations with
//! precomputed search keys and the department/category index.
//!
//! The store is the single source of truth; the cascade reads from it, never
//! from the CSV directly. It is built once at startup and shared read-only.

use crate::dataset::loader::{load_records, DatasetError};
use crate::dataset::record::DestinationRecord;
use std::path::Path;
use tracing::info;

/// In-memory destination collection plus derived indexes
pub struct DestinationStore {
    records: Vec<DestinationRecord>,
    /// Lowercase composite key per record, parallel to `records`
    search_keys: Vec<String>,
    /// Distinct department values, case-preserving, in first-seen order
    departments: Vec<String>,
    /// Distinct category values, case-preserving, in first-seen order
    categories: Vec<String>,
}

impl DestinationStore {
    /// Load the store from a CSV source
    ///
    /// Fails when the source is unreadable, a required column is missing, or
    /// no rows survive loading. A cascade over zero records has no valid
    /// fallback, so an empty dataset is fatal at startup.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let records = load_records(path)?;
        let store = Self::from_records(records);
        info!(
            "Destination store ready: {} destinos, {} departamentos, {} tipos",
            store.len(),
            store.departments.len(),
            store.categories.len()
        );
        Ok(store)
    }

    /// Build the store and its indexes from already-parsed records
    pub fn from_records(records: Vec<DestinationRecord>) -> Self {
        let search_keys = records.iter().map(DestinationRecord::search_key).collect();

        let mut departments: Vec<String> = Vec::new();
        let mut categories: Vec<String> = Vec::new();
        for record in &records {
            if !departments.contains(&record.department) {
                departments.push(record.department.clone());
            }
            if !categories.contains(&record.category) {
                categories.push(record.category.clone());
            }
        }

        Self {
            records,
            search_keys,
            departments,
            categories,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DestinationRecord] {
        &self.records
    }

    /// Composite search key for the record at `index`
    pub fn search_key(&self, index: usize) -> &str {
        &self.search_keys[index]
    }

    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Records whose composite key contains `needle` (already lowercased),
    /// in record order
    pub fn find_by_substring(&self, needle: &str) -> Vec<DestinationRecord> {
        self.records
            .iter()
            .zip(self.search_keys.iter())
            .filter(|(_, key)| key.contains(needle))
            .map(|(record, _)| record.clone())
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Three-destination fixture shared by the search tests
    pub(crate) fn fixture_store() -> DestinationStore {
        DestinationStore::from_records(vec![
            DestinationRecord {
                name: "Cartagena".to_string(),
                department: "Bolívar".to_string(),
                category: "playa".to_string(),
                estimated_price: Some(850000.0),
                description: "Ciudad amurallada frente al Caribe".to_string(),
                activities: "playa, historia, gastronomía".to_string(),
                climate: "cálido".to_string(),
                ideal_season: "diciembre a abril".to_string(),
            },
            DestinationRecord {
                name: "Medellín".to_string(),
                department: "Antioquia".to_string(),
                category: "ciudad".to_string(),
                estimated_price: Some(600000.0),
                description: "Ciudad de la eterna primavera".to_string(),
                activities: "cultura, vida nocturna, flores".to_string(),
                climate: "templado".to_string(),
                ideal_season: "agosto".to_string(),
            },
            DestinationRecord {
                name: "Salento".to_string(),
                department: "Quindío".to_string(),
                category: "ecoturismo".to_string(),
                estimated_price: None,
                description: "Pueblo cafetero junto al Valle de Cocora".to_string(),
                activities: "senderismo, café, paisajes".to_string(),
                climate: "templado".to_string(),
                ideal_season: "todo el año".to_string(),
            },
        ])
    }

    #[test]
    fn test_indexes_built_once() {
        let store = fixture_store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.departments(), &["Bolívar", "Antioquia", "Quindío"]);
        assert_eq!(store.categories(), &["playa", "ciudad", "ecoturismo"]);
    }

    #[test]
    fn test_search_keys_parallel_to_records() {
        let store = fixture_store();
        for (i, record) in store.records().iter().enumerate() {
            assert_eq!(store.search_key(i), record.search_key());
        }
    }

    #[test]
    fn test_category_index_deduplicates_case_preserving() {
        let mut records = fixture_store().records().to_vec();
        let mut duplicate = records[0].clone();
        duplicate.name = "Islas del Rosario".to_string();
        records.push(duplicate);

        let store = DestinationStore::from_records(records);
        assert_eq!(store.len(), 4);
        // "Bolívar" appears twice in the data but once in the index
        assert_eq!(store.departments(), &["Bolívar", "Antioquia", "Quindío"]);
    }

    #[test]
    fn test_find_by_substring() {
        let store = fixture_store();
        let hits = store.find_by_substring("cartagena");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Cartagena");

        // Matches in any composite-key field
        let hits = store.find_by_substring("café");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Salento");

        assert!(store.find_by_substring("xyz123").is_empty());
    }

    #[test]
    fn test_find_by_substring_preserves_record_order() {
        let store = fixture_store();
        // "ciudad" appears in Cartagena's description and Medellín's category
        let hits = store.find_by_substring("ciudad");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "Cartagena");
        assert_eq!(hits[1].name, "Medellín");
    }
}
