//! Destination record types
//!
//! `DestinationRecord` is the internal, fully-populated row shape; every
//! textual field is an empty string rather than absent. `DestinationView` is
//! the stable projection handed to callers (API payloads and CLI output).

use serde::{Deserialize, Serialize};

/// One tourism destination entry as held in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationRecord {
    /// Destination name (non-unique)
    pub name: String,
    /// Department (categorical)
    pub department: String,
    /// Destination category, e.g. "playa", "ciudad" (categorical)
    pub category: String,
    /// Estimated price; `None` when absent or unparseable, never zero-coalesced
    pub estimated_price: Option<f64>,
    pub description: String,
    pub activities: String,
    pub climate: String,
    pub ideal_season: String,
}

impl DestinationRecord {
    /// Lowercase composite search key: the substring-match input for the
    /// exact stages of the cascade. Never exposed to callers.
    pub fn search_key(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.name, self.department, self.category, self.activities, self.description
        )
        .to_lowercase()
    }
}

/// Output projection of a destination with the fixed caller-facing field names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationView {
    pub name: String,
    pub department: String,
    #[serde(rename = "type")]
    pub category: String,
    /// Serialized as `null` when the price is unknown
    pub price: Option<f64>,
    pub description: String,
    pub activities: String,
    pub climate: String,
    pub season: String,
}

impl From<&DestinationRecord> for DestinationView {
    fn from(record: &DestinationRecord) -> Self {
        Self {
            name: record.name.clone(),
            department: record.department.clone(),
            category: record.category.clone(),
            price: record.estimated_price,
            description: record.description.clone(),
            activities: record.activities.clone(),
            climate: record.climate.clone(),
            season: record.ideal_season.clone(),
        }
    }
}

/// Project a slice of records into views, preserving order
pub fn format_destinations(records: &[DestinationRecord]) -> Vec<DestinationView> {
    records.iter().map(DestinationView::from).collect()
}
