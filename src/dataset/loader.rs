//! CSV loading for the tourism dataset
//!
//! Reads the tabular source once at startup. Rows with an unparseable
//! `precio_estimado` keep the row but drop the price; missing textual cells
//! become empty strings.

use crate::dataset::record::DestinationRecord;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Column headers expected in the source file
const COLUMN_NAME: &str = "destino";
const COLUMN_DEPARTMENT: &str = "departamento";
const COLUMN_CATEGORY: &str = "tipo";
const COLUMN_PRICE: &str = "precio_estimado";
const COLUMN_DESCRIPTION: &str = "descripcion";
const COLUMN_ACTIVITIES: &str = "actividades";
const COLUMN_CLIMATE: &str = "clima";
const COLUMN_SEASON: &str = "temporada_ideal";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Cannot read dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("Dataset contains no usable rows")]
    Empty,
}

/// Positions of the known columns within the header row
struct ColumnMap {
    name: usize,
    department: usize,
    category: usize,
    price: Option<usize>,
    description: Option<usize>,
    activities: Option<usize>,
    climate: Option<usize>,
    season: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        Ok(Self {
            name: find(COLUMN_NAME).ok_or(DatasetError::MissingColumn(COLUMN_NAME))?,
            department: find(COLUMN_DEPARTMENT)
                .ok_or(DatasetError::MissingColumn(COLUMN_DEPARTMENT))?,
            category: find(COLUMN_CATEGORY).ok_or(DatasetError::MissingColumn(COLUMN_CATEGORY))?,
            price: find(COLUMN_PRICE),
            description: find(COLUMN_DESCRIPTION),
            activities: find(COLUMN_ACTIVITIES),
            climate: find(COLUMN_CLIMATE),
            season: find(COLUMN_SEASON),
        })
    }
}

/// Load destination records from a CSV file
///
/// Fails when the file is unreadable, a required column is missing, or the
/// file holds zero rows. Per-row price parse failures are logged and the
/// price treated as absent for that row only.
pub fn load_records(path: &Path) -> Result<Vec<DestinationRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let columns = ColumnMap::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |index: Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .unwrap_or_default()
                .to_string()
        };

        let raw_price = cell(columns.price);
        let estimated_price = if raw_price.is_empty() {
            None
        } else {
            match raw_price.parse::<f64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(
                        "Unparseable precio_estimado {:?} in row {}, treating as absent",
                        raw_price,
                        records.len() + 1
                    );
                    None
                }
            }
        };

        records.push(DestinationRecord {
            name: cell(Some(columns.name)),
            department: cell(Some(columns.department)),
            category: cell(Some(columns.category)),
            estimated_price,
            description: cell(columns.description),
            activities: cell(columns.activities),
            climate: cell(columns.climate),
            ideal_season: cell(columns.season),
        });
    }

    if records.is_empty() {
        return Err(DatasetError::Empty);
    }

    debug!("Loaded {} destinos from {}", records.len(), path.display());
    Ok(records)
}
