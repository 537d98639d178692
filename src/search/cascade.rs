//! The search cascade
//!
//! Resolves a free-form query against the destination store through a fixed
//! sequence of matching stages of increasing looseness. The first stage that
//! yields any records wins; when nothing qualifies the sampler provides a
//! popular-destinations fallback, so a well-formed query never fails.

use crate::dataset::{format_destinations, DestinationRecord, DestinationStore, DestinationView};
use crate::error::{validate_max_results, AppError};
use crate::search::sampler::Sampler;
use crate::search::similarity::{extract, passes_threshold, ratio};
use tracing::debug;

/// Candidate category values considered per fuzzy index stage
pub const CATEGORY_CANDIDATES: usize = 3;

/// Records plus the human-readable description of how they were found
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub destinations: Vec<DestinationView>,
    pub label: String,
}

/// Cascading search over an immutable destination store
pub struct SearchCascade {
    store: DestinationStore,
}

impl SearchCascade {
    pub fn new(store: DestinationStore) -> Self {
        Self { store }
    }

    /// Number of destinations behind the cascade
    pub fn destination_count(&self) -> usize {
        self.store.len()
    }

    /// A bounded random selection, used for greetings and empty queries
    pub fn featured(&self, n: usize) -> Vec<DestinationView> {
        format_destinations(&Sampler::sample(self.store.records(), n))
    }

    /// Run the cascade for `query`, returning at most `max_results` records
    /// and a stage label. `max_results` of zero is a contract violation.
    pub fn search(&self, query: &str, max_results: usize) -> Result<SearchOutcome, AppError> {
        validate_max_results(max_results)?;

        if query.trim().is_empty() {
            return Ok(SearchOutcome {
                destinations: self.featured(max_results),
                label: "Destinos destacados de Colombia".to_string(),
            });
        }

        let query = query.to_lowercase();

        if let Some(hits) = self.exact_stage(&query) {
            debug!("Exact substring stage matched {} records", hits.len());
            return Ok(self.win(hits, max_results, format!("Resultados exactos para '{}'", query)));
        }

        if let Some(hits) = self.fuzzy_name_stage(&query) {
            debug!("Fuzzy name stage matched {} records", hits.len());
            return Ok(self.win(hits, max_results, format!("Destinos similares a '{}'", query)));
        }

        if let Some((hits, best)) =
            self.fuzzy_index_stage(&query, self.store.departments(), |r| &r.department)
        {
            debug!("Fuzzy department stage matched {} records", hits.len());
            return Ok(self.win(hits, max_results, format!("Destinos en {}", best)));
        }

        if let Some((hits, best)) =
            self.fuzzy_index_stage(&query, self.store.categories(), |r| &r.category)
        {
            debug!("Fuzzy category stage matched {} records", hits.len());
            return Ok(self.win(hits, max_results, format!("Destinos del tipo {}", best)));
        }

        debug!("No stage matched, falling back to sampler");
        Ok(SearchOutcome {
            destinations: self.featured(max_results),
            label: format!(
                "No encontré coincidencias para '{}', pero mira estos destinos populares:",
                query
            ),
        })
    }

    /// Stage 1: composite-key substring containment, no score gate
    fn exact_stage(&self, query: &str) -> Option<Vec<DestinationRecord>> {
        let hits = self.store.find_by_substring(query);
        (!hits.is_empty()).then_some(hits)
    }

    /// Stage 2: similarity against destination names; scores gate pass/fail
    /// only, record order is preserved
    fn fuzzy_name_stage(&self, query: &str) -> Option<Vec<DestinationRecord>> {
        let hits: Vec<DestinationRecord> = self
            .store
            .records()
            .iter()
            .filter(|record| passes_threshold(ratio(query, &record.name)))
            .cloned()
            .collect();
        (!hits.is_empty()).then_some(hits)
    }

    /// Stages 3 and 4: similarity against a categorical index, keeping the
    /// top [`CATEGORY_CANDIDATES`] values above threshold, then selecting
    /// records by field equality. Returns the hits and the best-scoring
    /// accepted value for the label.
    fn fuzzy_index_stage<'a>(
        &self,
        query: &str,
        index: &'a [String],
        field: impl Fn(&DestinationRecord) -> &str,
    ) -> Option<(Vec<DestinationRecord>, &'a str)> {
        let accepted: Vec<&str> = extract(query, index, CATEGORY_CANDIDATES)
            .into_iter()
            .filter(|(_, score)| passes_threshold(*score))
            .map(|(value, _)| value)
            .collect();

        let best = *accepted.first()?;

        let hits: Vec<DestinationRecord> = self
            .store
            .records()
            .iter()
            .filter(|record| accepted.contains(&field(record)))
            .cloned()
            .collect();

        (!hits.is_empty()).then_some((hits, best))
    }

    fn win(
        &self,
        mut hits: Vec<DestinationRecord>,
        max_results: usize,
        label: String,
    ) -> SearchOutcome {
        hits.truncate(max_results);
        SearchOutcome {
            destinations: format_destinations(&hits),
            label,
        }
    }
}
