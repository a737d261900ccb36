use crate::errors::{AdviceError, AdviceErrorKind};
use crate::services::alias_index::AliasIndex;
use crate::services::logger::Logger;
use crate::services::matcher::{rank_against_pool, top_against_pool, MatcherConfig};
use crate::stores::data_store::DataStore;
use crate::utils::text::fold_title;
use std::collections::HashSet;
use std::sync::Arc;

/// Combines the vector pass with a fuzzy-substring pass over the alias
/// universe and maps surviving aliases back to canonical course names.
/// Order is deterministic: vector matches first, then fuzzy matches,
/// deduplicated on first sight.
pub fn suggest_with_index(index: &AliasIndex, query: &str, config: &MatcherConfig) -> Vec<String> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let universe = index.universe();

    let mut winners: Vec<String> = rank_against_pool(query, universe, config)
        .into_iter()
        .map(|candidate| candidate.name)
        .collect();
    winners.extend(
        top_against_pool(query, universe, config)
            .into_iter()
            .map(|candidate| candidate.name),
    );

    let mut seen: HashSet<String> = HashSet::new();
    let mut suggestions = Vec::new();
    for alias in winners {
        let Some(canonical) = index.canonical_for(&alias) else {
            continue;
        };
        if seen.insert(fold_title(canonical)) {
            suggestions.push(canonical.to_string());
        }
    }
    suggestions
}

#[derive(Clone)]
pub struct SuggestService {
    logger: Logger,
    store: Arc<DataStore>,
    config: MatcherConfig,
}

impl SuggestService {
    pub fn new(logger: Logger, store: Arc<DataStore>, config: MatcherConfig) -> Self {
        Self {
            logger: logger.child("suggest"),
            store,
            config,
        }
    }

    /// Autocomplete candidates for a partial query. An empty query or a
    /// missing alias dictionary yields an empty list, not an error.
    pub fn suggest(&self, query: &str) -> Result<Vec<String>, AdviceError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let index = match self.store.alias_index() {
            Ok(index) => index,
            Err(err) if err.kind == AdviceErrorKind::DataUnavailable => {
                self.logger.warn(
                    "Alias dictionary unavailable for autocomplete",
                    Some(&serde_json::json!({ "error": err.message })),
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };
        let suggestions = suggest_with_index(&index, query, &self.config);
        self.logger.debug(
            "Autocomplete",
            Some(&serde_json::json!({
                "query": query.trim(),
                "count": suggestions.len(),
            })),
        );
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::suggest_with_index;
    use crate::services::alias_index::{AliasIndex, AliasRow};
    use crate::services::logger::Logger;
    use crate::services::matcher::MatcherConfig;

    fn index(rows: &[(&str, &[&str])]) -> AliasIndex {
        let rows: Vec<AliasRow> = rows
            .iter()
            .map(|(canonical, aliases)| AliasRow {
                canonical: Some(canonical.to_string()),
                aliases: aliases.iter().map(|s| s.to_string()).collect(),
                alt_aliases: Vec::new(),
            })
            .collect();
        AliasIndex::build(&rows, &Logger::new("test"))
    }

    #[test]
    fn empty_query_yields_empty_result() {
        let index = index(&[("Machine Learning", &["ML"])]);
        assert!(suggest_with_index(&index, "", &MatcherConfig::default()).is_empty());
        assert!(suggest_with_index(&index, "   ", &MatcherConfig::default()).is_empty());
    }

    #[test]
    fn typoed_query_reaches_canonical_via_fuzzy_pass() {
        let index = index(&[
            ("Machine Learning", &["ML"]),
            ("Operating Systems", &["OS"]),
        ]);
        let suggestions = suggest_with_index(&index, "mchine lerning", &MatcherConfig::default());
        assert!(
            suggestions.contains(&"Machine Learning".to_string()),
            "got {:?}",
            suggestions
        );
    }

    #[test]
    fn alias_hits_map_back_to_canonical_names() {
        let index = index(&[("Data Structures", &["Data Struct", "DS"])]);
        let suggestions = suggest_with_index(&index, "data struct", &MatcherConfig::default());
        assert_eq!(suggestions, vec!["Data Structures".to_string()]);
    }

    #[test]
    fn results_are_deduplicated_across_passes() {
        let index = index(&[("Machine Learning", &["Machine Learning Basics"])]);
        let suggestions = suggest_with_index(&index, "machine learning", &MatcherConfig::default());
        assert_eq!(suggestions.len(), 1);
    }
}
