use crate::constants::matching;
use crate::errors::AdviceError;
use crate::utils::text::{fold_title, tokenize};
use serde::Serialize;
use std::collections::BTreeMap;

/// Tuned cutoffs for both scoring strategies. The defaults come from the
/// production data this engine was calibrated on; they are not assumed to
/// carry over to other text domains.
#[derive(Debug, Clone, Copy)]
pub struct MatcherConfig {
    pub vector_threshold: f64,
    pub duplicate_threshold: u32,
    pub fuzzy_floor: u32,
    pub suggestion_limit: usize,
    pub max_pool: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            vector_threshold: matching::VECTOR_MATCH_THRESHOLD,
            duplicate_threshold: matching::DUPLICATE_SCORE_THRESHOLD,
            fuzzy_floor: matching::FUZZY_SUGGESTION_FLOOR,
            suggestion_limit: matching::SUGGESTION_LIMIT,
            max_pool: matching::MAX_POOL_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorMatch {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuzzyMatch {
    pub name: String,
    pub score: u32,
}

fn term_frequencies(tokens: &[String]) -> BTreeMap<String, f64> {
    let mut counts: BTreeMap<String, f64> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0.0) += 1.0;
    }
    counts
}

fn l2_normalize(vector: &mut BTreeMap<String, f64>) {
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
}

fn cosine(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> f64 {
    a.iter()
        .filter_map(|(token, wa)| b.get(token).map(|wb| wa * wb))
        .sum()
}

/// Ranks the pool by TF-IDF cosine similarity against the query. The
/// vector space is fit over the query plus the pool; smoothed idf and
/// l2-normalised weights. Results keep only scores at or above the
/// vector threshold, sorted descending, ties in pool order.
pub fn rank_against_pool(query: &str, pool: &[String], config: &MatcherConfig) -> Vec<VectorMatch> {
    let pool = &pool[..pool.len().min(config.max_pool)];
    if pool.is_empty() {
        return Vec::new();
    }

    let query_tokens = tokenize(query);
    let candidate_tokens: Vec<Vec<String>> = pool.iter().map(|name| tokenize(name)).collect();

    let doc_count = (pool.len() + 1) as f64;
    let mut document_frequency: BTreeMap<String, f64> = BTreeMap::new();
    for tokens in std::iter::once(&query_tokens).chain(candidate_tokens.iter()) {
        let mut seen: Vec<&String> = tokens.iter().collect();
        seen.sort();
        seen.dedup();
        for token in seen {
            *document_frequency.entry(token.clone()).or_insert(0.0) += 1.0;
        }
    }
    let idf = |token: &str| -> f64 {
        let df = document_frequency.get(token).copied().unwrap_or(0.0);
        ((1.0 + doc_count) / (1.0 + df)).ln() + 1.0
    };

    let weigh = |tokens: &[String]| -> BTreeMap<String, f64> {
        let mut vector = term_frequencies(tokens);
        for (token, weight) in vector.iter_mut() {
            *weight *= idf(token);
        }
        l2_normalize(&mut vector);
        vector
    };

    let query_vector = weigh(&query_tokens);
    let mut matches: Vec<VectorMatch> = pool
        .iter()
        .zip(candidate_tokens.iter())
        .map(|(name, tokens)| VectorMatch {
            name: name.clone(),
            score: cosine(&query_vector, &weigh(tokens)),
        })
        .filter(|candidate| candidate.score >= config.vector_threshold)
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches
}

/// Best-alignment substring similarity in [0, 100]: the shorter string is
/// slid over every same-length window of the longer one and scored by
/// levenshtein distance; the best window wins.
pub fn partial_ratio(a: &str, b: &str) -> u32 {
    let a: Vec<char> = fold_title(a).chars().collect();
    let b: Vec<char> = fold_title(b).chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let needle: String = shorter.iter().collect();
    let len = shorter.len();

    let mut best = 0u32;
    for window in longer.windows(len) {
        let haystack: String = window.iter().collect();
        let distance = strsim::levenshtein(&needle, &haystack);
        let score = (((len.saturating_sub(distance)) as f64 / len as f64) * 100.0).round() as u32;
        if score > best {
            best = score;
        }
        if best == 100 {
            break;
        }
    }
    best
}

/// Single best fuzzy candidate from the catalog. Ties keep the first
/// occurrence in enumeration order. Fails only on an empty catalog.
pub fn best_against_catalog<'a, I>(query: &str, catalog: I) -> Result<FuzzyMatch, AdviceError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<FuzzyMatch> = None;
    for candidate in catalog {
        let score = partial_ratio(query, candidate);
        let better = best.as_ref().map(|b| score > b.score).unwrap_or(true);
        if better {
            best = Some(FuzzyMatch {
                name: candidate.to_string(),
                score,
            });
        }
    }
    best.ok_or_else(|| AdviceError::no_candidates("Catalog has no courses to match against"))
}

/// Top fuzzy candidates above the floor, for suggestion ranking.
pub fn top_against_pool(query: &str, pool: &[String], config: &MatcherConfig) -> Vec<FuzzyMatch> {
    let pool = &pool[..pool.len().min(config.max_pool)];
    let mut scored: Vec<FuzzyMatch> = pool
        .iter()
        .map(|name| FuzzyMatch {
            name: name.clone(),
            score: partial_ratio(query, name),
        })
        .filter(|candidate| candidate.score > config.fuzzy_floor)
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(config.suggestion_limit);
    scored
}
