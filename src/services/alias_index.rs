use crate::services::logger::Logger;
use crate::utils::text::fold_title;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// One record of the alias dictionary. The source carries two independent
/// alias columns; both are merged on build.
#[derive(Debug, Clone, Deserialize)]
pub struct AliasRow {
    #[serde(default)]
    pub canonical: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub alt_aliases: Vec<String>,
}

/// Bidirectional alias dictionary, rebuilt fully on every load and
/// read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    alias_to_canonical: BTreeMap<String, String>,
    canonical_to_aliases: BTreeMap<String, BTreeSet<String>>,
    universe: Vec<String>,
}

impl AliasIndex {
    pub fn build(rows: &[AliasRow], logger: &Logger) -> Self {
        let mut index = AliasIndex::default();
        let mut seen_universe: HashSet<String> = HashSet::new();

        for (position, row) in rows.iter().enumerate() {
            let canonical = row
                .canonical
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty());
            let Some(canonical) = canonical else {
                logger.warn(
                    "Alias row without canonical name skipped",
                    Some(&serde_json::json!({ "row": position })),
                );
                continue;
            };
            let canonical_key = fold_title(canonical);

            let mut merged: Vec<&str> = Vec::new();
            let mut seen_row: HashSet<String> = HashSet::new();
            for alias in row
                .aliases
                .iter()
                .chain(row.alt_aliases.iter())
                .map(|alias| alias.trim())
                .chain(std::iter::once(canonical))
            {
                if alias.is_empty() {
                    continue;
                }
                if seen_row.insert(fold_title(alias)) {
                    merged.push(alias);
                }
            }

            for alias in merged {
                let alias_key = fold_title(alias);
                match index.alias_to_canonical.get(&alias_key) {
                    Some(owner) if fold_title(owner) != canonical_key => {
                        logger.warn(
                            "Alias already claimed by another canonical course",
                            Some(&serde_json::json!({
                                "alias": alias,
                                "kept": owner,
                                "ignored": canonical,
                            })),
                        );
                        continue;
                    }
                    Some(_) => {}
                    None => {
                        index
                            .alias_to_canonical
                            .insert(alias_key.clone(), canonical.to_string());
                    }
                }
                index
                    .canonical_to_aliases
                    .entry(canonical_key.clone())
                    .or_default()
                    .insert(alias_key);
                if seen_universe.insert(fold_title(alias)) {
                    index.universe.push(alias.to_string());
                }
            }
        }

        index
    }

    /// Maps a name to its canonical course title. Unknown names pass
    /// through trimmed, as their own canonical form.
    pub fn resolve(&self, name: &str) -> String {
        match self.alias_to_canonical.get(&fold_title(name)) {
            Some(canonical) => canonical.clone(),
            None => name.trim().to_string(),
        }
    }

    pub fn canonical_for(&self, name: &str) -> Option<&str> {
        self.alias_to_canonical
            .get(&fold_title(name))
            .map(String::as_str)
    }

    /// Unions the given folded titles with every alias registered for
    /// each of them. Titles not in the index contribute only themselves.
    pub fn expand(&self, names: &BTreeSet<String>) -> BTreeSet<String> {
        let mut expanded = names.clone();
        for name in names {
            if let Some(aliases) = self.canonical_to_aliases.get(&fold_title(name)) {
                expanded.extend(aliases.iter().cloned());
            }
        }
        expanded
    }

    /// Every known alias string, deduplicated, in first-seen row order.
    pub fn universe(&self) -> &[String] {
        &self.universe
    }

    pub fn is_empty(&self) -> bool {
        self.alias_to_canonical.is_empty()
    }

    pub fn len(&self) -> usize {
        self.canonical_to_aliases.len()
    }
}
