//! Relevance-ranked substring search over the icon catalog.
//!
//! Matching is literal: the lower-cased query must appear inside the icon
//! name or inside one of its search terms. Candidates are bucketed into
//! [`Tier`]s and sorted stably, so icons in the same tier keep catalog order.

use crate::catalog::{Catalog, IconRecord};

/// Number of results returned when the caller has no preference
pub const DEFAULT_LIMIT: usize = 10;

/// Relevance bucket, lower ranks first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Name equals the query
    Exact = 0,
    /// Name starts with the query
    Prefix = 1,
    /// Name contains the query elsewhere
    Contains = 2,
    /// Only a search term contains the query
    SearchTerm = 3,
}

/// A ranked hit, only lives for the duration of one query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult<'a> {
    pub icon: &'a IconRecord,
    pub tier: Tier,
}

/// Classify an icon against an already lower-cased query.
/// Returns `None` if the icon is not a candidate.
fn classify(icon: &IconRecord, query: &str) -> Option<Tier> {
    let name = icon.name.to_lowercase();

    if name == query {
        Some(Tier::Exact)
    } else if name.starts_with(query) {
        Some(Tier::Prefix)
    } else if name.contains(query) {
        Some(Tier::Contains)
    } else if icon
        .search_terms
        .iter()
        .any(|term| term.to_lowercase().contains(query))
    {
        Some(Tier::SearchTerm)
    } else {
        None
    }
}

/// Rank every candidate and keep the best `limit`, with their tiers.
///
/// Empty queries are the caller's concern; an empty query here matches
/// everything at [`Tier::Prefix`] or better.
pub fn rank_matches<'a>(query: &str, catalog: &'a Catalog, limit: usize) -> Vec<MatchResult<'a>> {
    let query = query.to_lowercase();

    let mut matches: Vec<MatchResult<'a>> = catalog
        .iter()
        .filter_map(|icon| classify(icon, &query).map(|tier| MatchResult { icon, tier }))
        .collect();

    // Stable sort keeps catalog order within a tier
    matches.sort_by_key(|m| m.tier);
    matches.truncate(limit);
    matches
}

/// Icons matching `query`, most relevant first, at most `limit` of them
pub fn rank<'a>(query: &str, catalog: &'a Catalog, limit: usize) -> Vec<&'a IconRecord> {
    rank_matches(query, catalog, limit)
        .into_iter()
        .map(|m| m.icon)
        .collect()
}
