//! Fuzzy name resolution over a loaded registry.

use crate::{AddressBook, ContractEntry};
use thiserror::Error;

/// Errors raised by [`resolve`]. Both variants are recoverable by the caller
/// supplying a more specific query; neither signals data corruption.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The query was empty, which would match every key.
    #[error("query must not be empty")]
    EmptyQuery,
    /// No registry key contains the query as a substring.
    #[error("no registry entry matches `{0}`")]
    NoMatch(String),
    /// More than one registry key matched.
    #[error("query `{query}` is ambiguous, matches: {}", candidates.join(", "))]
    Ambiguous {
        /// The offending query.
        query: String,
        /// Every key that matched, in registry order.
        candidates: Vec<String>,
    },
}

/// Resolves a fuzzy name query to exactly one registry entry.
///
/// A key matches when its lower-cased form contains the lower-cased query as a
/// substring. The query must be non-empty. Succeeds only on exactly one match.
/// Pure read, no side effects.
pub fn resolve<'a>(book: &'a AddressBook, query: &str) -> Result<&'a ContractEntry, ResolveError> {
    if query.is_empty() {
        return Err(ResolveError::EmptyQuery);
    }
    let needle = query.to_lowercase();
    let mut matches = book.iter().filter(|e| e.name.to_lowercase().contains(&needle));

    let Some(first) = matches.next() else {
        return Err(ResolveError::NoMatch(query.to_string()));
    };
    let rest: Vec<&ContractEntry> = matches.collect();
    if rest.is_empty() {
        return Ok(first);
    }

    let mut candidates = vec![first.name.clone()];
    candidates.extend(rest.into_iter().map(|e| e.name.clone()));
    Err(ResolveError::Ambiguous { query: query.to_string(), candidates })
}
