// SPDX-License-Identifier: MPL-2.0
//! In-memory query-string state.

use crate::application::port::UrlState;

/// [`UrlState`] kept in a plain string, for hosts without a browser
/// location bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryUrl {
    query: String,
    replacements: usize,
}

impl MemoryUrl {
    /// Creates the state from a query string, with or without leading `?`.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            query: query.trim_start_matches('?').to_string(),
            replacements: 0,
        }
    }

    /// Number of times the query was replaced.
    #[must_use]
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl UrlState for MemoryUrl {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: String) {
        tracing::debug!(%query, "URL query replaced");
        self.query = query;
        self.replacements += 1;
    }
}
