// SPDX-License-Identifier: MPL-2.0
//! Shareable URL state port definition.
//!
//! The host keeps the current loop window in the page's query string so the
//! link can be shared. The controller only produces query strings; writing
//! them somewhere is the job of a [`UrlState`] implementation.

/// Port for reading and replacing the page's query string.
pub trait UrlState {
    /// Current query string without the leading `?`.
    fn query(&self) -> String;

    /// Replaces the query string (without the leading `?`).
    fn replace_query(&mut self, query: String);
}
