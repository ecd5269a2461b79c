// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, so the controller stays independent of
//! any concrete player, HTTP client or browser history.
//!
//! # Available Ports
//!
//! - [`player`]: Remote player control and events
//! - [`search`]: Related-video and metadata lookup
//! - [`url`]: Shareable query-string state

pub mod player;
pub mod search;
pub mod url;

// Re-export main types for convenience
pub use player::{PlayerAdapter, PlayerErrorCode, PlayerEvent};
pub use search::{RelatedVideoSource, SearchError, SearchItem, Snippet, VideoSession};
pub use url::UrlState;
