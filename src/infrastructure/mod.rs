// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`youtube`]: Related videos and durations from the YouTube Data API
//!   (implements [`RelatedVideoSource`])
//! - [`simulated`]: Offline player and search source
//! - [`memory_url`]: Query string held in memory (implements [`UrlState`])
//!
//! # Design Notes
//!
//! - Adapters implement traits from `application::port`
//! - Wire formats stay private to the adapter that speaks them
//!
//! [`RelatedVideoSource`]: crate::application::port::RelatedVideoSource
//! [`UrlState`]: crate::application::port::UrlState

pub mod memory_url;
pub mod simulated;
pub mod youtube;

// Re-export main types for convenience
pub use memory_url::MemoryUrl;
pub use simulated::{SimulatedEvents, SimulatedPlayer, SimulatedSource};
pub use youtube::YoutubeClient;
