// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core looping rules with no I/O.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Apart from `regex` for the duration grammar it depends only on `std`, so
//! every rule here is testable without a player or a network.
//!
//! # Modules
//!
//! - [`video`]: Video playback types ([`PlayerState`](video::PlayerState),
//!   [`PlaybackWindow`](video::PlaybackWindow), [`VideoId`](video::VideoId),
//!   [`RelatedVideo`](video::RelatedVideo)) and the duration codec

pub mod video;
