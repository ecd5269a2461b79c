// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The controller consumes the ports and never names a concrete adapter

pub mod port;
