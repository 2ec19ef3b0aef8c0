//! Domain layer containing the bridge's pure types and algorithms.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (state machine trait)
//! - `broadcast` - Connection settings, room keys, wire envelope, connection lifecycle

pub mod broadcast;
pub mod foundation;
