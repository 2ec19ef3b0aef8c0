//! Live Bridge - Real-time event broadcast bridge
//!
//! Relays content events raised by a host application to every viewer of the
//! affected page. Events are published on a Redis pub/sub channel named by a
//! keyed hash of the content id and status; a separate real-time gateway
//! subscribes to the broker and fans them out to browsers.
//!
//! The bridge never fails its caller: without a broker it degrades to a
//! no-op and leaves one warning for operators.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
