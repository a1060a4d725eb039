//! Core types shared across Kaiz facilities
//!
//! Holds the canonical field keys and event names used by the logging
//! facility and by anything that inspects emitted events.

pub mod schema;
