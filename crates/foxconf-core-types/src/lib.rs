//! Core types shared across foxconf facilities
//!
//! - **Schema constants**: Canonical field keys and event names used by the
//!   logging facility and by log assertions in tests

pub mod schema;
