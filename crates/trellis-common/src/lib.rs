//! Common utilities for the Trellis document builder.
//!
//! This crate provides shared infrastructure used by all Trellis components:
//! - **Warning System** - coloured, deduplicated terminal output for content
//!   that composes fine but will not show up in rendered markup

pub mod warning;
