//! Scoped document and fragment builders for Trellis.
//!
//! # Scope
//!
//! This crate provides:
//! - **Builders** - [`Document`] and [`Fragment`] append elements at a
//!   movable cursor
//! - **Scoped blocks** - [`Scope`] guards move the cursor into an element and
//!   move it back when dropped, on every exit path
//! - **Markdown** - text rendered through comrak and wrapped in
//!   `<div class="markdown">`
//! - **Sparklines** - inline SVG polylines for numeric series
//!
//! # Example
//!
//! ```ignore
//! let mut doc = Document::new();
//! {
//!     let mut div = doc.enter("div", attrs![cls = "container"])?;
//!     div.tag_with("p", ["nested"], attrs![])?;
//! }
//! assert_eq!(
//!     doc.render(),
//!     r#"<!DOCTYPE html><html><div class="container"><p>nested</p></div></html>"#
//! );
//! ```

pub mod builder;
pub mod markdown;
pub mod scope;
pub mod sparkline;

pub use builder::{Attachment, Builder, BuilderKind, Document, Fragment};
pub use scope::Scope;
pub use sparkline::SparklineOptions;

pub use trellis_dom::{AttrValue, NodeId, TagError, attrs};
