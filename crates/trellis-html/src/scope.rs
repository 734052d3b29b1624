//! Scoped insertion points.

use std::ops::{Deref, DerefMut};

use tracing::trace;
use trellis_dom::NodeId;

use crate::builder::Builder;

/// Guard that keeps a builder's cursor inside one element.
///
/// While the guard lives, every element created through it is appended to
/// that element. Dropping the guard moves the cursor to the element's parent
/// (or to the root when there is none), whether the block finished normally,
/// returned early with `?`, or unwound.
///
/// Guards deref to [`Builder`], so nested blocks are opened from the outer
/// guard.
#[derive(Debug)]
#[must_use = "the cursor moves back as soon as the scope is dropped"]
pub struct Scope<'a> {
    builder: &'a mut Builder,
    element: NodeId,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(builder: &'a mut Builder, element: NodeId) -> Self {
        builder.move_cursor(element);
        trace!(element = element.0, "scope entered");
        Self { builder, element }
    }

    /// The element the cursor is held in.
    pub const fn element(&self) -> NodeId {
        self.element
    }
}

impl Deref for Scope<'_> {
    type Target = Builder;

    fn deref(&self) -> &Builder {
        self.builder
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Builder {
        self.builder
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.builder.release(self.element);
        trace!(
            element = self.element.0,
            cursor = self.builder.cursor().0,
            "scope released"
        );
    }
}
