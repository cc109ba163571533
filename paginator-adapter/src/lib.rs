//! Tree adapter utilities for the `paginator` crate.
//!
//! The `paginator` crate is UI-agnostic and focuses on the core math and
//! state. This crate provides the tree-facing layer that turns marked
//! containers into self-managing paged views:
//!
//! - [`PageTree`]: the capability seam a UI runtime implements (container
//!   discovery, item enumeration, filter markers, visibility, controls)
//! - [`PageRegistry`]: one engine per container, keyed by node identity,
//!   with the `init`/`register`/`refresh` surface external features call
//! - [`MemTree`]: an in-memory reference backend for tests and headless use
//!
//! This crate is intentionally framework-agnostic (no web/TUI bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod memtree;
mod registry;
mod tree;


pub use memtree::{MemTree, NodeId};
pub use registry::PageRegistry;
pub use tree::{
    CONTROLS_ATTR, ControlNodes, FILTER_HIDDEN_CLASS, ITEM_SELECTOR_ATTR, PAGE_SIZE_ATTR,
    PAGINATE_ATTR, PAGING_HIDDEN_ATTR, PageTree, SEARCH_HIDDEN_ATTR, TargetRef, TreeNode,
};
