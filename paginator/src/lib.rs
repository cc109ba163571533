//! A headless pagination engine for filtered item lists.
//!
//! For registry/classifier/renderer workflows over a concrete UI tree, see
//! the `paginator-adapter` crate.
//!
//! This crate focuses on the core state and math needed to keep a paged view
//! consistent as its underlying item set changes: the total-pages formula,
//! current-page clamping, the visible index slice, and the windowed
//! page-button model (with ellipsis gaps) rendered by adapters.
//!
//! It is UI-agnostic. A DOM/TUI layer is expected to provide:
//! - the available item count (after external filtering)
//! - navigation events (button activations)
//! - rendering of the emitted control slots
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controls;
mod options;
mod paginator;
mod types;

#[cfg(test)]
mod tests;

pub use controls::PAGE_WINDOW_MAX;
pub use options::{DEFAULT_PAGE_SIZE, OnChangeCallback, PaginatorOptions, parse_page_size};
pub use paginator::Paginator;
pub use types::{ControlSlot, PageSlice};
