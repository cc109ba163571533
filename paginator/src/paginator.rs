use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::controls;
use crate::options::normalize_page_size;
use crate::{ControlSlot, PageSlice, PaginatorOptions};

/// A headless pagination engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it by reporting the available item count and by
///   forwarding navigation events.
/// - Rendering is exposed via the visible [`PageSlice`] and the control-slot
///   iteration API (`for_each_control_slot`).
///
/// For registry/classifier/renderer workflows over a concrete UI tree, see
/// the `paginator-adapter` crate.
///
/// Every query is a pure function of `(options, current_page, total_items)`,
/// so recomputation is idempotent and safely re-entrant.
#[derive(Clone, Debug)]
pub struct Paginator {
    options: PaginatorOptions,
    current_page: usize,
    total_items: usize,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Paginator {
    /// Creates a new paginator from options.
    ///
    /// The initial page is clamped once items are counted; with no items yet
    /// it starts at `max(1, initial_page)`.
    pub fn new(options: PaginatorOptions) -> Self {
        pdebug!(
            page_size = options.page_size,
            initial_page = options.initial_page,
            "Paginator::new"
        );
        let mut p = Self {
            current_page: options.initial_page.max(1),
            total_items: 0,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        p.options.page_size = normalize_page_size(p.options.page_size);
        p
    }

    pub fn options(&self) -> &PaginatorOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: PaginatorOptions) {
        self.options = options;
        self.options.page_size = normalize_page_size(self.options.page_size);
        ptrace!(page_size = self.options.page_size, "Paginator::set_options");
        self.reclamp();
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut PaginatorOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Paginator) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// Recommended for adapters that update the item count and the page
    /// together on one trigger; without batching each setter may fire
    /// `on_change`, which can be expensive if the callback drives rendering.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = normalize_page_size(page_size);
        if self.options.page_size == page_size {
            return;
        }
        self.options.page_size = page_size;
        self.reclamp();
        self.notify();
    }

    /// Number of available items, as reported by the last classification.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Reports a new available item count and reclamps the current page.
    pub fn set_total_items(&mut self, total_items: usize) {
        let changed = self.total_items != total_items;
        self.total_items = total_items;
        let page_before = self.current_page;
        self.reclamp();
        if !changed && self.current_page == page_before {
            return;
        }
        ptrace!(total_items, "Paginator::set_total_items");
        self.notify();
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// `max(1, ceil(total_items / page_size))`; an empty set still has one
    /// synthetic page.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.options.page_size)
    }

    /// Navigates to a page given as an arbitrary numeric value.
    ///
    /// Non-finite input is ignored. Finite values are truncated toward zero
    /// and then clamped to `[1, total_pages]`; `goto` itself does not
    /// validate range, only finiteness.
    pub fn goto(&mut self, page: f64) {
        if !page.is_finite() {
            ptrace!(page, "Paginator::goto ignoring non-finite page");
            return;
        }
        self.apply_page(page as i64);
    }

    /// Navigates to a page number, clamping to `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize) {
        self.apply_page(page.min(i64::MAX as usize) as i64);
    }

    pub fn next_page(&mut self) {
        self.apply_page(self.current_page as i64 + 1);
    }

    pub fn prev_page(&mut self) {
        self.apply_page(self.current_page as i64 - 1);
    }

    pub fn first_page(&mut self) {
        self.apply_page(1);
    }

    pub fn last_page(&mut self) {
        self.apply_page(self.total_pages() as i64);
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// The half-open index range of available items visible on the current
    /// page. Empty when there are no items.
    pub fn page_slice(&self) -> PageSlice {
        if self.total_items == 0 {
            return PageSlice {
                start_index: 0,
                end_index: 0,
            };
        }
        let start_index = (self.current_page - 1) * self.options.page_size;
        let end_index = core::cmp::min(start_index + self.options.page_size, self.total_items);
        PageSlice {
            start_index,
            end_index,
        }
    }

    /// Whether the available item at `index` is on the current page.
    pub fn is_on_page(&self, index: usize) -> bool {
        self.page_slice().contains(index)
    }

    /// Info text for the current page: `"no records"` when empty, else a
    /// 1-based inclusive display range like `"1–20 / 25 records"`.
    pub fn info_label(&self) -> String {
        controls::info_label(self.page_slice(), self.total_items)
    }

    /// Whether the controls block should be shown at all.
    pub fn controls_visible(&self) -> bool {
        self.total_items > 0
    }

    /// Whether the page-button list should be shown. A single page has
    /// nothing to navigate.
    pub fn nav_visible(&self) -> bool {
        self.total_pages() > 1
    }

    /// Emits the navigation slots for the current state, in render order.
    pub fn for_each_control_slot(&self, f: impl FnMut(ControlSlot)) {
        controls::for_each_control_slot(self.current_page, self.total_pages(), f);
    }

    /// Collects navigation slots into `out` (clears `out` first).
    ///
    /// This is a convenience wrapper around [`Self::for_each_control_slot`].
    /// For maximum performance, prefer `for_each_control_slot` and reuse a
    /// scratch buffer in your adapter.
    pub fn collect_control_slots(&self, out: &mut Vec<ControlSlot>) {
        out.clear();
        self.for_each_control_slot(|slot| out.push(slot));
    }

    fn apply_page(&mut self, requested: i64) {
        let clamped = self.clamp_page(requested);
        if clamped == self.current_page {
            return;
        }
        ptrace!(requested, clamped, "Paginator::apply_page");
        self.current_page = clamped;
        self.notify();
    }

    fn clamp_page(&self, requested: i64) -> usize {
        if self.total_items == 0 {
            return 1;
        }
        requested.clamp(1, self.total_pages() as i64) as usize
    }

    fn reclamp(&mut self) {
        self.current_page = self.clamp_page(self.current_page as i64);
    }
}

pub(crate) fn total_pages(total_items: usize, page_size: usize) -> usize {
    if total_items == 0 {
        1
    } else {
        total_items.div_ceil(page_size)
    }
}
