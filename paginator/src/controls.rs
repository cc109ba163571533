use alloc::string::String;

use crate::{ControlSlot, PageSlice};

/// Page lists up to this many pages render every page number; longer lists
/// collapse to a window around the current page plus both edges.
pub const PAGE_WINDOW_MAX: usize = 7;

/// Emits the navigation slots for a page list, in render order.
///
/// Contract (matched by the windowing rule below):
/// - page numbers are emitted ascending and deduplicated
/// - pages 1 and `total_pages` are always present
/// - a single ellipsis separates any two numbers whose gap exceeds 1
///
/// `current_page` must already be clamped to `[1, total_pages]`.
pub(crate) fn for_each_control_slot(
    current_page: usize,
    total_pages: usize,
    mut f: impl FnMut(ControlSlot),
) {
    f(ControlSlot::Prev {
        target: (current_page > 1).then(|| current_page - 1),
    });

    if total_pages <= PAGE_WINDOW_MAX {
        for number in 1..=total_pages {
            f(ControlSlot::Page {
                number,
                active: number == current_page,
            });
        }
    } else {
        // Both edges plus the neighborhood of the current page. The scratch
        // buffer is fixed-size; sorting + deduplication happen in place.
        let mut window = [
            1,
            2,
            total_pages - 1,
            total_pages,
            current_page.saturating_sub(1),
            current_page,
            current_page + 1,
        ];
        for n in &mut window {
            *n = (*n).clamp(1, total_pages);
        }
        window.sort_unstable();

        let mut prev: Option<usize> = None;
        for &number in &window {
            if prev == Some(number) {
                continue;
            }
            if let Some(p) = prev {
                if number - p > 1 {
                    f(ControlSlot::Ellipsis);
                }
            }
            f(ControlSlot::Page {
                number,
                active: number == current_page,
            });
            prev = Some(number);
        }
    }

    f(ControlSlot::Next {
        target: (current_page < total_pages).then(|| current_page + 1),
    });
}

/// Formats the info label for the current page.
///
/// The display range is 1-based and inclusive: `"1–20 / 25 records"`.
pub(crate) fn info_label(slice: PageSlice, total_items: usize) -> String {
    if total_items == 0 {
        return String::from("no records");
    }
    alloc::format!(
        "{}\u{2013}{} / {} records",
        slice.start_index + 1,
        slice.end_index,
        total_items
    )
}
