use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }
}

fn expected_total_pages(total_items: usize, page_size: usize) -> usize {
    if total_items == 0 {
        return 1;
    }
    let mut pages = total_items / page_size;
    if total_items % page_size != 0 {
        pages += 1;
    }
    pages
}

fn expected_window_numbers(current_page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= PAGE_WINDOW_MAX {
        return (1..=total_pages).collect();
    }
    let mut set = BTreeSet::new();
    for candidate in [
        1,
        2,
        total_pages - 1,
        total_pages,
        current_page.saturating_sub(1),
        current_page,
        current_page + 1,
    ] {
        if (1..=total_pages).contains(&candidate) {
            set.insert(candidate);
        }
    }
    set.into_iter().collect()
}

fn paginator_with(total_items: usize, page_size: usize) -> Paginator {
    let mut p = Paginator::new(PaginatorOptions::new(page_size));
    p.set_total_items(total_items);
    p
}

fn page_numbers(slots: &[ControlSlot]) -> Vec<usize> {
    slots
        .iter()
        .filter_map(|slot| match slot {
            ControlSlot::Page { number, .. } => Some(*number),
            _ => None,
        })
        .collect()
}

#[test]
fn total_pages_formula() {
    for total_items in 0..=50usize {
        for page_size in 1..=10usize {
            let p = paginator_with(total_items, page_size);
            assert_eq!(
                p.total_pages(),
                expected_total_pages(total_items, page_size),
                "n={total_items}, p={page_size}"
            );
        }
    }
}

#[test]
fn visible_count_matches_model() {
    let mut rng = Lcg::new(0xD1CE);
    for _ in 0..2000 {
        let total_items = rng.gen_range_usize(0, 200);
        let page_size = rng.gen_range_usize(1, 25);
        let mut p = paginator_with(total_items, page_size);
        let requested = rng.gen_range_u64(0, (p.total_pages() + 6) as u64) as f64 - 3.0;
        p.goto(requested);

        let total_pages = expected_total_pages(total_items, page_size);
        assert!(p.current_page() >= 1);
        assert!(p.current_page() <= total_pages);

        let slice = p.page_slice();
        if total_items == 0 {
            assert!(slice.is_empty());
            assert_eq!(p.current_page(), 1);
        } else {
            let expected =
                core::cmp::min(page_size, total_items - (p.current_page() - 1) * page_size);
            assert_eq!(slice.len(), expected);
        }
    }
}

#[test]
fn goto_clamps_out_of_range_pages() {
    let mut p = paginator_with(25, 20);
    p.goto(100.0);
    assert_eq!(p.current_page(), 2);
    p.goto(-3.0);
    assert_eq!(p.current_page(), 1);
    p.goto(0.0);
    assert_eq!(p.current_page(), 1);
}

#[test]
fn goto_ignores_non_finite_pages() {
    let mut p = paginator_with(100, 10);
    p.goto(5.0);
    assert_eq!(p.current_page(), 5);

    p.goto(f64::NAN);
    p.goto(f64::INFINITY);
    p.goto(f64::NEG_INFINITY);
    assert_eq!(p.current_page(), 5);
}

#[test]
fn goto_truncates_fractional_pages() {
    let mut p = paginator_with(30, 10);
    p.goto(2.9);
    assert_eq!(p.current_page(), 2);
}

#[test]
fn first_page_of_twenty_five_items() {
    let p = paginator_with(25, 20);
    assert_eq!(p.current_page(), 1);
    assert_eq!(p.total_pages(), 2);
    assert_eq!(
        p.page_slice(),
        PageSlice {
            start_index: 0,
            end_index: 20
        }
    );
    assert_eq!(p.info_label(), "1\u{2013}20 / 25 records");
    assert!(p.has_next());
    assert!(!p.has_prev());

    let mut slots = Vec::new();
    p.collect_control_slots(&mut slots);
    assert_eq!(
        slots,
        [
            ControlSlot::Prev { target: None },
            ControlSlot::Page {
                number: 1,
                active: true
            },
            ControlSlot::Page {
                number: 2,
                active: false
            },
            ControlSlot::Next { target: Some(2) },
        ]
    );
    assert!(!slots[0].is_interactive());
    assert!(slots[3].is_interactive());
}

#[test]
fn last_partial_page_of_twenty_five_items() {
    let mut p = paginator_with(25, 20);
    p.goto(2.0);
    assert_eq!(
        p.page_slice(),
        PageSlice {
            start_index: 20,
            end_index: 25
        }
    );
    assert_eq!(p.info_label(), "21\u{2013}25 / 25 records");
    assert!(!p.has_next());
    assert!(p.has_prev());
}

#[test]
fn empty_set_has_one_synthetic_page_and_hidden_controls() {
    let p = paginator_with(0, 20);
    assert_eq!(p.current_page(), 1);
    assert_eq!(p.total_pages(), 1);
    assert!(p.page_slice().is_empty());
    assert_eq!(p.info_label(), "no records");
    assert!(!p.controls_visible());
    assert!(!p.nav_visible());
}

#[test]
fn empty_set_resets_current_page() {
    let mut p = paginator_with(100, 10);
    p.goto(7.0);
    assert_eq!(p.current_page(), 7);
    p.set_total_items(0);
    assert_eq!(p.current_page(), 1);
}

#[test]
fn window_around_middle_page() {
    let mut p = paginator_with(100, 10);
    p.goto(5.0);

    let mut slots = Vec::new();
    p.collect_control_slots(&mut slots);
    assert_eq!(
        slots,
        [
            ControlSlot::Prev { target: Some(4) },
            ControlSlot::Page {
                number: 1,
                active: false
            },
            ControlSlot::Page {
                number: 2,
                active: false
            },
            ControlSlot::Ellipsis,
            ControlSlot::Page {
                number: 4,
                active: false
            },
            ControlSlot::Page {
                number: 5,
                active: true
            },
            ControlSlot::Page {
                number: 6,
                active: false
            },
            ControlSlot::Ellipsis,
            ControlSlot::Page {
                number: 9,
                active: false
            },
            ControlSlot::Page {
                number: 10,
                active: false
            },
            ControlSlot::Next { target: Some(6) },
        ]
    );
}

#[test]
fn short_page_lists_render_every_number() {
    let p = paginator_with(70, 10);
    let mut slots = Vec::new();
    p.collect_control_slots(&mut slots);
    assert_eq!(page_numbers(&slots), [1, 2, 3, 4, 5, 6, 7]);
    assert!(!slots.contains(&ControlSlot::Ellipsis));
}

#[test]
fn window_collapses_once_past_the_threshold() {
    let p = paginator_with(80, 10);
    let mut slots = Vec::new();
    p.collect_control_slots(&mut slots);
    assert_eq!(
        slots,
        [
            ControlSlot::Prev { target: None },
            ControlSlot::Page {
                number: 1,
                active: true
            },
            ControlSlot::Page {
                number: 2,
                active: false
            },
            ControlSlot::Ellipsis,
            ControlSlot::Page {
                number: 7,
                active: false
            },
            ControlSlot::Page {
                number: 8,
                active: false
            },
            ControlSlot::Next { target: Some(2) },
        ]
    );
}

#[test]
fn window_shape_matches_model() {
    let mut rng = Lcg::new(0xBEEF);
    let mut slots = Vec::new();
    for _ in 0..2000 {
        let total_pages = rng.gen_range_usize(1, 500);
        let current_page = rng.gen_range_usize(1, total_pages + 1);
        let mut p = paginator_with(total_pages, 1);
        p.set_page(current_page);
        p.collect_control_slots(&mut slots);

        assert_eq!(
            page_numbers(&slots),
            expected_window_numbers(current_page, total_pages),
            "cur={current_page}, total={total_pages}"
        );

        // Render-order invariants: prev first, next last, exactly one active
        // page, ellipses only between numbers with a real gap.
        assert!(matches!(slots.first(), Some(ControlSlot::Prev { .. })));
        assert!(matches!(slots.last(), Some(ControlSlot::Next { .. })));
        let active: Vec<usize> = slots
            .iter()
            .filter_map(|slot| match slot {
                ControlSlot::Page {
                    number,
                    active: true,
                } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(active, [current_page]);

        let mut prev_number: Option<usize> = None;
        let mut pending_gap = false;
        for slot in &slots[1..slots.len() - 1] {
            match slot {
                ControlSlot::Ellipsis => {
                    assert!(!pending_gap, "adjacent ellipses");
                    pending_gap = true;
                }
                ControlSlot::Page { number, .. } => {
                    if let Some(p) = prev_number {
                        assert!(*number > p, "page numbers must ascend");
                        assert_eq!(pending_gap, *number - p > 1, "gap at {number}");
                    }
                    prev_number = Some(*number);
                    pending_gap = false;
                }
                _ => unreachable!("prev/next inside the page list"),
            }
        }
    }
}

#[test]
fn rerendering_without_changes_is_stable() {
    let mut p = paginator_with(100, 10);
    p.goto(5.0);

    let mut first = Vec::new();
    let mut second = Vec::new();
    p.collect_control_slots(&mut first);
    p.collect_control_slots(&mut second);
    assert_eq!(first, second);
    assert_eq!(p.info_label(), p.info_label());
    assert_eq!(p.page_slice(), p.page_slice());
}

#[test]
fn page_size_normalization() {
    assert_eq!(PaginatorOptions::new(0).page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(PaginatorOptions::new(5).page_size, 5);

    let mut p = paginator_with(10, 5);
    p.set_page_size(0);
    assert_eq!(p.page_size(), DEFAULT_PAGE_SIZE);
}

#[test]
fn page_size_attr_parsing() {
    assert_eq!(parse_page_size(None), DEFAULT_PAGE_SIZE);
    assert_eq!(parse_page_size(Some("")), DEFAULT_PAGE_SIZE);
    assert_eq!(parse_page_size(Some("abc")), DEFAULT_PAGE_SIZE);
    assert_eq!(parse_page_size(Some("0")), DEFAULT_PAGE_SIZE);
    assert_eq!(parse_page_size(Some("-5")), DEFAULT_PAGE_SIZE);
    assert_eq!(parse_page_size(Some("7")), 7);
    assert_eq!(parse_page_size(Some(" 15 ")), 15);
}

#[test]
fn shrinking_the_item_set_reclamps_the_page() {
    let mut p = paginator_with(100, 10);
    p.goto(10.0);
    assert_eq!(p.current_page(), 10);

    p.set_total_items(35);
    assert_eq!(p.current_page(), 4);
    assert_eq!(
        p.page_slice(),
        PageSlice {
            start_index: 30,
            end_index: 35
        }
    );
}

#[test]
fn step_navigation() {
    let mut p = paginator_with(45, 10);
    assert_eq!(p.total_pages(), 5);

    p.next_page();
    p.next_page();
    assert_eq!(p.current_page(), 3);
    p.prev_page();
    assert_eq!(p.current_page(), 2);
    p.last_page();
    assert_eq!(p.current_page(), 5);
    assert!(!p.has_next());
    p.next_page();
    assert_eq!(p.current_page(), 5);
    p.first_page();
    assert_eq!(p.current_page(), 1);
    assert!(!p.has_prev());
    p.prev_page();
    assert_eq!(p.current_page(), 1);
}

#[test]
fn update_options_rebuilds_derived_state() {
    let mut p = paginator_with(50, 10);
    p.goto(5.0);
    p.update_options(|options| options.page_size = 25);

    assert_eq!(p.page_size(), 25);
    assert_eq!(p.total_pages(), 2);
    assert_eq!(p.current_page(), 2);
    assert!(p.is_on_page(25));
    assert!(!p.is_on_page(24));
}

#[test]
fn on_change_can_be_attached_later() {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let mut p = paginator_with(40, 10);
    p.set_on_change(Some(move |_: &Paginator| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    p.next_page();
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn on_change_fires_per_mutation() {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let mut p = Paginator::new(
        PaginatorOptions::new(10).with_on_change(Some(move |_: &Paginator| {
            counter.fetch_add(1, Ordering::SeqCst);
        })),
    );

    p.set_total_items(100);
    p.goto(3.0);
    assert_eq!(fired.load(Ordering::SeqCst), 2);

    // No state change, no notification.
    p.goto(3.0);
    p.set_total_items(100);
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn batch_update_coalesces_notifications() {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let mut p = Paginator::new(
        PaginatorOptions::new(10).with_on_change(Some(move |_: &Paginator| {
            counter.fetch_add(1, Ordering::SeqCst);
        })),
    );

    p.batch_update(|p| {
        p.set_total_items(100);
        p.goto(4.0);
        p.set_page_size(25);
    });
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(p.current_page(), 4);
    assert_eq!(p.total_pages(), 4);
}
