// Example: minimal usage and navigation.
use paginator::{Paginator, PaginatorOptions};

fn main() {
    let mut p = Paginator::new(PaginatorOptions::new(20));
    p.set_total_items(25);

    println!("total_pages={}", p.total_pages());
    println!("slice={:?}", p.page_slice());
    println!("info={}", p.info_label());

    p.goto(2.0);
    let mut slots = Vec::new();
    p.collect_control_slots(&mut slots);
    println!("after goto(2): info={} slots={:?}", p.info_label(), slots);
}
