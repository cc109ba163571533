// Example: a search feature driving refresh over a paged table.
use paginator_adapter::{
    FILTER_HIDDEN_CLASS, ITEM_SELECTOR_ATTR, MemTree, PAGE_SIZE_ATTR, PAGINATE_ATTR, PageRegistry,
    TargetRef,
};

fn main() {
    let mut tree = MemTree::new();
    let table = tree.append_child(tree.root(), "table");
    tree.set_attr(table, PAGINATE_ATTR, "true");
    tree.set_attr(table, ITEM_SELECTOR_ATTR, "tr");
    tree.set_attr(table, PAGE_SIZE_ATTR, "10");
    let body = tree.append_child(table, "tbody");
    let rows: Vec<_> = (0..42)
        .map(|i| {
            let row = tree.append_child(body, "tr");
            tree.set_text(row, &format!("record {i}"));
            row
        })
        .collect();

    let mut registry = PageRegistry::new(tree);
    registry.init();
    println!("pages={:?}", registry.total_pages(table));

    registry.goto(TargetRef::Node(table), 3.0);
    println!("page={:?}", registry.current_page(table));

    // A search keeps only every third record; the paginator follows.
    for (i, &row) in rows.iter().enumerate() {
        if i % 3 != 0 {
            registry.tree_mut().add_class(row, FILTER_HIDDEN_CLASS);
        }
    }
    registry.refresh_all();
    println!(
        "after filter: page={:?} pages={:?}",
        registry.current_page(table),
        registry.total_pages(table)
    );
}
