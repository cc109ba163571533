use alloc::vec::Vec;

use paginator::ControlSlot;

/// Marker identifying a node as a pagination container.
pub const PAGINATE_ATTR: &str = "data-paginate";
/// Optional per-container page size; falls back to the default when absent,
/// non-numeric, or non-positive.
pub const PAGE_SIZE_ATTR: &str = "data-page-size";
/// Optional per-container item selector; absent means direct children.
pub const ITEM_SELECTOR_ATTR: &str = "data-paginate-items";
/// Marks the generated controls subtree so it is never treated as an item.
pub const CONTROLS_ATTR: &str = "data-paginate-controls";
/// Set on items hidden by paging, so the paging and filter hidden-reasons
/// never conflict.
pub const PAGING_HIDDEN_ATTR: &str = "data-paging-hidden";
/// Data flag an external search feature sets on items it excludes.
pub const SEARCH_HIDDEN_ATTR: &str = "data-search-hidden";
/// Style class an external filter sets on items it excludes.
pub const FILTER_HIDDEN_CLASS: &str = "filter-hidden";

#[cfg(feature = "std")]
pub trait TreeNode: Copy + Eq + core::hash::Hash + core::fmt::Debug {}
#[cfg(feature = "std")]
impl<T: Copy + Eq + core::hash::Hash + core::fmt::Debug> TreeNode for T {}

#[cfg(not(feature = "std"))]
pub trait TreeNode: Copy + Ord + core::fmt::Debug {}
#[cfg(not(feature = "std"))]
impl<T: Copy + Ord + core::fmt::Debug> TreeNode for T {}

#[cfg(feature = "std")]
pub(crate) type NodeMap<N, V> = std::collections::HashMap<N, V>;
#[cfg(not(feature = "std"))]
pub(crate) type NodeMap<N, V> = alloc::collections::BTreeMap<N, V>;

/// Reference to a container: a node handle, or a selector string the backend
/// resolves against the whole tree.
#[derive(Clone, Copy, Debug)]
pub enum TargetRef<'a, N> {
    Node(N),
    Selector(&'a str),
}

/// Handles into a container's generated controls subtree.
#[derive(Clone, Copy, Debug)]
pub struct ControlNodes<N> {
    /// Outer wrapper; hidden while the container has no available items.
    pub block: N,
    /// Info label node.
    pub info: N,
    /// Navigation wrapper; hidden while there is only one page.
    pub nav: N,
    /// List node that receives the rendered control slots.
    pub page_list: N,
}

/// Capabilities a UI tree must provide to host pagination.
///
/// This is the seam between the pagination workflows and a concrete UI
/// runtime: a DOM binding implements it against real elements, while
/// [`crate::MemTree`] implements it in memory so the registry, classifier,
/// and renderer are testable without a UI runtime. Implementations do not
/// raise errors; unresolvable references yield `None`/no-ops.
pub trait PageTree {
    type Node: TreeNode;

    /// Resolves a selector string against the whole tree.
    fn select(&self, selector: &str) -> Option<Self::Node>;

    /// Whether `node` carries the pagination marker.
    fn is_page_container(&self, node: Self::Node) -> bool;

    /// The nearest ancestor of `node` (excluding `node` itself) carrying the
    /// pagination marker.
    fn closest_page_container(&self, node: Self::Node) -> Option<Self::Node>;

    /// Visits every marked descendant of `root` in document order. `None`
    /// scopes the scan to the whole tree.
    fn for_each_page_container(&self, root: Option<Self::Node>, f: &mut dyn FnMut(Self::Node));

    /// Raw page-size configuration attribute, read once at registration.
    fn page_size_attr(&self, node: Self::Node) -> Option<&str>;

    /// Raw item-selector configuration attribute, read once at registration.
    fn item_selector_attr(&self, node: Self::Node) -> Option<&str>;

    /// Collects candidate items in document order: descendants matching
    /// `selector` when one is configured, else the container's direct
    /// children. The generated controls subtree is never a candidate.
    fn collect_items(
        &self,
        container: Self::Node,
        selector: Option<&str>,
        out: &mut Vec<Self::Node>,
    );

    /// Whether an external feature currently excludes `item` from paging
    /// (filter class, search data flag, or native hidden flag).
    fn is_filter_hidden(&self, item: Self::Node) -> bool;

    /// Shows an item, restoring its remembered display mode.
    fn show_item(&mut self, item: Self::Node);

    /// Hides an item for paging (distinct from external filtering).
    fn hide_item(&mut self, item: Self::Node);

    /// Builds the controls subtree for a container, once per registration:
    /// adjacent to tabular containers, inside any other.
    fn build_controls(&mut self, container: Self::Node) -> ControlNodes<Self::Node>;

    fn set_text(&mut self, node: Self::Node, text: &str);

    fn set_node_hidden(&mut self, node: Self::Node, hidden: bool);

    fn clear_children(&mut self, node: Self::Node);

    /// Appends one rendered slot to the page list, returning the interactive
    /// node (or the marker node for an ellipsis).
    fn append_control(&mut self, page_list: Self::Node, slot: ControlSlot) -> Self::Node;
}
