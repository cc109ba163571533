use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use paginator::ControlSlot;

use crate::tree::{
    CONTROLS_ATTR, ControlNodes, FILTER_HIDDEN_CLASS, ITEM_SELECTOR_ATTR, PAGE_SIZE_ATTR,
    PAGINATE_ATTR, PAGING_HIDDEN_ATTR, PageTree, SEARCH_HIDDEN_ATTR,
};

/// Handle to a [`MemTree`] node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug, Default)]
struct NodeData {
    tag: String,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    hidden: bool,
    /// Inline display mode; `None` means the tag's default.
    display: Option<String>,
    /// Original display mode, captured lazily the first time paging touches
    /// the node.
    saved_display: Option<Option<String>>,
}

/// An arena-backed in-memory tree implementing [`PageTree`].
///
/// This is the reference backend: the test suite drives the registry,
/// classifier, and renderer against it, and headless consumers can use it
/// to compute pagination without a UI runtime. It resolves a small selector
/// subset (`tag`, `.class`, `#id`, `tag.class`) that covers the attribute
/// contract; a real DOM backend would delegate to its own query engine
/// instead.
///
/// Detached nodes (e.g. control buttons replaced by a re-render) stay in the
/// arena unreferenced; the arena lives for the page lifetime, like the
/// component itself.
#[derive(Clone, Debug)]
pub struct MemTree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl MemTree {
    pub fn new() -> Self {
        let root_data = NodeData {
            tag: String::from("root"),
            ..NodeData::default()
        };
        Self {
            nodes: alloc::vec![root_data],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn append_child(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.alloc(tag, Some(parent));
        if let Some(data) = self.nodes.get_mut(parent.0) {
            data.children.push(id);
        }
        id
    }

    /// Inserts a new node right after `sibling` in its parent; appends
    /// inside `sibling` when it has no parent.
    pub fn insert_after(&mut self, sibling: NodeId, tag: &str) -> NodeId {
        let Some(parent) = self.parent(sibling) else {
            return self.append_child(sibling, tag);
        };
        let id = self.alloc(tag, Some(parent));
        if let Some(data) = self.nodes.get_mut(parent.0) {
            match data.children.iter().position(|&child| child == sibling) {
                Some(pos) => data.children.insert(pos + 1, id),
                None => data.children.push(id),
            }
        }
        id
    }

    fn alloc(&mut self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag: tag.to_string(),
            parent,
            ..NodeData::default()
        });
        id
    }

    pub fn tag(&self, node: NodeId) -> &str {
        self.nodes.get(node.0).map(|data| data.tag.as_str()).unwrap_or("")
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|data| data.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|data| data.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.attrs.remove(name);
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(node.0)
            .and_then(|data| data.attrs.get(name))
            .map(String::as_str)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.classes.remove(class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(node.0)
            .is_some_and(|data| data.classes.contains(class))
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.hidden = hidden;
        }
    }

    pub fn hidden(&self, node: NodeId) -> bool {
        self.nodes.get(node.0).is_some_and(|data| data.hidden)
    }

    pub fn set_display(&mut self, node: NodeId, display: Option<&str>) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.display = display.map(str::to_string);
        }
    }

    /// The node's inline display mode; `None` means the tag's default.
    pub fn display(&self, node: NodeId) -> Option<&str> {
        self.nodes
            .get(node.0)
            .and_then(|data| data.display.as_deref())
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.text = text.to_string();
        }
    }

    pub fn text(&self, node: NodeId) -> &str {
        self.nodes.get(node.0).map(|data| data.text.as_str()).unwrap_or("")
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            return self.attr(node, "id") == Some(id);
        }
        let mut parts = selector.split('.');
        let tag = parts.next().unwrap_or("");
        if !tag.is_empty() && self.tag(node) != tag {
            return false;
        }
        parts.all(|class| self.has_class(node, class))
    }

    /// Visits the descendants of `start` (excluding `start`) in document
    /// order. Returning `false` from `f` prunes that node's subtree.
    fn walk(&self, start: NodeId, f: &mut impl FnMut(NodeId) -> bool) {
        for &child in self.children(start) {
            if f(child) {
                self.walk(child, f);
            }
        }
    }

    fn is_controls(&self, node: NodeId) -> bool {
        self.attr(node, CONTROLS_ATTR).is_some()
    }

    fn remember_display(&mut self, node: NodeId) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            if data.saved_display.is_none() {
                data.saved_display = Some(data.display.clone());
            }
        }
    }
}

impl Default for MemTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTree for MemTree {
    type Node = NodeId;

    fn select(&self, selector: &str) -> Option<NodeId> {
        let mut found = None;
        self.walk(self.root, &mut |node| {
            if found.is_none() && self.matches(node, selector) {
                found = Some(node);
            }
            found.is_none()
        });
        found
    }

    fn is_page_container(&self, node: NodeId) -> bool {
        self.attr(node, PAGINATE_ATTR).is_some()
    }

    fn closest_page_container(&self, node: NodeId) -> Option<NodeId> {
        let mut cursor = self.parent(node);
        while let Some(ancestor) = cursor {
            if self.is_page_container(ancestor) {
                return Some(ancestor);
            }
            cursor = self.parent(ancestor);
        }
        None
    }

    fn for_each_page_container(&self, root: Option<NodeId>, f: &mut dyn FnMut(NodeId)) {
        self.walk(root.unwrap_or(self.root), &mut |node| {
            if self.is_page_container(node) {
                f(node);
            }
            true
        });
    }

    fn page_size_attr(&self, node: NodeId) -> Option<&str> {
        self.attr(node, PAGE_SIZE_ATTR)
    }

    fn item_selector_attr(&self, node: NodeId) -> Option<&str> {
        self.attr(node, ITEM_SELECTOR_ATTR)
    }

    fn collect_items(&self, container: NodeId, selector: Option<&str>, out: &mut Vec<NodeId>) {
        out.clear();
        match selector {
            Some(selector) => {
                self.walk(container, &mut |node| {
                    if self.is_controls(node) {
                        return false;
                    }
                    if self.matches(node, selector) {
                        out.push(node);
                    }
                    true
                });
            }
            None => {
                out.extend(
                    self.children(container)
                        .iter()
                        .copied()
                        .filter(|&child| !self.is_controls(child)),
                );
            }
        }
    }

    fn is_filter_hidden(&self, item: NodeId) -> bool {
        self.has_class(item, FILTER_HIDDEN_CLASS)
            || self.attr(item, SEARCH_HIDDEN_ATTR) == Some("true")
            || self.hidden(item)
    }

    fn show_item(&mut self, item: NodeId) {
        self.remember_display(item);
        if let Some(data) = self.nodes.get_mut(item.0) {
            data.display = data.saved_display.clone().flatten();
            data.attrs.remove(PAGING_HIDDEN_ATTR);
        }
    }

    fn hide_item(&mut self, item: NodeId) {
        self.remember_display(item);
        if let Some(data) = self.nodes.get_mut(item.0) {
            data.display = Some(String::from("none"));
            data.attrs
                .insert(String::from(PAGING_HIDDEN_ATTR), String::from("true"));
        }
    }

    fn build_controls(&mut self, container: NodeId) -> ControlNodes<NodeId> {
        // Tabular containers cannot host a div; attach next to them instead
        // of inside.
        let tabular = matches!(self.tag(container), "table" | "thead" | "tbody" | "tr");
        let block = if tabular {
            self.insert_after(container, "div")
        } else {
            self.append_child(container, "div")
        };
        self.add_class(block, "pagination-controls");
        self.set_attr(block, CONTROLS_ATTR, "true");

        let info = self.append_child(block, "div");
        self.add_class(info, "pagination-info");
        let nav = self.append_child(block, "nav");
        self.add_class(nav, "pagination-nav");
        let page_list = self.append_child(nav, "ul");
        self.add_class(page_list, "pagination");

        ControlNodes {
            block,
            info,
            nav,
            page_list,
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        MemTree::set_text(self, node, text);
    }

    fn set_node_hidden(&mut self, node: NodeId, hidden: bool) {
        self.set_hidden(node, hidden);
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = self
            .nodes
            .get_mut(node.0)
            .map(|data| core::mem::take(&mut data.children))
            .unwrap_or_default();
        for child in children {
            if let Some(data) = self.nodes.get_mut(child.0) {
                data.parent = None;
            }
        }
    }

    fn append_control(&mut self, page_list: NodeId, slot: ControlSlot) -> NodeId {
        let entry = self.append_child(page_list, "li");
        match slot {
            ControlSlot::Prev { target } => {
                self.add_class(entry, "page-prev");
                self.nav_button(entry, "\u{2039}", target)
            }
            ControlSlot::Next { target } => {
                self.add_class(entry, "page-next");
                self.nav_button(entry, "\u{203A}", target)
            }
            ControlSlot::Page { number, active } => {
                if active {
                    self.add_class(entry, "active");
                }
                self.nav_button(entry, &number.to_string(), Some(number))
            }
            ControlSlot::Ellipsis => {
                self.add_class(entry, "ellipsis");
                let marker = self.append_child(entry, "span");
                MemTree::set_text(self, marker, "\u{2026}");
                marker
            }
        }
    }
}

impl MemTree {
    fn nav_button(&mut self, entry: NodeId, label: &str, target: Option<usize>) -> NodeId {
        let button = self.append_child(entry, "button");
        MemTree::set_text(self, button, label);
        match target {
            Some(page) => self.set_attr(button, "data-page", &page.to_string()),
            None => self.set_attr(button, "disabled", "true"),
        }
        button
    }
}
