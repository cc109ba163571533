use alloc::string::String;
use alloc::vec::Vec;

use paginator::{Paginator, PaginatorOptions};

use crate::tree::{ControlNodes, NodeMap, PageTree, TargetRef};

struct ContainerState<N> {
    item_selector: Option<String>,
    engine: Paginator,
    controls: ControlNodes<N>,
    /// Interactive control nodes rendered by the last recomputation.
    buttons: Vec<N>,
}

#[derive(Clone, Copy, Debug)]
struct ButtonAction<N> {
    container: N,
    page: usize,
}

/// A framework-neutral registry that wires [`paginator::Paginator`] engines
/// to the pagination containers of a [`PageTree`].
///
/// One state per container, keyed by node identity. States live for the
/// lifetime of the registry: there is no unregister operation, and entries
/// for containers an embedder removes from its tree simply go stale, which
/// is acceptable for a process-scoped UI.
///
/// Recomputation (`apply`) runs on every `register`/`refresh`/`goto`
/// trigger: classify items, window the page, toggle visibility, update the
/// info text, and rebuild the control list. It is idempotent, so external
/// features can refresh liberally after mutating the tree.
pub struct PageRegistry<T: PageTree> {
    tree: T,
    states: NodeMap<T::Node, ContainerState<T::Node>>,
    /// Control node → navigation action, rebuilt per render. No persistent
    /// listener bookkeeping: stale nodes drop out with their entries.
    actions: NodeMap<T::Node, ButtonAction<T::Node>>,
    /// Registration order, for deterministic global refresh.
    containers: Vec<T::Node>,
}

impl<T: PageTree> PageRegistry<T> {
    pub fn new(tree: T) -> Self {
        Self {
            tree,
            states: NodeMap::default(),
            actions: NodeMap::default(),
            containers: Vec::new(),
        }
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    /// Mutable access to the backing tree. After mutating items or filter
    /// flags directly, call [`Self::refresh`]/[`Self::refresh_all`].
    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    pub fn into_tree(self) -> T {
        self.tree
    }

    /// Number of registered containers.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn is_registered(&self, container: T::Node) -> bool {
        self.states.contains_key(&container)
    }

    /// Read access to a registered container's engine.
    pub fn engine(&self, container: T::Node) -> Option<&Paginator> {
        self.states.get(&container).map(|state| &state.engine)
    }

    pub fn current_page(&self, container: T::Node) -> Option<usize> {
        self.engine(container).map(Paginator::current_page)
    }

    pub fn total_pages(&self, container: T::Node) -> Option<usize> {
        self.engine(container).map(Paginator::total_pages)
    }

    /// Discovers and registers every pagination container in the tree.
    pub fn init(&mut self) {
        self.init_scoped(None);
    }

    /// Discovers and registers every pagination container under `root`,
    /// e.g. a dynamically inserted subtree.
    pub fn init_under(&mut self, root: T::Node) {
        self.init_scoped(Some(root));
    }

    fn init_scoped(&mut self, root: Option<T::Node>) {
        let mut discovered = Vec::new();
        self.tree
            .for_each_page_container(root, &mut |container| discovered.push(container));
        for container in discovered {
            self.register(TargetRef::Node(container));
        }
    }

    /// Registers a container and recomputes it, returning the resolved
    /// container node.
    ///
    /// The reference resolves to the node itself when it carries the
    /// pagination marker, else to its nearest marked ancestor; `None` when
    /// nothing resolves. Registration is idempotent: an existing state is
    /// reused and its controls block is never re-created. On first
    /// registration the page size and item selector are read from the
    /// node's configuration attributes and the controls block is built.
    pub fn register(&mut self, target: TargetRef<'_, T::Node>) -> Option<T::Node> {
        let container = self.resolve(target)?;
        if !self.states.contains_key(&container) {
            let options =
                PaginatorOptions::from_page_size_attr(self.tree.page_size_attr(container));
            let item_selector = self.tree.item_selector_attr(container).map(String::from);
            let controls = self.tree.build_controls(container);
            self.states.insert(
                container,
                ContainerState {
                    item_selector,
                    engine: Paginator::new(options),
                    controls,
                    buttons: Vec::new(),
                },
            );
            self.containers.push(container);
        }
        self.apply(container);
        Some(container)
    }

    /// Recomputes every registered container, in registration order. The
    /// integration point for bulk external changes (e.g. a search filter).
    pub fn refresh_all(&mut self) {
        for i in 0..self.containers.len() {
            let container = self.containers[i];
            self.apply(container);
        }
    }

    /// Recomputes one container, registering it first when unknown. Returns
    /// `false` when the reference does not resolve.
    pub fn refresh(&mut self, target: TargetRef<'_, T::Node>) -> bool {
        self.register(target).is_some()
    }

    /// Navigates a container to `page` (any finite value; clamped by the
    /// recomputation) and recomputes it. Returns `false` when the reference
    /// does not resolve.
    pub fn goto(&mut self, target: TargetRef<'_, T::Node>, page: f64) -> bool {
        let Some(container) = self.resolve(target) else {
            return false;
        };
        if !self.states.contains_key(&container) {
            self.register(TargetRef::Node(container));
        }
        if let Some(state) = self.states.get_mut(&container) {
            state.engine.goto(page);
        }
        self.apply(container);
        true
    }

    /// Handles the activation of a rendered control node, navigating its
    /// container to the node's target page. Returns `false` for nodes that
    /// are not live interactive controls.
    pub fn activate(&mut self, button: T::Node) -> bool {
        let Some(action) = self.actions.get(&button).copied() else {
            return false;
        };
        if let Some(state) = self.states.get_mut(&action.container) {
            state.engine.set_page(action.page);
        }
        self.apply(action.container);
        true
    }

    fn resolve(&self, target: TargetRef<'_, T::Node>) -> Option<T::Node> {
        let node = match target {
            TargetRef::Node(node) => node,
            TargetRef::Selector(selector) => self.tree.select(selector)?,
        };
        if self.tree.is_page_container(node) {
            Some(node)
        } else {
            self.tree.closest_page_container(node)
        }
    }

    /// The full recomputation: classify items, window the page, toggle
    /// visibility, update the info text, rebuild the controls.
    fn apply(&mut self, container: T::Node) {
        let Some(state) = self.states.get_mut(&container) else {
            return;
        };

        let mut candidates = Vec::new();
        self.tree
            .collect_items(container, state.item_selector.as_deref(), &mut candidates);

        let mut available = Vec::new();
        let mut filtered = Vec::new();
        for item in candidates {
            if self.tree.is_filter_hidden(item) {
                filtered.push(item);
            } else {
                available.push(item);
            }
        }

        state.engine.set_total_items(available.len());
        let slice = state.engine.page_slice();

        for (index, &item) in available.iter().enumerate() {
            if slice.contains(index) {
                self.tree.show_item(item);
            } else {
                self.tree.hide_item(item);
            }
        }
        // Filter-hidden items stay out of the window entirely: never counted,
        // never paged, and never suppressed by paging.
        for item in filtered {
            self.tree.show_item(item);
        }

        self.tree
            .set_text(state.controls.info, &state.engine.info_label());

        for old in state.buttons.drain(..) {
            self.actions.remove(&old);
        }
        self.tree.clear_children(state.controls.page_list);

        if !state.engine.controls_visible() {
            self.tree.set_node_hidden(state.controls.block, true);
            return;
        }
        self.tree.set_node_hidden(state.controls.block, false);
        self.tree
            .set_node_hidden(state.controls.nav, !state.engine.nav_visible());

        let mut slots = Vec::new();
        state.engine.collect_control_slots(&mut slots);
        for slot in slots {
            let node = self.tree.append_control(state.controls.page_list, slot);
            if let Some(page) = slot.target_page() {
                self.actions.insert(node, ButtonAction { container, page });
                state.buttons.push(node);
            }
        }
    }
}
