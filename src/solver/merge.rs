//! Node merging: union-find over component terminals.
//!
//! Every `(component, terminal)` pair starts as its own node. Connections,
//! wire bindings, the body of every wire, and (for electrical nodes) the body
//! of every switch merge terminals into equivalence classes.

use std::collections::HashMap;

use crate::circuit::{ComponentId, Connection, NodeId, Terminal, TerminalRef};
use crate::components::Component;

/// Disjoint-set forest with union by rank and path halving.
///
/// `find` is iterative, so long chains of wiring cannot overflow the stack.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets containing `a` and `b`. Returns `false` if they were
    /// already one set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }

    pub fn same(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

/// The component table with every terminal-to-terminal link resolved to
/// table slots. Links whose endpoints are missing are dropped here.
#[derive(Debug)]
pub struct TerminalGraph<'a> {
    components: Vec<&'a Component>,
    index: HashMap<ComponentId, usize>,
    links: Vec<(usize, usize)>,
}

impl<'a> TerminalGraph<'a> {
    /// Resolve connections and wire bindings against the component table.
    ///
    /// A component whose id repeats an earlier one is skipped entirely.
    pub fn new(components: &'a [Component], connections: &[Connection]) -> Self {
        let mut table = Vec::with_capacity(components.len());
        let mut index = HashMap::with_capacity(components.len());

        for component in components {
            if index.contains_key(&component.id()) {
                tracing::warn!(id = %component.id(), "duplicate component id ignored");
                continue;
            }
            index.insert(component.id(), table.len());
            table.push(component);
        }

        let mut graph = Self {
            components: table,
            index,
            links: Vec::new(),
        };

        for connection in connections {
            match (graph.slot(connection.from), graph.slot(connection.to)) {
                (Some(a), Some(b)) => graph.links.push((a, b)),
                _ => tracing::warn!(
                    from = %connection.from,
                    to = %connection.to,
                    "ignoring connection to a missing component"
                ),
            }
        }

        for i in 0..graph.components.len() {
            let component: &'a Component = graph.components[i];
            let Component::Wire(wire) = component else {
                continue;
            };
            for end in Terminal::BOTH {
                let Some(target) = wire.binding(end) else {
                    continue;
                };
                match graph.slot(target) {
                    Some(slot) => graph.links.push((slot_of(i, end), slot)),
                    None => tracing::warn!(
                        wire = %wire.id,
                        %target,
                        "ignoring wire binding to a missing component"
                    ),
                }
            }
        }

        graph
    }

    /// Deduplicated components, in table order.
    pub fn components(&self) -> &[&'a Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Table index of a component id.
    pub fn index_of(&self, id: ComponentId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    fn slot(&self, terminal: TerminalRef) -> Option<usize> {
        self.index_of(terminal.component)
            .map(|i| slot_of(i, terminal.terminal))
    }
}

fn slot_of(index: usize, terminal: Terminal) -> usize {
    index * 2 + terminal.index()
}

/// Terminal-to-node assignment produced by merging.
#[derive(Debug, Clone)]
pub struct NodeMap {
    nodes: Vec<NodeId>,
    count: usize,
}

impl NodeMap {
    /// Merge terminals into nodes.
    ///
    /// With `link_switches` the two terminals of every switch collapse into
    /// one node whatever the switch state: these are the electrical nodes
    /// used for topology. Without it, switches stay two-terminal edges,
    /// which is what branch tracing needs.
    pub fn build(graph: &TerminalGraph<'_>, link_switches: bool) -> Self {
        let slots = graph.len() * 2;
        let mut sets = DisjointSet::new(slots);

        for &(a, b) in &graph.links {
            sets.union(a, b);
        }
        for (i, component) in graph.components.iter().enumerate() {
            let conducts = match component {
                Component::Wire(_) => true,
                Component::Switch(_) => link_switches,
                _ => false,
            };
            if conducts {
                sets.union(slot_of(i, Terminal::A), slot_of(i, Terminal::B));
            }
        }

        // Dense numbering in slot order keeps ids stable across runs.
        let mut ids: HashMap<usize, NodeId> = HashMap::new();
        let mut nodes = Vec::with_capacity(slots);
        for slot in 0..slots {
            let root = sets.find(slot);
            let next = NodeId(ids.len());
            nodes.push(*ids.entry(root).or_insert(next));
        }

        Self {
            nodes,
            count: ids.len(),
        }
    }

    /// Node of one terminal of the component at table `index`.
    pub fn node(&self, index: usize, terminal: Terminal) -> NodeId {
        self.nodes[slot_of(index, terminal)]
    }

    /// Both nodes of the component at table `index`, `[a, b]`.
    pub fn nodes(&self, index: usize) -> [NodeId; 2] {
        [self.node(index, Terminal::A), self.node(index, Terminal::B)]
    }

    /// Number of distinct nodes.
    pub fn count(&self) -> usize {
        self.count
    }
}
