//! Topology classification.
//!
//! Counts load terminals per electrical node to find branch points, then
//! partitions loads into parallel branches and a series remainder.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::merge::{DisjointSet, NodeMap, TerminalGraph};
use super::DEFAULT_ROW_GRID;
use crate::circuit::{NodeId, Terminal};
use crate::components::Component;

/// Overall shape of the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    #[default]
    Series,
    Parallel,
    Mixed,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Topology::Series => "series",
            Topology::Parallel => "parallel",
            Topology::Mixed => "mixed",
        })
    }
}

/// How loads are partitioned into parallel branches once a branch point
/// has been found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchGrouping {
    /// Chains of components between two junctions that share both junctions
    /// with another chain. Independent of layout.
    #[default]
    Structural,
    /// Rows of loads and switches on the canvas, by rounded `y / row_grid`.
    /// Matches what the classroom editor draws, but depends on layout.
    Placement,
}

impl FromStr for BranchGrouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "structural" | "graph" => Ok(Self::Structural),
            "placement" | "rows" => Ok(Self::Placement),
            other => Err(format!(
                "unknown grouping '{}', expected 'structural' or 'placement'",
                other
            )),
        }
    }
}

impl fmt::Display for BranchGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Structural => "structural",
            Self::Placement => "placement",
        })
    }
}

/// Result of classifying one circuit. Members are table indices into the
/// [`TerminalGraph`] the classification was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub topology: Topology,
    pub branch_points: Vec<NodeId>,
    /// Loads and switches of each parallel branch, in branch order.
    pub branches: Vec<Vec<usize>>,
    /// Loads assigned to no branch, in table order.
    pub remainder: Vec<usize>,
    branch_of: Vec<Option<usize>>,
}

impl Classification {
    /// Branch holding the component at `index`, if any.
    pub fn branch_of(&self, index: usize) -> Option<usize> {
        self.branch_of.get(index).copied().flatten()
    }
}

/// Classify the circuit behind `graph`, given its electrical nodes.
pub fn classify(
    graph: &TerminalGraph<'_>,
    electrical: &NodeMap,
    grouping: BranchGrouping,
    row_grid: f64,
) -> Classification {
    let components = graph.components();

    let mut incidence = vec![0usize; electrical.count()];
    for (i, component) in components.iter().enumerate() {
        if component.is_battery() || component.is_resistive() {
            for node in electrical.nodes(i) {
                incidence[node.0] += 1;
            }
        }
    }
    let branch_points: Vec<NodeId> = incidence
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 2)
        .map(|(node, _)| NodeId(node))
        .collect();

    let branches = if branch_points.is_empty() {
        Vec::new()
    } else {
        match grouping {
            BranchGrouping::Structural => structural_branches(graph, electrical),
            BranchGrouping::Placement => placement_branches(components, row_grid),
        }
    };

    let mut branch_of = vec![None; components.len()];
    for (b, members) in branches.iter().enumerate() {
        for &i in members {
            branch_of[i] = Some(b);
        }
    }

    let remainder: Vec<usize> = (0..components.len())
        .filter(|&i| components[i].is_resistive() && branch_of[i].is_none())
        .collect();

    let topology = match (branches.is_empty(), remainder.is_empty()) {
        (true, _) => Topology::Series,
        (false, true) => Topology::Parallel,
        (false, false) => Topology::Mixed,
    };

    tracing::debug!(
        %topology,
        %grouping,
        branch_points = branch_points.len(),
        branches = branches.len(),
        remainder = remainder.len(),
        "classified topology"
    );

    Classification {
        topology,
        branch_points,
        branches,
        remainder,
        branch_of,
    }
}

/// A maximal run of components joined through wiring nodes that touch
/// exactly two component terminals.
#[derive(Debug, Default)]
struct Chain {
    members: Vec<usize>,
    junctions: Vec<NodeId>,
    dangling: bool,
    has_battery: bool,
    has_load: bool,
}

impl Chain {
    /// The pair of electrical nodes this chain spans, when it can be a
    /// parallel branch at all.
    fn span(&self) -> Option<(NodeId, NodeId)> {
        if self.dangling || self.has_battery || !self.has_load {
            return None;
        }
        match self.junctions[..] {
            [x, y] if x != y => Some((x.min(y), x.max(y))),
            _ => None,
        }
    }
}

fn structural_branches(graph: &TerminalGraph<'_>, electrical: &NodeMap) -> Vec<Vec<usize>> {
    let components = graph.components();

    // Switches stay two-terminal edges here so that a lamp and its switch
    // end up in one chain.
    let wiring = NodeMap::build(graph, false);
    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); wiring.count()];
    for (i, component) in components.iter().enumerate() {
        if component.is_wire() {
            continue;
        }
        for node in wiring.nodes(i) {
            incident[node.0].push(i);
        }
    }

    let mut runs = DisjointSet::new(components.len());
    for members in &incident {
        if let [a, b] = members[..] {
            runs.union(a, b);
        }
    }

    let mut chains: Vec<Chain> = Vec::new();
    let mut chain_of_root: HashMap<usize, usize> = HashMap::new();
    for (i, component) in components.iter().enumerate() {
        if component.is_wire() {
            continue;
        }
        let root = runs.find(i);
        let next = chains.len();
        let c = *chain_of_root.entry(root).or_insert(next);
        if c == next {
            chains.push(Chain::default());
        }
        let chain = &mut chains[c];
        chain.members.push(i);
        chain.has_battery |= component.is_battery();
        chain.has_load |= component.is_resistive();
        for terminal in Terminal::BOTH {
            match incident[wiring.node(i, terminal).0].len() {
                2 => {}
                0 | 1 => chain.dangling = true,
                _ => chain.junctions.push(electrical.node(i, terminal)),
            }
        }
    }

    let mut by_span: BTreeMap<(NodeId, NodeId), Vec<usize>> = BTreeMap::new();
    for (c, chain) in chains.iter().enumerate() {
        if let Some(span) = chain.span() {
            by_span.entry(span).or_default().push(c);
        }
    }

    let mut branches: Vec<Vec<usize>> = by_span
        .into_values()
        .filter(|group| group.len() >= 2)
        .flatten()
        .map(|c| {
            chains[c]
                .members
                .iter()
                .copied()
                .filter(|&i| components[i].is_resistive() || components[i].is_switch())
                .collect()
        })
        .collect();
    branches.sort_by_key(|members: &Vec<usize>| members.first().copied());
    branches
}

fn placement_branches(components: &[&Component], row_grid: f64) -> Vec<Vec<usize>> {
    let grid = if row_grid.is_finite() && row_grid > 0.0 {
        row_grid
    } else {
        DEFAULT_ROW_GRID
    };

    let mut rows: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (i, component) in components.iter().enumerate() {
        if component.is_resistive() || component.is_switch() {
            let row = (component.placement().y / grid).round() as i64;
            rows.entry(row).or_default().push(i);
        }
    }

    let mut branches: Vec<Vec<usize>> = rows
        .into_values()
        .filter(|members| members.iter().any(|&i| components[i].is_resistive()))
        .collect();

    // A single row shows no parallel structure; everything stays in series.
    if branches.len() < 2 {
        return Vec::new();
    }

    for members in &mut branches {
        members.sort_by(|&a, &b| {
            components[a]
                .placement()
                .x
                .total_cmp(&components[b].placement().x)
                .then(a.cmp(&b))
        });
    }
    branches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{ComponentId, Connection, TerminalRef};
    use crate::components::{Battery, Lamp, Resistor, Switch, SwitchState};

    fn link(from: usize, ft: Terminal, to: usize, tt: Terminal) -> Connection {
        Connection::new(
            TerminalRef::new(ComponentId(from), ft),
            TerminalRef::new(ComponentId(to), tt),
        )
    }

    fn run(components: &[Component], connections: &[Connection], grouping: BranchGrouping) -> Classification {
        let graph = TerminalGraph::new(components, connections);
        let electrical = NodeMap::build(&graph, true);
        classify(&graph, &electrical, grouping, DEFAULT_ROW_GRID)
    }

    fn battery() -> Component {
        Component::Battery(Battery::new(ComponentId(0), "B1".into(), 12.0))
    }

    fn lamp(id: usize, y: f64) -> Component {
        let mut lamp = Lamp::new(ComponentId(id), format!("L{}", id), 50.0);
        lamp.placement.y = y;
        Component::Lamp(lamp)
    }

    fn switch(id: usize, y: f64) -> Component {
        let mut sw = Switch::new(ComponentId(id), format!("S{}", id), SwitchState::Closed);
        sw.placement.y = y;
        Component::Switch(sw)
    }

    #[test]
    fn test_series_loop_has_no_branch_points() {
        let components = vec![
            battery(),
            Component::Resistor(Resistor::new(ComponentId(1), "R1".into(), 100.0)),
        ];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(1, Terminal::B, 0, Terminal::A),
        ];
        let c = run(&components, &connections, BranchGrouping::Structural);
        assert_eq!(c.topology, Topology::Series);
        assert!(c.branch_points.is_empty());
        assert_eq!(c.remainder, vec![1]);
    }

    #[test]
    fn test_two_lamps_in_parallel() {
        let components = vec![battery(), lamp(1, 0.0), lamp(2, 100.0)];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(0, Terminal::B, 2, Terminal::A),
            link(1, Terminal::B, 0, Terminal::A),
            link(2, Terminal::B, 0, Terminal::A),
        ];
        let c = run(&components, &connections, BranchGrouping::Structural);
        assert_eq!(c.topology, Topology::Parallel);
        assert_eq!(c.branch_points.len(), 2);
        assert_eq!(c.branches, vec![vec![1], vec![2]]);
        assert!(c.remainder.is_empty());
    }

    #[test]
    fn test_switch_joins_its_lamp_branch() {
        let components = vec![battery(), lamp(1, 0.0), switch(2, 0.0), lamp(3, 100.0), switch(4, 100.0)];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(1, Terminal::B, 2, Terminal::A),
            link(2, Terminal::B, 0, Terminal::A),
            link(0, Terminal::B, 3, Terminal::A),
            link(3, Terminal::B, 4, Terminal::A),
            link(4, Terminal::B, 0, Terminal::A),
        ];
        for grouping in [BranchGrouping::Structural, BranchGrouping::Placement] {
            let c = run(&components, &connections, grouping);
            assert_eq!(c.topology, Topology::Parallel, "{}", grouping);
            assert_eq!(c.branches, vec![vec![1, 2], vec![3, 4]], "{}", grouping);
            assert_eq!(c.branch_of(2), Some(0));
            assert_eq!(c.branch_of(4), Some(1));
            assert_eq!(c.branch_of(0), None);
        }
    }

    #[test]
    fn test_series_resistor_feeding_parallel_lamps_is_mixed() {
        let components = vec![
            battery(),
            Component::Resistor(Resistor::new(ComponentId(1), "R1".into(), 100.0)),
            lamp(2, 0.0),
            lamp(3, 100.0),
        ];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(1, Terminal::B, 2, Terminal::A),
            link(1, Terminal::B, 3, Terminal::A),
            link(2, Terminal::B, 0, Terminal::A),
            link(3, Terminal::B, 0, Terminal::A),
        ];
        let c = run(&components, &connections, BranchGrouping::Structural);
        assert_eq!(c.topology, Topology::Mixed);
        assert_eq!(c.branches, vec![vec![2], vec![3]]);
        assert_eq!(c.remainder, vec![1]);
    }

    #[test]
    fn test_placement_single_row_falls_back_to_series() {
        // Parallel by wiring, but both lamps drawn on one row.
        let components = vec![battery(), lamp(1, 100.0), lamp(2, 110.0)];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(0, Terminal::B, 2, Terminal::A),
            link(1, Terminal::B, 0, Terminal::A),
            link(2, Terminal::B, 0, Terminal::A),
        ];
        let c = run(&components, &connections, BranchGrouping::Placement);
        assert_eq!(c.topology, Topology::Series);
        assert_eq!(c.branch_points.len(), 2);
        assert_eq!(c.remainder, vec![1, 2]);

        let c = run(&components, &connections, BranchGrouping::Structural);
        assert_eq!(c.topology, Topology::Parallel);
    }

    #[test]
    fn test_placement_orders_members_by_x() {
        let mut l1 = Lamp::new(ComponentId(1), "L1".into(), 50.0);
        l1.placement.x = 300.0;
        let mut s1 = Switch::new(ComponentId(2), "S1".into(), SwitchState::Closed);
        s1.placement.x = 100.0;
        let components = vec![battery(), Component::Lamp(l1), Component::Switch(s1), lamp(3, 200.0)];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(1, Terminal::B, 2, Terminal::A),
            link(2, Terminal::B, 0, Terminal::A),
            link(0, Terminal::B, 3, Terminal::A),
            link(3, Terminal::B, 0, Terminal::A),
        ];
        let c = run(&components, &connections, BranchGrouping::Placement);
        assert_eq!(c.branches, vec![vec![2, 1], vec![3]]);
    }

    #[test]
    fn test_grouping_from_str() {
        assert_eq!("Placement".parse::<BranchGrouping>(), Ok(BranchGrouping::Placement));
        assert_eq!("structural".parse::<BranchGrouping>(), Ok(BranchGrouping::Structural));
        assert!("diagonal".parse::<BranchGrouping>().is_err());
    }
}
