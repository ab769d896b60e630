//! Main analyzer interface.

use std::collections::BTreeMap;

use crate::circuit::{Connection, TerminalRef};
use crate::components::Component;

use super::activity::PathActivity;
use super::electrical::{LoadSet, Solution};
use super::merge::{DisjointSet, NodeMap, TerminalGraph};
use super::result::{AnalysisResult, BranchReport, ComponentResult, FlowDirection};
use super::topology::{classify, BranchGrouping, Classification};
use super::DEFAULT_ROW_GRID;

/// Configuration for the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// How loads are partitioned into parallel branches.
    pub grouping: BranchGrouping,
    /// Row height for placement grouping, in canvas units.
    pub row_grid: f64,
    /// Only let current flow once every component is wired in.
    pub require_connected: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            grouping: BranchGrouping::default(),
            row_grid: DEFAULT_ROW_GRID,
            require_connected: true,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the branch grouping strategy.
    pub fn with_grouping(mut self, grouping: BranchGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Set the row height used by [`BranchGrouping::Placement`].
    ///
    /// Components whose `y / row_grid` rounds to the same integer share a
    /// row. Non-positive values fall back to the default.
    pub fn with_row_grid(mut self, row_grid: f64) -> Self {
        self.row_grid = row_grid;
        self
    }

    /// Set whether a partly wired circuit is held at zero current.
    ///
    /// The classroom editor keeps every lamp dark until all placed
    /// components are wired in (the default). Turning this off analyzes
    /// whatever loops exist.
    pub fn with_require_connected(mut self, require_connected: bool) -> Self {
        self.require_connected = require_connected;
        self
    }
}

/// The circuit analyzer.
///
/// Holds only configuration: every call to [`analyze`](Self::analyze) is a
/// pure function of its inputs.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create a new analyzer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new analyzer with custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a circuit.
    ///
    /// Never fails: dangling references are ignored and degenerate circuits
    /// come back in the zero state.
    pub fn analyze(&self, components: &[Component], connections: &[Connection]) -> AnalysisResult {
        let _span = tracing::debug_span!(
            "analyze",
            components = components.len(),
            connections = connections.len()
        )
        .entered();

        let graph = TerminalGraph::new(components, connections);
        let table = graph.components();
        let electrical = NodeMap::build(&graph, true);
        tracing::debug!(nodes = electrical.count(), "merged terminals");

        let classification = classify(
            &graph,
            &electrical,
            self.config.grouping,
            self.config.row_grid,
        );
        let activity = PathActivity::new(table, &classification);

        let reachable = reachable_from_battery(table, &electrical);
        let is_connected = reachable.iter().zip(table).all(|(&r, c)| r || c.is_wire())
            && reachable.iter().any(|&r| r);
        let total_voltage: f64 = table
            .iter()
            .filter_map(|c| match c {
                Component::Battery(b) => Some(b.voltage),
                _ => None,
            })
            .sum();

        let energized = is_connected || !self.config.require_connected;
        let solution = if energized {
            let mut loads = LoadSet::collect(table, &classification, &activity);
            loads.retain(|index| reachable[index]);
            Solution::solve(table.len(), total_voltage, &loads)
        } else {
            tracing::debug!("circuit is not fully wired, holding at zero");
            Solution::zero(table.len(), total_voltage)
        };

        let branches = branch_reports(table, &classification, &solution);
        let results = component_results(table, &solution);

        let switches: Vec<&Component> = table.iter().copied().filter(|c| c.is_switch()).collect();
        let has_open_switch = activity.any_open();
        let any_closed = switches.iter().any(|c| !c.is_open_switch());
        let is_closed = is_connected
            && solution.total_current != 0.0
            && (switches.is_empty() || any_closed);

        let flows = connections
            .iter()
            .map(|connection| flow_direction(&graph, connection))
            .collect();

        AnalysisResult {
            is_connected,
            is_closed,
            has_open_switch,
            topology: classification.topology,
            branch_points: classification.branch_points.clone(),
            series_remainder: classification
                .remainder
                .iter()
                .map(|&i| table[i].id())
                .collect(),
            branches,
            total_voltage: solution.total_voltage,
            total_resistance: solution.total_resistance,
            total_current: solution.total_current,
            total_power: solution.total_power,
            components: results,
            flows,
        }
    }
}

/// Which components share a connected piece with the first battery,
/// through wiring and through component bodies. All `false` without a
/// battery.
fn reachable_from_battery(table: &[&Component], electrical: &NodeMap) -> Vec<bool> {
    let Some(battery) = table.iter().position(|c| c.is_battery()) else {
        return vec![false; table.len()];
    };

    let mut pieces = DisjointSet::new(electrical.count());
    for (i, component) in table.iter().enumerate() {
        if !component.is_wire() {
            let [a, b] = electrical.nodes(i);
            pieces.union(a.0, b.0);
        }
    }

    let start = electrical.nodes(battery)[0].0;
    (0..table.len())
        .map(|i| pieces.same(start, electrical.nodes(i)[0].0))
        .collect()
}

fn branch_reports(
    table: &[&Component],
    classification: &Classification,
    solution: &Solution,
) -> Vec<BranchReport> {
    classification
        .branches
        .iter()
        .map(|members| {
            let loads: Vec<usize> = members
                .iter()
                .copied()
                .filter(|&i| table[i].is_resistive() && solution.current(i) != 0.0)
                .collect();
            let conductance: f64 = loads
                .iter()
                .filter_map(|&i| table[i].resistance())
                .map(f64::recip)
                .sum();
            BranchReport {
                members: members.iter().map(|&i| table[i].id()).collect(),
                active: !loads.is_empty(),
                resistance: if conductance > 0.0 { conductance.recip() } else { 0.0 },
                current: loads.iter().map(|&i| solution.current(i)).sum(),
            }
        })
        .collect()
}

/// Per-component results. Batteries, switches and wires carry the total
/// current.
fn component_results(
    table: &[&Component],
    solution: &Solution,
) -> BTreeMap<crate::circuit::ComponentId, ComponentResult> {
    let total_current = solution.total_current;

    table
        .iter()
        .enumerate()
        .map(|(i, component)| {
            let kind = component.kind();
            let result = match component {
                Component::Battery(b) => ComponentResult {
                    kind,
                    current: total_current,
                    voltage: b.voltage,
                    power: None,
                    brightness: None,
                },
                Component::Switch(_) | Component::Wire(_) => ComponentResult {
                    kind,
                    current: total_current,
                    voltage: 0.0,
                    power: None,
                    brightness: None,
                },
                Component::Resistor(r) => {
                    let current = solution.current(i);
                    ComponentResult {
                        kind,
                        current,
                        voltage: voltage_drop(current, r.resistance),
                        power: None,
                        brightness: None,
                    }
                }
                Component::Lamp(l) => {
                    let current = solution.current(i);
                    ComponentResult {
                        kind,
                        current,
                        voltage: voltage_drop(current, l.resistance),
                        power: Some(if current == 0.0 { 0.0 } else { l.power_at(current) }),
                        brightness: Some(solution.brightness(i)),
                    }
                }
            };
            (component.id(), result)
        })
        .collect()
}

fn voltage_drop(current: f64, resistance: f64) -> f64 {
    if current == 0.0 {
        0.0
    } else {
        current * resistance
    }
}

/// Direction of conventional current along a legacy connection: out of
/// the positive pole, into the negative one.
fn flow_direction(graph: &TerminalGraph<'_>, connection: &Connection) -> FlowDirection {
    let pole = |end: TerminalRef| -> Option<Option<bool>> {
        let index = graph.index_of(end.component)?;
        Some(match graph.components()[index] {
            Component::Battery(b) => Some(end.terminal == b.positive_terminal()),
            _ => None,
        })
    };

    match (pole(connection.from), pole(connection.to)) {
        (Some(Some(true)), Some(_)) => FlowDirection::Forward,
        (Some(Some(false)), Some(_)) => FlowDirection::Reverse,
        (Some(None), Some(Some(true))) => FlowDirection::Reverse,
        (Some(None), Some(Some(false))) => FlowDirection::Forward,
        _ => FlowDirection::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Circuit, ComponentId, Rotation, Terminal};
    use crate::components::{Battery, Lamp, Resistor, Switch, SwitchState, Wire};
    use crate::solver::Topology;
    use approx::assert_relative_eq;

    fn link(from: usize, ft: Terminal, to: usize, tt: Terminal) -> Connection {
        Connection::new(
            TerminalRef::new(ComponentId(from), ft),
            TerminalRef::new(ComponentId(to), tt),
        )
    }

    fn battery(id: usize, voltage: f64) -> Component {
        Component::Battery(Battery::new(ComponentId(id), format!("B{}", id), voltage))
    }

    fn lamp(id: usize, resistance: f64) -> Component {
        Component::Lamp(Lamp::new(ComponentId(id), format!("L{}", id), resistance))
    }

    fn resistor(id: usize, resistance: f64) -> Component {
        Component::Resistor(Resistor::new(ComponentId(id), format!("R{}", id), resistance))
    }

    fn switch(id: usize, state: SwitchState) -> Component {
        Component::Switch(Switch::new(ComponentId(id), format!("S{}", id), state))
    }

    fn circuit(src: &str) -> Circuit {
        Circuit::from_ast(crate::dsl::parse(src).unwrap()).unwrap()
    }

    fn id(circuit: &Circuit, name: &str) -> ComponentId {
        circuit.find(name).unwrap().id()
    }

    #[test]
    fn test_single_resistor_loop() {
        let components = vec![battery(0, 12.0), resistor(1, 100.0)];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(1, Terminal::B, 0, Terminal::A),
        ];
        let result = Analyzer::new().analyze(&components, &connections);

        assert!(result.is_connected);
        assert!(result.is_closed);
        assert_eq!(result.topology, Topology::Series);
        assert_relative_eq!(result.total_resistance, 100.0);
        assert_relative_eq!(result.total_current, 0.12);
        assert_relative_eq!(result.total_power, 1.44, epsilon = 1e-12);
        assert_relative_eq!(result.current(ComponentId(1)), 0.12);
        assert_relative_eq!(result.component(ComponentId(1)).unwrap().voltage, 12.0, epsilon = 1e-12);
        assert_relative_eq!(result.current(ComponentId(0)), 0.12);
    }

    #[test]
    fn test_series_loop_sums_resistance() {
        let c = circuit(
            "BAT B1 9\nR R1 100\nR R2 200\nLAMP L1 150\n\
             .connect B1.b R1.a\n.connect R1.b R2.a\n.connect R2.b L1.a\n.connect L1.b B1.a",
        );
        let result = c.analyze();
        assert_eq!(result.topology, Topology::Series);
        assert_relative_eq!(result.total_resistance, 450.0);
        assert_relative_eq!(result.total_current, 0.02);
        for name in ["R1", "R2", "L1"] {
            assert_relative_eq!(result.current(id(&c, name)), 0.02);
        }
    }

    #[test]
    fn test_two_lamps_in_parallel() {
        let c = circuit(
            "BAT B1 12\nLAMP L1 50 y=0\nLAMP L2 50 y=100\n\
             .connect B1.b L1.a\n.connect B1.b L2.a\n.connect L1.b B1.a\n.connect L2.b B1.a",
        );
        for grouping in [BranchGrouping::Structural, BranchGrouping::Placement] {
            let result = c.analyze_with(AnalyzerConfig::new().with_grouping(grouping));
            assert_eq!(result.topology, Topology::Parallel);
            assert_eq!(result.branch_points.len(), 2);
            assert_relative_eq!(result.total_resistance, 25.0);
            assert_relative_eq!(result.total_current, 0.48);
            for name in ["L1", "L2"] {
                let lamp = id(&c, name);
                assert_relative_eq!(result.current(lamp), 0.24);
                assert_relative_eq!(result.lamp_power(lamp).unwrap(), 2.88, epsilon = 1e-12);
                assert_relative_eq!(result.brightness(lamp).unwrap(), 1.0);
            }
            assert_eq!(result.branches.len(), 2);
            assert!(result.branches.iter().all(|b| b.active));
            assert_relative_eq!(result.branches[0].resistance, 50.0);
            assert_relative_eq!(result.branches[1].current, 0.24);
        }
    }

    #[test]
    fn test_parallel_currents_are_independent() {
        let c = circuit(
            "BAT B1 6\nR R1 10\nR R2 20\nR R3 30\n\
             .connect B1.b R1.a\n.connect B1.b R2.a\n.connect B1.b R3.a\n\
             .connect R1.b B1.a\n.connect R2.b B1.a\n.connect R3.b B1.a",
        );
        let result = c.analyze();
        assert_eq!(result.topology, Topology::Parallel);
        assert_relative_eq!(result.total_resistance, 1.0 / (0.1 + 0.05 + 1.0 / 30.0), epsilon = 1e-12);
        assert_relative_eq!(result.current(id(&c, "R1")), 0.6, epsilon = 1e-12);
        assert_relative_eq!(result.current(id(&c, "R2")), 0.3, epsilon = 1e-12);
        assert_relative_eq!(result.current(id(&c, "R3")), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_open_series_switch_stops_everything() {
        let components = vec![battery(0, 12.0), lamp(1, 50.0), switch(2, SwitchState::Open)];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(1, Terminal::B, 2, Terminal::A),
            link(2, Terminal::B, 0, Terminal::A),
        ];
        let result = Analyzer::new().analyze(&components, &connections);

        assert!(result.is_connected);
        assert!(!result.is_closed);
        assert!(result.has_open_switch);
        assert_eq!(result.total_current, 0.0);
        for component in &components {
            assert_eq!(result.current(component.id()), 0.0);
        }
        assert_eq!(result.lamp_power(ComponentId(1)), Some(0.0));
        assert_eq!(result.brightness(ComponentId(1)), Some(0.0));
    }

    #[test]
    fn test_closing_the_series_switch_lights_the_lamp() {
        let mut c = circuit(
            "BAT B1 12\nLAMP L1 50\nSW S1 open\n\
             .connect B1.b L1.a\n.connect L1.b S1.a\n.connect S1.b B1.a",
        );
        assert!(!c.analyze().is_closed);

        c.set_switch("S1", SwitchState::Closed);
        let result = c.analyze();
        assert!(result.is_closed);
        assert_relative_eq!(result.current(id(&c, "L1")), 0.24);
        assert_eq!(result.current(id(&c, "S1")), result.total_current);
        assert_eq!(result.lit_lamps().collect::<Vec<_>>(), vec![id(&c, "L1")]);
    }

    #[test]
    fn test_branch_isolation() {
        let src = "BAT B1 12\n\
                   LAMP L1 50 y=0\nSW S1 open y=0\n\
                   LAMP L2 50 y=100\nSW S2 closed y=100\n\
                   .connect B1.b L1.a\n.connect L1.b S1.a\n.connect S1.b B1.a\n\
                   .connect B1.b L2.a\n.connect L2.b S2.a\n.connect S2.b B1.a";
        let c = circuit(src);
        for grouping in [BranchGrouping::Structural, BranchGrouping::Placement] {
            let result = c.analyze_with(AnalyzerConfig::new().with_grouping(grouping));
            assert_eq!(result.topology, Topology::Parallel);
            assert!(result.is_closed);
            assert_eq!(result.current(id(&c, "L1")), 0.0);
            assert_relative_eq!(result.current(id(&c, "L2")), 0.24);
            assert_relative_eq!(result.total_current, 0.24);
            assert_eq!(result.current(id(&c, "S1")), result.total_current);
            assert_eq!(result.current(id(&c, "S2")), result.total_current);
            assert!(!result.branches[0].active);
            assert!(result.branches[1].active);
        }

        // Opening branch 1 leaves branch 2 exactly as it was.
        let mut closed = c.clone();
        closed.set_switch("S1", SwitchState::Closed);
        let before = closed.analyze();
        let after = c.analyze();
        assert_eq!(before.current(id(&c, "L2")), after.current(id(&c, "L2")));
    }

    #[test]
    fn test_branch_switches_carry_total_current() {
        let c = circuit(
            "BAT B1 12\n\
             LAMP L1 50 y=0\nSW S1 closed y=0\n\
             LAMP L2 50 y=100\nSW S2 closed y=100\n\
             .connect B1.b L1.a\n.connect L1.b S1.a\n.connect S1.b B1.a\n\
             .connect B1.b L2.a\n.connect L2.b S2.a\n.connect S2.b B1.a",
        );
        let result = c.analyze();
        assert_relative_eq!(result.total_current, 0.48);
        assert_relative_eq!(result.current(id(&c, "L1")), 0.24);
        assert_relative_eq!(result.current(id(&c, "S1")), 0.48);
        assert_relative_eq!(result.current(id(&c, "S2")), 0.48);
        assert_relative_eq!(result.branches[0].current, 0.24);
    }

    #[test]
    fn test_unwired_parallel_branches_are_inactive() {
        let components = vec![battery(0, 12.0), lamp(1, 50.0), lamp(2, 50.0), lamp(3, 50.0)];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(0, Terminal::B, 2, Terminal::A),
            link(1, Terminal::B, 0, Terminal::A),
            link(2, Terminal::B, 0, Terminal::A),
        ];
        let result = Analyzer::new().analyze(&components, &connections);
        assert!(!result.is_connected);
        assert_eq!(result.branches.len(), 2);
        assert!(result.branches.iter().all(|b| !b.active && b.current == 0.0));

        let relaxed = AnalyzerConfig::new().with_require_connected(false);
        let result = Analyzer::with_config(relaxed).analyze(&components, &connections);
        assert!(result.branches.iter().all(|b| b.active));
    }

    #[test]
    fn test_mixed_topology() {
        let c = circuit(
            "BAT B1 12\nR R1 100\nLAMP L1 50\nLAMP L2 50\n\
             .connect B1.b R1.a\n.connect R1.b L1.a\n.connect R1.b L2.a\n\
             .connect L1.b B1.a\n.connect L2.b B1.a",
        );
        let result = c.analyze();
        assert_eq!(result.topology, Topology::Mixed);
        assert_eq!(result.series_remainder, vec![id(&c, "R1")]);
        assert_relative_eq!(result.total_resistance, 125.0);
        assert_relative_eq!(result.total_current, 0.096);
        assert_relative_eq!(result.current(id(&c, "R1")), 0.096);
        assert_relative_eq!(result.current(id(&c, "L1")), 0.24);
    }

    #[test]
    fn test_series_resistor_dims_lamp() {
        let c = circuit(
            "BAT B1 12\nLAMP L1 50\nR R1 150\n\
             .connect B1.b L1.a\n.connect L1.b R1.a\n.connect R1.b B1.a",
        );
        let result = c.analyze();
        // 0.06 A against 0.24 A without the resistor.
        assert_relative_eq!(result.brightness(id(&c, "L1")).unwrap(), 0.0625, epsilon = 1e-12);
        assert_eq!(result.brightness(id(&c, "R1")), None);
    }

    #[test]
    fn test_no_battery_is_zero_state() {
        let components = vec![lamp(0, 50.0), resistor(1, 100.0)];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(1, Terminal::B, 0, Terminal::A),
        ];
        let result = Analyzer::new().analyze(&components, &connections);
        assert!(!result.is_connected);
        assert!(!result.is_closed);
        assert_eq!(result.total_voltage, 0.0);
        assert_eq!(result.total_current, 0.0);
        assert!(result.components.values().all(|r| r.current == 0.0));
    }

    #[test]
    fn test_empty_circuit() {
        let result = Analyzer::new().analyze(&[], &[]);
        assert!(!result.is_closed);
        assert!(result.components.is_empty());
        assert_eq!(result.topology, Topology::Series);
    }

    #[test]
    fn test_unwired_component_holds_circuit_at_zero() {
        let components = vec![battery(0, 12.0), lamp(1, 50.0), lamp(2, 50.0)];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(1, Terminal::B, 0, Terminal::A),
        ];
        let result = Analyzer::new().analyze(&components, &connections);
        assert!(!result.is_connected);
        assert_eq!(result.total_current, 0.0);

        let relaxed = AnalyzerConfig::new().with_require_connected(false);
        let result = Analyzer::with_config(relaxed).analyze(&components, &connections);
        assert!(!result.is_connected);
        assert!(!result.is_closed);
        assert_relative_eq!(result.current(ComponentId(1)), 0.24);
    }

    #[test]
    fn test_orphaned_connections_are_ignored() {
        let components = vec![battery(0, 12.0), resistor(1, 100.0)];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(1, Terminal::B, 0, Terminal::A),
            link(1, Terminal::A, 42, Terminal::B),
        ];
        let result = Analyzer::new().analyze(&components, &connections);
        assert_relative_eq!(result.total_current, 0.12);
        assert_eq!(result.flows[2], FlowDirection::Unknown);
    }

    #[test]
    fn test_wire_components_conduct() {
        let mut w1 = Wire::new(ComponentId(2), "W1".into());
        w1.bind(Terminal::A, TerminalRef::new(ComponentId(0), Terminal::B));
        w1.bind(Terminal::B, TerminalRef::new(ComponentId(1), Terminal::A));
        let mut w2 = Wire::new(ComponentId(3), "W2".into());
        w2.bind(Terminal::A, TerminalRef::new(ComponentId(1), Terminal::B));
        w2.bind(Terminal::B, TerminalRef::new(ComponentId(0), Terminal::A));
        let components = vec![
            battery(0, 12.0),
            lamp(1, 50.0),
            Component::Wire(w1),
            Component::Wire(w2),
        ];

        let result = Analyzer::new().analyze(&components, &[]);
        assert!(result.is_closed);
        assert_relative_eq!(result.current(ComponentId(1)), 0.24);
        assert_relative_eq!(result.current(ComponentId(2)), 0.24);
        assert_eq!(result.component(ComponentId(2)).unwrap().voltage, 0.0);
    }

    #[test]
    fn test_batteries_add_up() {
        let components = vec![battery(0, 6.0), battery(1, 6.0), resistor(2, 100.0)];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(1, Terminal::B, 2, Terminal::A),
            link(2, Terminal::B, 0, Terminal::A),
        ];
        let result = Analyzer::new().analyze(&components, &connections);
        assert_relative_eq!(result.total_voltage, 12.0);
        assert_relative_eq!(result.total_current, 0.12);
    }

    #[test]
    fn test_flow_direction_follows_polarity() {
        let mut flipped = Battery::new(ComponentId(0), "B1".into(), 12.0);
        flipped.placement.rotation = Rotation::Deg180;
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(1, Terminal::B, 0, Terminal::A),
            link(1, Terminal::A, 1, Terminal::B),
        ];

        let upright = vec![battery(0, 12.0), lamp(1, 50.0)];
        let result = Analyzer::new().analyze(&upright, &connections);
        assert_eq!(
            result.flows,
            vec![FlowDirection::Forward, FlowDirection::Forward, FlowDirection::Unknown]
        );

        let rotated = vec![Component::Battery(flipped), lamp(1, 50.0)];
        let result = Analyzer::new().analyze(&rotated, &connections);
        assert_eq!(result.flows[0], FlowDirection::Reverse);
        assert_eq!(result.flows[1], FlowDirection::Reverse);
    }

    #[test]
    fn test_unusable_resistance_is_skipped() {
        let components = vec![battery(0, 12.0), resistor(1, 0.0), lamp(2, 50.0)];
        let connections = vec![
            link(0, Terminal::B, 1, Terminal::A),
            link(1, Terminal::B, 2, Terminal::A),
            link(2, Terminal::B, 0, Terminal::A),
        ];
        let result = Analyzer::new().analyze(&components, &connections);
        assert_relative_eq!(result.total_resistance, 50.0);
        assert_eq!(result.current(ComponentId(1)), 0.0);
        assert!(result.total_current.is_finite());
    }

    #[test]
    fn test_demo_netlists() {
        let c = circuit(include_str!("../../demos/series.cir"));
        let result = c.analyze();
        assert_eq!(result.topology, Topology::Series);
        assert_relative_eq!(result.total_current, 0.08);

        let c = circuit(include_str!("../../demos/parallel.cir"));
        let result = c.analyze();
        assert_eq!(result.topology, Topology::Parallel);
        assert_eq!(result.current(id(&c, "L1")), 0.0);
        assert_relative_eq!(result.current(id(&c, "L2")), 0.24);

        let c = circuit(include_str!("../../demos/mixed.cir"));
        let result = c.analyze();
        assert_eq!(result.topology, Topology::Mixed);
        assert_relative_eq!(result.total_resistance, 1025.0);
        assert_relative_eq!(result.current(id(&c, "L1")), 0.18);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let c = circuit(
            "BAT B1 12\nR R1 100\nLAMP L1 50\nLAMP L2 50\nSW S1 closed\n\
             .connect B1.b R1.a\n.connect R1.b L1.a\n.connect R1.b L2.a\n\
             .connect L1.b S1.a\n.connect S1.b B1.a\n.connect L2.b B1.a",
        );
        let first = c.analyze();
        let second = c.analyze();
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }
}
