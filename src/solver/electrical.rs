//! Steady-state DC solver over the active load set.
//!
//! Active loads inside parallel branches combine by harmonic sum, and the
//! active series remainder is added on top. Everything degrades to the zero
//! state rather than dividing by zero.

use super::activity::PathActivity;
use super::topology::Classification;
use crate::components::{is_usable_resistance, Component};

/// One load that carries current.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Load {
    pub index: usize,
    pub resistance: f64,
    pub is_lamp: bool,
}

/// Active loads, split by where they sit in the topology.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSet {
    pub parallel: Vec<Load>,
    pub series: Vec<Load>,
}

impl LoadSet {
    /// Collect the loads that carry current. Loads with an unusable
    /// resistance are left out.
    pub fn collect(
        components: &[&Component],
        classification: &Classification,
        activity: &PathActivity<'_>,
    ) -> Self {
        let mut loads = LoadSet::default();

        for (index, component) in components.iter().enumerate() {
            let Some(resistance) = component.resistance() else {
                continue;
            };
            if !is_usable_resistance(resistance) {
                tracing::debug!(id = %component.id(), resistance, "skipping unusable load");
                continue;
            }
            if !activity.is_active(index) {
                continue;
            }

            let load = Load {
                index,
                resistance,
                is_lamp: component.is_lamp(),
            };
            match classification.branch_of(index) {
                Some(_) => loads.parallel.push(load),
                None => loads.series.push(load),
            }
        }

        loads
    }

    /// Keep only the loads whose table index passes `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) {
        self.parallel.retain(|load| keep(load.index));
        self.series.retain(|load| keep(load.index));
    }

    pub fn is_empty(&self) -> bool {
        self.parallel.is_empty() && self.series.is_empty()
    }

    /// Equivalent resistance seen by the source. With `lamps_only`, plain
    /// resistors are treated as absent.
    pub fn equivalent_resistance(&self, lamps_only: bool) -> f64 {
        let keep = |load: &&Load| load.is_lamp || !lamps_only;

        let conductance: f64 = self
            .parallel
            .iter()
            .filter(keep)
            .map(|load| load.resistance.recip())
            .sum();
        let series: f64 = self.series.iter().filter(keep).map(|load| load.resistance).sum();

        let parallel = if conductance > 0.0 { conductance.recip() } else { 0.0 };
        parallel + series
    }
}

/// Circuit totals plus the current through every load.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub total_voltage: f64,
    pub total_resistance: f64,
    pub total_current: f64,
    pub total_power: f64,
    currents: Vec<f64>,
    brightness: Vec<f64>,
}

impl Solution {
    /// Everything at rest.
    pub fn zero(size: usize, total_voltage: f64) -> Self {
        Self {
            total_voltage,
            total_resistance: 0.0,
            total_current: 0.0,
            total_power: 0.0,
            currents: vec![0.0; size],
            brightness: vec![0.0; size],
        }
    }

    /// Solve for a source of `total_voltage` driving `loads`.
    pub fn solve(size: usize, total_voltage: f64, loads: &LoadSet) -> Self {
        let mut solution = Self::zero(size, total_voltage);
        if total_voltage == 0.0 || !total_voltage.is_finite() || loads.is_empty() {
            return solution;
        }

        let total_resistance = loads.equivalent_resistance(false);
        if !(total_resistance > 0.0 && total_resistance.is_finite()) {
            return solution;
        }

        let total_current = total_voltage / total_resistance;
        solution.total_resistance = total_resistance;
        solution.total_current = total_current;
        solution.total_power = total_voltage * total_current;

        // Current each lamp would see with the plain resistors taken out.
        let lamps_only = loads.equivalent_resistance(true);
        let ideal_series_current = if lamps_only > 0.0 {
            total_voltage / lamps_only
        } else {
            0.0
        };

        for load in &loads.parallel {
            let current = total_voltage / load.resistance;
            solution.currents[load.index] = current;
            if load.is_lamp {
                solution.brightness[load.index] = power_ratio(current, current);
            }
        }
        for load in &loads.series {
            solution.currents[load.index] = total_current;
            if load.is_lamp {
                solution.brightness[load.index] = power_ratio(total_current, ideal_series_current);
            }
        }

        tracing::debug!(
            total_voltage,
            total_resistance,
            total_current,
            loads = loads.parallel.len() + loads.series.len(),
            "solved circuit"
        );

        solution
    }

    /// Current through the load at table `index`, 0 for anything else.
    pub fn current(&self, index: usize) -> f64 {
        self.currents.get(index).copied().unwrap_or(0.0)
    }

    /// Brightness of the lamp at table `index`, in `[0, 1]`.
    pub fn brightness(&self, index: usize) -> f64 {
        self.brightness.get(index).copied().unwrap_or(0.0)
    }
}

/// `P_actual / P_ideal` for the same resistance, clamped to `[0, 1]`.
fn power_ratio(actual: f64, ideal: f64) -> f64 {
    if ideal == 0.0 || !ideal.is_finite() {
        return 0.0;
    }
    let ratio = (actual / ideal).powi(2);
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
