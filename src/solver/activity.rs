//! Path activity: which components sit on an unbroken path.
//!
//! An open switch inside a parallel branch only breaks that branch. Any
//! other open switch breaks every component outside the parallel branches.

use super::topology::Classification;
use crate::components::Component;

/// Answers "does this component carry current" for one classified circuit.
pub struct PathActivity<'a> {
    components: &'a [&'a Component],
    classification: &'a Classification,
    any_open: bool,
}

impl<'a> PathActivity<'a> {
    pub fn new(components: &'a [&'a Component], classification: &'a Classification) -> Self {
        Self {
            components,
            classification,
            any_open: components.iter().any(|c| c.is_open_switch()),
        }
    }

    /// Whether the component at table `index` has an unbroken path.
    pub fn is_active(&self, index: usize) -> bool {
        if self.components[index].is_open_switch() {
            return false;
        }
        match self.classification.branch_of(index) {
            Some(branch) => !self.branch_has_open_switch(branch),
            None => !self.any_open,
        }
    }

    fn branch_has_open_switch(&self, branch: usize) -> bool {
        self.classification.branches[branch]
            .iter()
            .any(|&i| self.components[i].is_open_switch())
    }

    /// Whether any switch in the circuit is open.
    pub fn any_open(&self) -> bool {
        self.any_open
    }
}
