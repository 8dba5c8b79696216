use crate::filter::{filter_movements, FilterCriteria};
use crate::Movement;

/// Latest movement snapshot, latest criteria and the list derived from both.
///
/// Either input can be replaced at any time; the visible list is recomputed
/// from the current values of both on every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementView {
    movements: Vec<Movement>,
    criteria: FilterCriteria,
    visible: Vec<Movement>,
}

impl MovementView {
    pub fn new(movements: Vec<Movement>, criteria: FilterCriteria) -> Self {
        let mut view = Self {
            movements,
            criteria,
            visible: Vec::new(),
        };
        view.recompute();
        view
    }

    /// Replace the whole list, e.g. after a reload.
    pub fn replace_movements(&mut self, movements: Vec<Movement>) {
        self.movements = movements;
        self.recompute();
    }

    /// Show a freshly created movement at the top of the list.
    pub fn prepend(&mut self, movement: Movement) {
        self.movements.insert(0, movement);
        self.recompute();
    }

    pub fn apply_filter(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(FilterCriteria::default());
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Movements passing the current filter, in list order.
    pub fn visible(&self) -> &[Movement] {
        &self.visible
    }

    fn recompute(&mut self) {
        self.visible = filter_movements(&self.movements, &self.criteria).into_owned();
    }
}
