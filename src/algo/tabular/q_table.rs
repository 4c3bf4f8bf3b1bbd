use std::collections::HashMap;

use crate::error::{Error, Result};

use super::Hashable;

/// Value every action starts from when its state is first seen
pub const BASELINE: f64 = 0.0;

/// A lazily initialized table of action values keyed by state
///
/// ### Generics
/// - `S` - The state key; its internal structure is never inspected
/// - `A` - The action type; the same fixed set of actions applies to every state
///
/// Once a state has been passed to [`ensure`](Self::ensure) every action in the fixed set has an entry.
/// Entries are never removed, so memory grows with the number of distinct states visited.
///
/// Reading or writing a state that was never ensured is a logic error and panics.
#[derive(Debug, Clone)]
pub struct QTable<S, A>
where
    S: Hashable,
    A: Hashable,
{
    actions: Vec<A>,
    table: HashMap<S, HashMap<A, f64>>,
}

impl<S, A> QTable<S, A>
where
    S: Hashable,
    A: Hashable,
{
    /// Create an empty table over a fixed action set
    ///
    /// Duplicate actions are dropped, keeping first occurrence order.
    ///
    /// **Errors** if `actions` is empty
    pub fn new(actions: impl IntoIterator<Item = A>) -> Result<Self> {
        let mut fixed = Vec::new();
        for action in actions {
            if !fixed.contains(&action) {
                fixed.push(action);
            }
        }
        if fixed.is_empty() {
            return Err(Error::EmptyActionSet);
        }
        Ok(Self {
            actions: fixed,
            table: HashMap::new(),
        })
    }

    /// The fixed action set
    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    /// Number of states seen so far
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.table.contains_key(state)
    }

    /// Insert `state` with every action at the baseline value if it is absent
    ///
    /// **Returns** `true` if the state was newly inserted
    pub fn ensure(&mut self, state: S) -> bool {
        if self.table.contains_key(&state) {
            return false;
        }
        let values = self.actions.iter().map(|&a| (a, BASELINE)).collect();
        self.table.insert(state, values);
        true
    }

    /// The stored estimate, or `None` if the state or action is unknown
    pub fn try_get(&self, state: &S, action: &A) -> Option<f64> {
        self.table.get(state)?.get(action).copied()
    }

    /// The stored estimate for `action` in `state`
    ///
    /// **Panics** if `state` was never ensured
    pub fn get(&self, state: &S, action: &A) -> f64 {
        *self
            .values(state)
            .get(action)
            .unwrap_or_else(|| panic!("action {action:?} is not in the fixed action set"))
    }

    /// Overwrite the estimate for `action` in `state`
    ///
    /// **Panics** if `state` was never ensured
    pub fn set(&mut self, state: &S, action: A, value: f64) {
        let values = self
            .table
            .get_mut(state)
            .unwrap_or_else(|| panic!("unknown state {state:?}: call `ensure` before writing"));
        match values.get_mut(&action) {
            Some(v) => *v = value,
            None => panic!("action {action:?} is not in the fixed action set"),
        }
    }

    /// Maximum estimate across all actions in `state`
    ///
    /// **Panics** if `state` was never ensured
    pub fn best_value(&self, state: &S) -> f64 {
        let values = self.values(state);
        self.actions
            .iter()
            .map(|a| values[a])
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Every action whose estimate equals [`best_value`](Self::best_value), in action set order
    ///
    /// **Panics** if `state` was never ensured
    pub fn best_actions(&self, state: &S) -> Vec<A> {
        let best = self.best_value(state);
        let values = self.values(state);
        self.actions
            .iter()
            .filter(|a| values[*a] == best)
            .copied()
            .collect()
    }

    /// Iterate over every known state and its action values
    pub fn iter(&self) -> impl Iterator<Item = (&S, &HashMap<A, f64>)> {
        self.table.iter()
    }

    fn values(&self, state: &S) -> &HashMap<A, f64> {
        self.table
            .get(state)
            .unwrap_or_else(|| panic!("unknown state {state:?}: call `ensure` before reading"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> QTable<&'static str, u8> {
        QTable::new([0, 1, 2, 3]).unwrap()
    }

    #[test]
    fn empty_action_set_rejected() {
        let result = QTable::<u8, u8>::new(Vec::new());
        assert_eq!(result.unwrap_err(), Error::EmptyActionSet);
    }

    #[test]
    fn duplicate_actions_collapsed() {
        let q = QTable::<u8, u8>::new([2, 1, 2, 0, 1]).unwrap();
        assert_eq!(q.actions(), [2, 1, 0]);
    }

    #[test]
    fn ensure_sets_baseline() {
        let mut q = table();
        assert!(q.is_empty());
        assert!(q.ensure("s"));

        assert_eq!(q.best_value(&"s"), 0.0, "baseline best value");
        assert_eq!(q.best_actions(&"s"), [0, 1, 2, 3], "all actions tie");
        for a in 0..4 {
            assert_eq!(q.get(&"s", &a), BASELINE);
        }
    }

    #[test]
    fn ensure_is_idempotent() {
        let mut q = table();
        q.ensure("s");
        q.set(&"s", 2, 1.5);

        assert!(!q.ensure("s"), "second ensure inserts nothing");
        assert_eq!(q.len(), 1);
        assert_eq!(q.get(&"s", &2), 1.5, "existing value untouched");
    }

    #[test]
    fn best_value_and_actions() {
        let mut q = table();
        q.ensure("s");
        q.set(&"s", 0, -1.0);
        q.set(&"s", 1, 4.0);
        q.set(&"s", 3, 4.0);

        assert_eq!(q.best_value(&"s"), 4.0);
        assert_eq!(q.best_actions(&"s"), [1, 3]);

        q.set(&"s", 3, 5.0);
        assert_eq!(q.best_actions(&"s"), [3]);
    }

    #[test]
    fn best_value_all_negative() {
        let mut q = table();
        q.ensure("s");
        for a in 0..4 {
            q.set(&"s", a, -(a as f64) - 1.0);
        }
        assert_eq!(q.best_value(&"s"), -1.0);
        assert_eq!(q.best_actions(&"s"), [0]);
    }

    #[test]
    fn try_get_unknown() {
        let mut q = table();
        assert_eq!(q.try_get(&"s", &0), None);
        q.ensure("s");
        assert_eq!(q.try_get(&"s", &0), Some(0.0));
        assert_eq!(q.try_get(&"s", &9), None);
    }

    #[test]
    #[should_panic(expected = "unknown state")]
    fn get_unknown_state_panics() {
        table().get(&"never", &0);
    }

    #[test]
    #[should_panic(expected = "unknown state")]
    fn set_unknown_state_panics() {
        table().set(&"never", 0, 1.0);
    }
}
