//! Sparse state → action → value table

use std::collections::HashMap;

use crate::types::{Position, StateKey};

/// Two-level Q-table: board state, then action, then value.
///
/// Entries are created on first write only. Reads of anything never written
/// return 0.0 without materializing a row.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: HashMap<StateKey, HashMap<Position, f64>>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get Q-value for a state-action pair, 0.0 if never written
    pub fn get(&self, state: &StateKey, action: Position) -> f64 {
        self.values
            .get(state)
            .and_then(|row| row.get(&action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: StateKey, action: Position, value: f64) {
        self.values.entry(state).or_default().insert(action, value);
    }

    /// All written values for one state
    pub fn row(&self, state: &StateKey) -> Option<&HashMap<Position, f64>> {
        self.values.get(state)
    }

    /// Select the greedy action among `candidates`.
    ///
    /// Candidates are scanned in the given order and an action replaces the
    /// current best only when its value is strictly greater, so ties go to the
    /// earliest candidate. Returns `None` for an empty slice.
    pub fn greedy_action(&self, state: &StateKey, candidates: &[Position]) -> Option<Position> {
        let (&first, rest) = candidates.split_first()?;
        let mut best = first;
        let mut best_value = self.get(state, first);
        for &action in rest {
            let value = self.get(state, action);
            if value > best_value {
                best = action;
                best_value = value;
            }
        }
        Some(best)
    }

    /// Number of states with at least one written value
    pub fn state_count(&self) -> usize {
        self.values.len()
    }

    /// Total number of (state, action) values stored
    pub fn entry_count(&self) -> usize {
        self.values.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop every learned value
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        StateKey::new(s.to_string())
    }

    #[test]
    fn test_qtable_lazy_default() {
        let qtable = QTable::new();
        let state = key(".........");
        assert_eq!(qtable.get(&state, Position::new(0, 0)), 0.0);
        assert!(qtable.row(&state).is_none());
        assert!(qtable.is_empty());
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new();
        let state = key(".........");
        qtable.set(state.clone(), Position::new(1, 1), 1.5);
        assert_eq!(qtable.get(&state, Position::new(1, 1)), 1.5);
        assert_eq!(qtable.get(&state, Position::new(0, 0)), 0.0);
        assert_eq!(qtable.state_count(), 1);
        assert_eq!(qtable.entry_count(), 1);
    }

    #[test]
    fn test_greedy_action_picks_strict_maximum() {
        let mut qtable = QTable::new();
        let state = key(".........");
        let candidates = [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)];
        qtable.set(state.clone(), candidates[0], 0.5);
        qtable.set(state.clone(), candidates[1], 1.5);
        qtable.set(state.clone(), candidates[2], 0.8);

        assert_eq!(qtable.greedy_action(&state, &candidates), Some(candidates[1]));
    }

    #[test]
    fn test_greedy_action_ties_keep_first() {
        let mut qtable = QTable::new();
        let state = key(".........");
        let candidates = [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)];
        qtable.set(state.clone(), candidates[1], 0.7);
        qtable.set(state.clone(), candidates[2], 0.7);

        assert_eq!(qtable.greedy_action(&state, &candidates), Some(candidates[1]));
        assert_eq!(qtable.greedy_action(&key("X........"), &candidates), Some(candidates[0]));
        assert_eq!(qtable.greedy_action(&state, &[]), None);
    }

    #[test]
    fn test_negative_values_lose_to_unvisited() {
        let mut qtable = QTable::new();
        let state = key(".........");
        let candidates = [Position::new(0, 0), Position::new(0, 1)];
        qtable.set(state.clone(), candidates[0], -0.3);

        assert_eq!(qtable.greedy_action(&state, &candidates), Some(candidates[1]));
    }
}
