//! Heap implementation for the interpreter
//!
//! The heap is a sparse map from integer addresses to integer values. Any
//! address may be written, including negative and very large ones; reading
//! an address that was never written is an error rather than a default zero.

use super::value::{estimated_size, Value};
use rustc_hash::FxHashMap;

/// The heap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heap {
    cells: FxHashMap<Value, Value>,
}

impl Heap {
    pub fn new() -> Self {
        Heap {
            cells: FxHashMap::default(),
        }
    }

    /// Write `value` at `address`, replacing any previous value
    pub fn store(&mut self, address: Value, value: Value) {
        self.cells.insert(address, value);
    }

    /// Read the value at `address`, if it was ever written
    pub fn retrieve(&self, address: &Value) -> Option<&Value> {
        self.cells.get(address)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells ordered by address (for UI display)
    pub fn sorted_cells(&self) -> Vec<(&Value, &Value)> {
        let mut cells: Vec<_> = self.cells.iter().collect();
        cells.sort_by(|a, b| a.0.cmp(b.0));
        cells
    }

    pub fn estimated_size(&self) -> usize {
        self.cells
            .iter()
            .map(|(address, value)| estimated_size(address) + estimated_size(value))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_retrieve() {
        let mut heap = Heap::new();
        heap.store(Value::from(5), Value::from(42));
        heap.store(Value::from(-5), Value::from(7));
        assert_eq!(heap.retrieve(&Value::from(5)), Some(&Value::from(42)));
        assert_eq!(heap.retrieve(&Value::from(-5)), Some(&Value::from(7)));

        heap.store(Value::from(5), Value::from(43));
        assert_eq!(heap.retrieve(&Value::from(5)), Some(&Value::from(43)));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_missing_address_has_no_default() {
        let heap = Heap::new();
        assert_eq!(heap.retrieve(&Value::from(0)), None);
    }

    #[test]
    fn test_sorted_cells() {
        let mut heap = Heap::new();
        for address in [9, -2, 4] {
            heap.store(Value::from(address), Value::from(address * 10));
        }
        let addresses: Vec<_> = heap
            .sorted_cells()
            .into_iter()
            .map(|(address, _)| address.clone())
            .collect();
        assert_eq!(
            addresses,
            vec![Value::from(-2), Value::from(4), Value::from(9)]
        );
    }
}
