// Snapshot management for reverse execution

use crate::interpreter::engine::Status;
use crate::memory::{
    heap::Heap,
    stack::{CallStack, OperandStack},
};

/// Mock terminal capturing everything the program prints
///
/// The full transcript is kept; `visible` marks how much of it belongs to the
/// currently displayed point in history.
#[derive(Debug, Clone, Default)]
pub struct MockTerminal {
    text: String,
    visible: usize,
}

impl MockTerminal {
    pub fn new() -> Self {
        MockTerminal {
            text: String::new(),
            visible: 0,
        }
    }

    /// Print without newline. Anything past the visible point is discarded first.
    pub fn print(&mut self, text: &str) {
        self.text.truncate(self.visible);
        self.text.push_str(text);
        self.visible = self.text.len();
    }

    /// Output produced up to the current point in history
    pub fn output(&self) -> &str {
        &self.text[..self.visible]
    }

    /// Byte length of the visible output
    pub fn len(&self) -> usize {
        self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.visible == 0
    }

    /// Show only the first `len` bytes of the transcript
    pub fn rewind(&mut self, len: usize) {
        let mut len = len.min(self.text.len());
        while !self.text.is_char_boundary(len) {
            len -= 1;
        }
        self.visible = len;
    }

    /// Visible output split into lines
    pub fn get_output(&self) -> Vec<String> {
        let mut result: Vec<String> = self.output().split('\n').map(|s| s.to_string()).collect();
        // Remove trailing empty string if text ended with newline
        if result.last().is_some_and(|s| s.is_empty()) {
            result.pop();
        }
        result
    }
}

/// Snapshot of execution state
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub stack: OperandStack,
    pub heap: Heap,
    pub call_stack: CallStack,
    pub pc: usize,
    /// Index of the instruction that produced this state (None for the initial state)
    pub last_executed: Option<usize>,
    pub output_len: usize,
    pub status: Status,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Call frames: assume 64 bytes each
        let call_size = self.call_stack.depth() * 64;

        std::mem::size_of::<Snapshot>()
            + self.stack.estimated_size()
            + self.heap.estimated_size()
            + call_size
    }
}

/// Manages execution history for reverse execution
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Drop every snapshot from `len` onwards
    pub fn truncate(&mut self, len: usize) {
        if len >= self.snapshots.len() {
            return;
        }
        let freed: usize = self.snapshots[len..]
            .iter()
            .map(Snapshot::estimated_size)
            .sum();
        self.current_memory = self.current_memory.saturating_sub(freed);
        self.snapshots.truncate(len);
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pc: usize) -> Snapshot {
        Snapshot {
            stack: OperandStack::new(),
            heap: Heap::new(),
            call_stack: CallStack::new(),
            pc,
            last_executed: pc.checked_sub(1),
            output_len: 0,
            status: Status::Running,
        }
    }

    #[test]
    fn test_terminal_rewind_and_overwrite() {
        let mut terminal = MockTerminal::new();
        terminal.print("ab\n");
        terminal.print("cd");
        assert_eq!(terminal.get_output(), vec!["ab", "cd"]);

        terminal.rewind(3);
        assert_eq!(terminal.output(), "ab\n");
        terminal.rewind(5);
        assert_eq!(terminal.output(), "ab\ncd");

        terminal.rewind(1);
        terminal.print("X");
        assert_eq!(terminal.output(), "aX");
        terminal.rewind(10);
        assert_eq!(terminal.output(), "aX");
    }

    #[test]
    fn test_manager_enforces_limit() {
        let size = snapshot(0).estimated_size();
        let mut manager = SnapshotManager::new(size * 2);
        assert!(manager.push(snapshot(0)).is_ok());
        assert!(manager.push(snapshot(1)).is_ok());
        assert!(manager.push(snapshot(2)).is_err());
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_truncate_releases_memory() {
        let mut manager = SnapshotManager::new(usize::MAX);
        for pc in 0..4 {
            manager.push(snapshot(pc)).unwrap();
        }
        let per_snapshot = manager.memory_usage() / 4;
        manager.truncate(1);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.memory_usage(), per_snapshot);
        assert_eq!(manager.get(0).map(|s| s.pc), Some(0));
    }
}
