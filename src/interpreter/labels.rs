//! Label table with one-shot lazy construction
//!
//! Labels are recorded as `label` instructions execute, but a `call` or
//! `jump` may target a label further down the program that has not run yet.
//! The first lookup that misses therefore scans the whole instruction
//! sequence once and fills in every label; after that the table is complete
//! and a miss means the label does not exist.
//!
//! When a label is defined more than once, the first definition in program
//! order wins once the table has been built.

use crate::parser::instruction::{FlowOp, Instruction, Label, Operation, Parameter};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    entries: FxHashMap<Label, usize>,
    built: bool,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a label reached during execution; existing entries are kept
    pub fn record(&mut self, label: &Label, index: usize) {
        if !self.built {
            self.entries.entry(label.clone()).or_insert(index);
        }
    }

    /// Look up a label, building the full table on the first miss
    pub fn resolve(&mut self, label: &Label, instructions: &[Instruction]) -> Option<usize> {
        if let Some(&index) = self.entries.get(label) {
            return Some(index);
        }
        if !self.built {
            self.build(instructions);
            return self.entries.get(label).copied();
        }
        None
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn build(&mut self, instructions: &[Instruction]) {
        let mut entries = FxHashMap::default();
        for (index, instruction) in instructions.iter().enumerate() {
            if let (Operation::Flow(FlowOp::Label), Some(Parameter::Label(label))) =
                (instruction.operation, &instruction.parameter)
            {
                entries.entry(label.clone()).or_insert(index);
            }
        }
        self.entries = entries;
        self.built = true;
    }
}
