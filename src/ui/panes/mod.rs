//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`program`]: Instruction listing with the current instruction highlighted
//! - [`stack`]: Operand stack and active calls
//! - [`heap`]: Written heap cells in address order
//! - [`terminal`]: Everything the program printed so far
//! - [`status`]: Status bar with keybindings and execution state
//! - `utils`: Shared block, scrolling and value formatting helpers
//!
//! Each pane module exports a `render_*` function plus the scroll or render
//! data types it needs.

mod utils;

pub mod heap;
pub mod program;
pub mod stack;
pub mod status;
pub mod terminal;

// Re-export render functions for convenience
pub use heap::{render_heap_pane, HeapScrollState};
pub use program::{render_program_pane, ProgramRenderData, ProgramScrollState};
pub use stack::{render_stack_pane, StackRenderData, StackScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use terminal::render_terminal_pane;
