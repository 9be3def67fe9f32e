//! Stack pane rendering: operand stack and call stack
//!
//! The operand stack is listed top first with each slot's distance from the
//! top, which is the index `duplicate_n` would use. Active calls follow,
//! innermost first.

use super::utils::{clamp_scroll, pane_block, value_spans, visible_rows};
use crate::memory::stack::{CallStack, OperandStack};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Scroll state for the stack pane
pub struct StackScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Data needed to render the stack pane
pub struct StackRenderData<'a> {
    pub stack: &'a OperandStack,
    pub call_stack: &'a CallStack,
}

fn section_header(title: String) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        title,
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    )))
}

fn placeholder(text: &'static str) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        text,
        Style::default().fg(DEFAULT_THEME.comment),
    )))
}

/// Build every row of the pane, top of the operand stack first
pub(crate) fn stack_items(data: &StackRenderData) -> Vec<ListItem<'static>> {
    let mut items = vec![section_header(format!(
        "Operand stack ({})",
        data.stack.depth()
    ))];

    if data.stack.is_empty() {
        items.push(placeholder("  (empty)"));
    }
    for (distance, value) in data.stack.values().iter().rev().enumerate() {
        let mut spans = vec![Span::styled(
            format!("  [{}] ", distance),
            Style::default().fg(DEFAULT_THEME.comment),
        )];
        spans.extend(value_spans(value));
        items.push(ListItem::new(Line::from(spans)));
    }

    items.push(ListItem::new(""));
    items.push(section_header(format!(
        "Call stack ({})",
        data.call_stack.depth()
    )));

    if data.call_stack.is_empty() {
        items.push(placeholder("  (no active calls)"));
    }
    for frame in data.call_stack.frames().iter().rev() {
        items.push(ListItem::new(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                frame.label.to_string(),
                Style::default().fg(DEFAULT_THEME.label),
            ),
            Span::styled(
                format!("  called at {}, returns to {}", frame.call_site, frame.return_pc),
                Style::default().fg(DEFAULT_THEME.fg),
            ),
        ])));
    }

    items
}

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    data: StackRenderData,
    is_focused: bool,
    scroll_state: &mut StackScrollState,
) {
    let block = pane_block(" Stack ", is_focused);
    let all_items = stack_items(&data);

    let total_items = all_items.len();
    let visible_height = visible_rows(area.height);

    // New values appear at the top, so jump back there when the stack grows
    if total_items > scroll_state.prev_item_count {
        scroll_state.offset = 0;
    }
    scroll_state.prev_item_count = total_items;
    clamp_scroll(&mut scroll_state.offset, total_items, visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
