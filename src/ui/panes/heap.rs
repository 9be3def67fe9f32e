//! Heap pane rendering, one row per written cell in address order

use super::utils::{clamp_scroll, pane_block, value_spans, visible_rows};
use crate::memory::heap::Heap;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Scroll state for the heap pane
pub struct HeapScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Render the heap pane
pub fn render_heap_pane(
    frame: &mut Frame,
    area: Rect,
    heap: &Heap,
    is_focused: bool,
    scroll_state: &mut HeapScrollState,
) {
    let block = pane_block(" Heap ", is_focused);

    if heap.is_empty() {
        let paragraph = Paragraph::new("(no heap cells written)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        scroll_state.prev_item_count = 0;
        return;
    }

    let cells = heap.sorted_cells();
    let width = cells
        .iter()
        .map(|(address, _)| address.to_string().len())
        .max()
        .unwrap_or(1);

    let all_items: Vec<ListItem> = cells
        .into_iter()
        .map(|(address, value)| {
            let mut spans = vec![Span::styled(
                format!("{:>width$}: ", address.to_string(), width = width),
                Style::default().fg(DEFAULT_THEME.comment),
            )];
            spans.extend(value_spans(value));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let total_items = all_items.len();
    let visible_height = visible_rows(area.height);
    scroll_state.prev_item_count = total_items;
    clamp_scroll(&mut scroll_state.offset, total_items, visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
