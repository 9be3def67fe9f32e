//! Helpers shared by several panes

use crate::memory::value::{as_char, Value};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

/// Bordered pane block, highlighted when focused
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Number of rows available inside a bordered pane of the given height
pub(crate) fn visible_rows(height: u16) -> usize {
    height.saturating_sub(2).max(1) as usize // Account for borders, min 1
}

/// Clamp a scroll offset so the last page stays filled
pub(crate) fn clamp_scroll(offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        *offset = (*offset).min(total_items - visible_height);
    } else {
        *offset = 0;
    }
}

/// Value followed by its character when it is printable
pub(crate) fn value_spans(value: &Value) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(
        value.to_string(),
        Style::default().fg(DEFAULT_THEME.number),
    )];
    if let Some(ch) = as_char(value).filter(|c| !c.is_control()) {
        spans.push(Span::styled(
            format!(" '{}'", ch),
            Style::default().fg(DEFAULT_THEME.character),
        ));
    }
    spans
}
